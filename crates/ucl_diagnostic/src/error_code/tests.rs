use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E2001.as_str(), "E2001");
}

#[test]
fn test_stage_predicates() {
    assert!(ErrorCode::E0001.is_scanner_error());
    assert!(!ErrorCode::E0001.is_parser_error());

    assert!(ErrorCode::E1005.is_parser_error());
    assert!(!ErrorCode::E1005.is_macro_error());

    assert!(ErrorCode::E1006.is_macro_error());
    assert!(ErrorCode::E1007.is_macro_error());
    assert!(!ErrorCode::E9001.is_parser_error());
}

#[test]
fn test_all_codes_round_trip_through_from_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
        assert!(!code.description().is_empty());
    }
    assert_eq!("e1007".parse::<ErrorCode>(), Ok(ErrorCode::E1007));
    assert_eq!("E4242".parse::<ErrorCode>(), Err(()));
}
