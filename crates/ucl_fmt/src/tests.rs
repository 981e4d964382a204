use super::*;
use pretty_assertions::assert_eq;

#[test]
fn names_round_trip() {
    for emitter in Emitter::ALL {
        assert_eq!(emitter.name().parse::<Emitter>(), Ok(emitter));
    }
    assert_eq!("YAML".parse::<Emitter>(), Ok(Emitter::Yaml));
    assert_eq!("ucl".parse::<Emitter>(), Ok(Emitter::Config));
}

#[test]
fn unknown_name() {
    let err = "toml".parse::<Emitter>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown output format `toml` (expected json, compact, config or yaml)"
    );
}
