//! `ucl check`: parse without printing the document.

use super::{parse_with, Options};

pub fn check_file(path: &str, options: &Options) -> Result<String, String> {
    let parser = parse_with(path, options)?;
    let keys = parser.object().map_or(0, |root| root.len());
    Ok(format!("{path}: ok ({keys} top-level keys)"))
}
