use anyhow::{anyhow, Result};
use inquire::Confirm;
use serde_json::Value;

use gym_domain::Fields;

mod attendance;
pub use attendance::*;

mod classes;
pub use classes::*;

mod expenses;
pub use expenses::*;

mod members;
pub use members::*;

mod session;
pub use session::*;

mod stats;
pub use stats::*;

mod trainers;
pub use trainers::*;

/// Ask before changing data, unless `--yes` was given.
pub fn confirm(message: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new(message).with_default(true).prompt()?)
}

/// Parse `key=value` pairs. Values that are valid JSON (numbers,
/// booleans, quoted strings, ...) keep their type, anything else is
/// taken as a string.
pub fn parse_fields(pairs: &[String]) -> Result<Fields> {
    let mut fields = Fields::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{}'", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow!("empty key in '{}'", pair));
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields(&[
            "name=Spin Class".to_string(),
            "capacity=20".to_string(),
            "outdoor=false".to_string(),
            "room=\"12\"".to_string(),
            "note=a=b".to_string(),
        ])
        .unwrap();
        assert_eq!(fields.get("name"), Some(&json!("Spin Class")));
        assert_eq!(fields.get("capacity"), Some(&json!(20)));
        assert_eq!(fields.get("outdoor"), Some(&json!(false)));
        assert_eq!(fields.get("room"), Some(&json!("12")));
        assert_eq!(fields.get("note"), Some(&json!("a=b")));
    }

    #[test]
    fn test_parse_fields_rejects_bare_words() {
        assert!(parse_fields(&["capacity".to_string()]).is_err());
        assert!(parse_fields(&["=20".to_string()]).is_err());
    }

    #[test]
    fn test_confirm_skipped_with_yes() {
        assert!(confirm("Delete?", true).unwrap());
    }
}
