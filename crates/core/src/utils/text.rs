use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Returns the trimmed value when it has content.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Renders a unit enum through its serde representation.
pub fn enum_to_text<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Parses a stored enum value, falling back to the default for unknown text.
pub fn enum_from_text<T: DeserializeOwned + Default>(text: &str) -> T {
    serde_json::from_value(Value::String(text.to_string())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Shade {
        #[default]
        Light,
        Dark,
    }

    #[test]
    fn enum_text_conversion() {
        assert_eq!(enum_to_text(&Shade::Dark), "dark");
        assert_eq!(enum_from_text::<Shade>("dark"), Shade::Dark);
        assert_eq!(enum_from_text::<Shade>("purple"), Shade::Light);
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("jane@shop.com"));
        assert!(is_valid_email(" jane@shop.co.uk "));
        assert!(!is_valid_email("jane@shop"));
        assert!(!is_valid_email("not an email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn blank_values_are_dropped() {
        assert_eq!(non_blank(Some("  x ")), Some("x"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
