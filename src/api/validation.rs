use super::ApiError;

/// Blank values count as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_business_name(name: Option<String>) -> Result<String, ApiError> {
    optional_text(name).ok_or_else(|| ApiError::validation("businessName is required"))
}

/// `true` and `1` enable the flag, anything else leaves it off.
pub fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1")
    )
}

/// Comma-separated category tags.
pub fn parse_tags(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate_enabled_flag(body: &serde_json::Value) -> Result<bool, ApiError> {
    body.get("enabled")
        .and_then(serde_json::Value::as_bool)
        .ok_or_else(|| ApiError::validation("enabled must be boolean"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_business_name() {
        assert_eq!(
            validate_business_name(Some("  Blue Moon ".to_string())).unwrap(),
            "Blue Moon"
        );
        assert!(validate_business_name(Some("   ".to_string())).is_err());
        assert!(validate_business_name(None).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("TRUE")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("yes please")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags(Some("plumber, ,home_goods_store")),
            vec!["plumber", "home_goods_store"]
        );
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn test_validate_enabled_flag() {
        assert!(!validate_enabled_flag(&json!({"enabled": false})).unwrap());
        assert!(validate_enabled_flag(&json!({"enabled": "false"})).is_err());
        assert!(validate_enabled_flag(&json!({})).is_err());
    }
}
