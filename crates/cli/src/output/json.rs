//! JSON output formatting.

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zarvan_core::calendar::CivilDate;

    #[test]
    fn test_format_civil_date() {
        assert_eq!(format_json(&CivilDate::new(1403, 1, 5)), "\"1403-1-5\"");
    }
}
