use std::fmt::Display;

/// Rendered in place of any value a record does not carry
pub const PLACEHOLDER: &str = "-";

/// Display an optional value, falling back to [`PLACEHOLDER`]
pub fn display_or_placeholder<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Compare two strings ignoring ASCII and Unicode case
pub fn cmp_ignore_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_or_placeholder() {
        assert_eq!(display_or_placeholder(Some(12)), "12");
        assert_eq!(display_or_placeholder(None::<u32>), "-");
    }

    #[test]
    fn test_cmp_ignore_case_sorts_mixed_case() {
        let mut names = vec!["system", "Application", "Security", "application"];
        names.sort_by(|a, b| cmp_ignore_case(a, b));
        assert_eq!(names, vec!["Application", "application", "Security", "system"]);
    }
}
