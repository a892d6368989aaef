/// Longest sheet name Excel accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Validate a hostname.
/// Allows alphanumeric, hyphens, dots, and underscores. No path separators or shell metacharacters.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > 253 {
        return false;
    }
    hostname.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}

/// Make a string usable as an Excel sheet name: drop the characters Excel
/// rejects, strip leading/trailing apostrophes and truncate to 31 chars.
pub fn safe_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    let truncated: String = cleaned.chars().take(MAX_SHEET_NAME_LEN).collect();
    if truncated.is_empty() {
        "Sheet".to_string()
    } else {
        truncated
    }
}

/// File stem for per-zone artifacts, e.g. "EA-" -> "ea"
pub fn zone_file_stem(zone: &str) -> String {
    zone.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_hostname() {
        assert!(is_valid_hostname("TU-VIC-DC1-L0-SW-COR-PRD-01"));
        assert!(is_valid_hostname("router.lab.local"));
        assert!(is_valid_hostname("my_host"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("host name")); // spaces
        assert!(!is_valid_hostname("host;rm")); // semicolon
        assert!(!is_valid_hostname("../etc/passwd")); // path traversal
        assert!(!is_valid_hostname("host\nname")); // newline
    }

    #[test]
    fn test_safe_sheet_name() {
        assert_eq!(safe_sheet_name("All Zones"), "All Zones");
        assert_eq!(safe_sheet_name("EA/BMS [prod]"), "EABMS prod");
        assert_eq!(safe_sheet_name("'quoted'"), "quoted");
        assert_eq!(safe_sheet_name("???"), "Sheet");
        let long = "A".repeat(40);
        assert_eq!(safe_sheet_name(&long).len(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_zone_file_stem() {
        assert_eq!(zone_file_stem("EA-"), "ea");
        assert_eq!(zone_file_stem("CORPORATE"), "corporate");
        assert_eq!(zone_file_stem("MSS"), "mss");
    }
}
