//! Human-readable byte sizes (`512MB`, `4GB`).

const UNITS: [(&str, u64); 5] = [
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
    ("B", 1),
];

/// Parse a size such as `4GB`, `512mb` or `1073741824`.
///
/// Units are binary (1KB = 1024B). Used as a clap value parser, so the
/// error is a plain message.
pub fn parse_size(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("size must not be empty".to_string());
    }

    let upper = trimmed.to_ascii_uppercase();
    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, mult)| upper.strip_suffix(suffix).map(|n| (n.trim(), *mult)))
        .unwrap_or((upper.as_str(), 1));

    let value: u64 = number
        .parse()
        .map_err(|_| format!("invalid size '{}': expected e.g. 512MB or 4GB", raw))?;

    if value == 0 {
        return Err(format!("invalid size '{}': must be greater than zero", raw));
    }

    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("invalid size '{}': too large", raw))
}

/// Format bytes with the largest unit that divides evenly, else one decimal.
pub fn format_size(bytes: u64) -> String {
    for (suffix, mult) in UNITS {
        if bytes >= mult {
            if bytes % mult == 0 {
                return format!("{}{}", bytes / mult, suffix);
            }
            return format!("{:.1}{}", bytes as f64 / mult as f64, suffix);
        }
    }
    "0B".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_size("4GB"), Ok(4 << 30));
        assert_eq!(parse_size("512mb"), Ok(512 << 20));
        assert_eq!(parse_size("2 TB"), Ok(2 << 40));
        assert_eq!(parse_size("64KB"), Ok(64 << 10));
        assert_eq!(parse_size("100B"), Ok(100));
        assert_eq!(parse_size("1024"), Ok(1024));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("lots").is_err());
        assert!(parse_size("4XB").is_err());
        assert!(parse_size("0GB").is_err());
        assert!(parse_size("-1GB").is_err());
        assert!(parse_size("99999999999TB").is_err());
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(4 << 30), "4GB");
        assert_eq!(format_size(512 << 20), "512MB");
        assert_eq!(format_size(1536 << 20), "1.5GB");
        assert_eq!(format_size(100), "100B");
    }
}
