// SPDX-License-Identifier: MPL-2.0
//! Human-readable number formatting.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a number with at most two decimals, trimming trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = format!("{value:.2}");
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a byte count using base-1024 units up to GB.
///
/// ```
/// use gallery_studio::domain::format::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut threshold: u64 = 1024;
    while unit + 1 < SIZE_UNITS.len() && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }
    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64 / 1024f64.powi(unit as i32);
    format!("{} {}", format_number(value), SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn small_sizes_stay_in_bytes() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
    }

    #[test]
    fn two_decimals_trimmed() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1234567), "1.18 MB");
    }

    #[test]
    fn huge_sizes_stay_in_gb() {
        assert_eq!(format_file_size(2 * 1024u64.pow(4)), "2048 GB");
    }

    #[test]
    fn format_number_trims() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.50), "2.5");
        assert_eq!(format_number(-0.001), "0");
    }
}
