// src/format.rs

//! Human-readable byte sizes
//!
//! Binary units up to GiB, matching what `pkg` itself prints.

/// Format a byte count with two decimal places, e.g. `3.52MiB`
pub fn size_fmt(bytes: u64) -> String {
    let (value, unit) = scale(bytes);
    if unit == "B" {
        format!("{}B", bytes)
    } else {
        format!("{:.2}{}", value, unit)
    }
}

/// Format a byte count rounded to a whole number, e.g. `4MiB`
pub fn size_fmt_rounded(bytes: u64) -> String {
    let (value, unit) = scale(bytes);
    format!("{}{}", value.round() as u64, unit)
}

fn scale(bytes: u64) -> (f64, &'static str) {
    let mut value = bytes as f64;
    for unit in ["B", "KiB", "MiB"] {
        if value < 1024.0 {
            return (value, unit);
        }
        value /= 1024.0;
    }
    (value, "GiB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_stay_unscaled() {
        assert_eq!(size_fmt(0), "0B");
        assert_eq!(size_fmt(512), "512B");
        assert_eq!(size_fmt(1023), "1023B");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(size_fmt(1024), "1.00KiB");
        assert_eq!(size_fmt(1024 * 1024), "1.00MiB");
        assert_eq!(size_fmt(1024 * 1024 * 1024), "1.00GiB");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(size_fmt(1536), "1.50KiB");
        assert_eq!(size_fmt(2_621_440), "2.50MiB");
    }

    #[test]
    fn test_rounded_variant() {
        assert_eq!(size_fmt_rounded(1536), "2KiB");
        assert_eq!(size_fmt_rounded(1023), "1023B");
        assert_eq!(size_fmt_rounded(10 * 1024 * 1024), "10MiB");
    }

    #[test]
    fn test_no_tib_rollover() {
        // Anything above GiB keeps the GiB unit
        assert_eq!(size_fmt(3 * 1024_u64.pow(4)), "3072.00GiB");
    }
}
