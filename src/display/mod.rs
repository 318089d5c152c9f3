//! Display formatting for terminal output
//!
//! Small helpers shared by the report renderers.

/// Format a cost with two decimals
pub fn format_amount(amount: f64) -> String {
    // Avoid printing "-0.00" for sums that cancel out
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:.2}", amount)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(-3.456), "-3.46");
        assert_eq!(format_amount(-0.0), "0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.43), "5.4%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(66.6), "67%");
        assert_eq!(format_percentage(-20.0), "-20%");
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3), "───");
    }
}
