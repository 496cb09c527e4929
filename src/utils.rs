use colored::Colorize;

/// Format an allocation amount for display (4 decimal places)
pub fn format_amount(amount: f64) -> String {
    format!("{:.4}", amount)
}

/// Format an allocation total with color
pub fn format_total(amount: f64) -> String {
    format!("{:.4}", amount).green().to_string()
}

/// Format address truncated for display
pub fn format_address(address: &str) -> String {
    if address.len() <= 12 {
        address.to_string()
    } else {
        format!("{}...{}", &address[..6], &address[address.len() - 6..])
    }
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_render_with_four_decimals() {
        assert_eq!(format_amount(12.34567), "12.3457");
        assert_eq!(format_amount(0.0), "0.0000");
    }

    #[test]
    fn short_addresses_are_not_truncated() {
        assert_eq!(format_address("0xAAA"), "0xAAA");
        assert_eq!(
            format_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234...345678"
        );
    }
}
