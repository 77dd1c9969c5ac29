//! Number formatting in the Brazilian style used by the dashboard and the CSV export.

/// `1234.5` -> `"1.234,50"`
pub fn format_decimal(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}

/// `10.5` -> `"10,50"`, without thousands separators.
pub fn format_decimal_plain(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.2}", value).replace('.', ",")
}

/// `1234.5` -> `"R$ 1.234,50"`
pub fn format_brl(value: f64) -> String {
    format!("R$ {}", format_decimal(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal_groups_thousands() {
        assert_eq!(format_decimal(0.0), "0,00");
        assert_eq!(format_decimal(35.5), "35,50");
        assert_eq!(format_decimal(1234.5), "1.234,50");
        assert_eq!(format_decimal(1234567.891), "1.234.567,89");
        assert_eq!(format_decimal(-999.999), "-1.000,00");
        assert_eq!(format_decimal(f64::NAN), "0,00");
    }

    #[test]
    fn test_plain_and_currency() {
        assert_eq!(format_decimal_plain(1234.5), "1234,50");
        assert_eq!(format_brl(17.75), "R$ 17,75");
    }
}
