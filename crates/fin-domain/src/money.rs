//! Redondeo y formato monetario.
//!
//! El pipeline trabaja en rupias (INR); los montos se redondean a dos
//! decimales y se renderizan con separador de miles.

/// Redondea a dos decimales.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formatea un monto como rupias con separador de miles: `₹38,000.00`.
pub fn format_inr(amount: f64) -> String {
    let rounded = round2(amount);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (ints, frac) = match text.split_once('.') {
        Some(parts) => parts,
        None => (text.as_str(), "00"),
    };
    let mut grouped = String::with_capacity(ints.len() + ints.len() / 3);
    for (idx, ch) in ints.chars().enumerate() {
        if idx > 0 && (ints.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{}{}.{}", sign, grouped, frac)
}

/// Porcentaje con un decimal a partir de una razón: `0.6 -> "60.0%"`.
pub fn format_pct1(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_truncates_to_cents() {
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(2000.0), 2000.0);
        assert_eq!(round2(37999.999), 38000.0);
    }

    #[test]
    fn test_format_inr_groups_thousands() {
        assert_eq!(format_inr(38000.0), "₹38,000.00");
        assert_eq!(format_inr(1234567.891), "₹1,234,567.89");
        assert_eq!(format_inr(950.5), "₹950.50");
        assert_eq!(format_inr(0.0), "₹0.00");
    }

    #[test]
    fn test_format_inr_negative_amounts() {
        assert_eq!(format_inr(-1234.56), "₹-1,234.56");
    }

    #[test]
    fn test_format_pct1() {
        assert_eq!(format_pct1(0.6), "60.0%");
        assert_eq!(format_pct1(0.05), "5.0%");
    }
}
