/// Format an amount as whole Indian Rupees with lakh/crore digit grouping
///
/// `1000000.0` becomes `₹10,00,000`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{}₹{}", sign, group_indian(&digits))
}

/// Last three digits form one group, the rest are grouped in pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(26000.0), "₹26,000");
        assert_eq!(format_inr(500000.0), "₹5,00,000");
        assert_eq!(format_inr(1000000.0), "₹10,00,000");
        assert_eq!(format_inr(25000000.0), "₹2,50,00,000");
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(format_inr(20800.4), "₹20,800");
        assert_eq!(format_inr(33799.6), "₹33,800");
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }
}
