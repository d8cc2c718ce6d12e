use tracing::debug;

/// Keep only the ASCII digits of `text`, in order.
fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Parse a scraped amount by concatenating its digits.
///
/// Currency symbols, separators and suffix text are discarded. Text without a
/// single digit ("Call for price") is missing, as is a digit string too long
/// to fit.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        debug!("No digits in amount {:?}", raw);
        return None;
    }

    match digits.parse::<u64>() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Amount {:?} out of range: {}", raw, e);
            None
        }
    }
}

/// Parse a listing price such as `"$1,234,567"`
pub fn parse_price(raw: &str) -> Option<u64> {
    parse_amount(raw)
}

/// Parse a mileage such as `"45,231 mi"`
pub fn parse_mileage(raw: &str) -> Option<u64> {
    parse_amount(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn price_concatenates_digits() {
        assert_eq!(parse_price("$1,234,567"), Some(1_234_567));
        assert_eq!(parse_price("USD 250.000"), Some(250_000));
        assert_eq!(parse_price("  42 "), Some(42));
    }

    #[test]
    fn price_without_digits_is_missing() {
        assert_eq!(parse_price("Call for price"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn overlong_amount_is_missing() {
        assert_eq!(parse_price("99999999999999999999999"), None);
    }

    #[test]
    fn mileage_strips_units() {
        assert_eq!(parse_mileage("45,231 mi"), Some(45_231));
        assert_eq!(parse_mileage("10,000 mi"), Some(10_000));
        assert_eq!(parse_mileage("TBD"), None);
    }
}
