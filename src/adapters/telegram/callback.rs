//! Inline keyboard callback tokens.
//!
//! Every button carries the position of the field it answers, so a press on
//! a keyboard left over from an earlier question can be told apart from an
//! answer to the current one.

/// Encodes a button's callback data as `<order>:<value>`.
pub fn encode(order: usize, value: &str) -> String {
    format!("{}:{}", order, value)
}

/// Splits callback data into field position and selected value.
///
/// Only the first `:` separates; values may contain colons themselves.
pub fn parse(data: &str) -> Option<(usize, &str)> {
    let (order, value) = data.split_once(':')?;
    let order = order.parse().ok()?;
    Some((order, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_order_and_value() {
        assert_eq!(parse("12:One year"), Some((12, "One year")));
        assert_eq!(parse("0:1"), Some((0, "1")));
    }

    #[test]
    fn parse_keeps_colons_in_value() {
        assert_eq!(parse("3:a:b"), Some((3, "a:b")));
    }

    #[test]
    fn parse_rejects_malformed_data() {
        assert_eq!(parse("Yes"), None);
        assert_eq!(parse("x:Yes"), None);
        assert_eq!(parse("-1:Yes"), None);
    }

    #[test]
    fn encoded_tokens_fit_telegram_limit() {
        let token = encode(14, "Bank transfer (automatic)");
        assert!(token.len() <= 64);
        assert_eq!(parse(&token), Some((14, "Bank transfer (automatic)")));
    }
}
