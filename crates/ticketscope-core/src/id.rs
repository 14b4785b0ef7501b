//! Identifier coercion.
//!
//! Order and attendee identifiers reach the resolver from hosts as numbers or
//! as free-form text (query parameters, shortcode attributes). [`coerce_id`]
//! turns text into an `i64` the way host storage layers do, so comparisons
//! against stored references agree: skip leading whitespace, honor one sign,
//! read the longest leading digit run and ignore the rest, fall back to `0`
//! when nothing numeric leads.

/// Coerces free-form text to an identifier.
///
/// - leading whitespace is skipped
/// - one leading `+` or `-` sign is honored
/// - the longest leading run of ASCII digits is parsed
/// - trailing garbage is ignored (`"500abc"` is `500`)
/// - no leading digits means `0` (`"abc"`, `""`, `"--5"`)
///
/// Values beyond the `i64` range saturate at the nearest bound.
pub fn coerce_id(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }

    let mut value: i64 = 0;
    for digit in rest[..digits_len].bytes() {
        let step = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit - b'0')));
        value = match step {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }

    if negative { -value } else { value }
}
