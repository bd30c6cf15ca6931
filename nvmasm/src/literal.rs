use libnvm::Syscall;

/// Evaluate a numeric operand. Tried in order:
///
/// * `'c'`, a single quoted character, gives its code point
/// * `0x` followed by an optionally signed hex number, which may carry a
///   second `0x`/`0X` prefix
/// * a signed decimal, reinterpreted as `u32`
///
/// Parsing stops at the first character that doesn't fit, so garbage reads
/// as 0 and `12ab` as 12. Out of range values wrap.
pub fn parse_number(token: &str) -> u32 {
    if let Some(c) = char_literal(token) {
        return c as u32;
    }

    if let Some(hex) = token.strip_prefix("0x") {
        return signed(hex, 16);
    }

    signed(token, 10)
}

/// Whether a token is meant as a number rather than a label name.
pub fn looks_numeric(token: &str) -> bool {
    matches!(
        token.chars().next(),
        Some('0'..='9' | '-' | '+' | '\'')
    )
}

/// Operand of `syscall`: a name from the syscall table, otherwise a number.
pub fn parse_syscall(token: &str) -> u8 {
    Syscall::from_name(token)
        .map(|s| s.number())
        .unwrap_or_else(|| low_byte(parse_number(token)))
}

pub fn low_byte(value: u32) -> u8 {
    (value & 0xFF) as u8
}

fn char_literal(token: &str) -> Option<char> {
    let inner = token.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn signed(token: &str, radix: u32) -> u32 {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let digits = if radix == 16 {
        digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits)
    } else {
        digits
    };
    let value = leading_digits(digits, radix);

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

fn leading_digits(digits: &str, radix: u32) -> u32 {
    digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0u32, |acc, d| acc.wrapping_mul(radix).wrapping_add(d))
}
