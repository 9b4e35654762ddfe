use log::debug;

/// Numeric value substituted for a standalone rank letter
fn rank_token_value(c: char) -> Option<&'static str> {
    match c.to_ascii_uppercase() {
        'A' => Some("1"),
        'T' => Some("10"),
        'J' => Some("11"),
        'Q' => Some("12"),
        'K' => Some("13"),
        _ => None,
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Replace standalone rank letters (`A`, `T`, `J`, `Q`, `K`, any case) with
/// their card values. A letter touching another word character, digit or dot
/// is part of a larger token and is left alone.
pub fn substitute_ranks(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        let prev_ok = i == 0 || !is_word_char(chars[i - 1]);
        let next_ok = chars.get(i + 1).is_none_or(|&n| !is_word_char(n));
        match rank_token_value(c) {
            Some(value) if prev_ok && next_ok => out.push_str(value),
            _ => out.push(c),
        }
    }

    out
}

/// Full token normalization applied to raw formula text: rank substitution,
/// caret rewritten as `**`, surrounding whitespace trimmed.
pub fn normalize(input: &str) -> String {
    let normalized = substitute_ranks(input).replace('^', "**").trim().to_string();
    debug!("Normalized '{}' to '{}'", input, normalized);
    normalized
}
