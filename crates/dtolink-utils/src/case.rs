use convert_case::{Case, Casing};

///
/// Identifier case helpers
///
/// Identifiers arrive in whatever convention the descriptor author used
/// (`OrderId`, `orderId`, `order_id`). Matching code compares the snake_case
/// form so the convention never decides a match on its own.
///

/// Normalize an identifier to lowercase snake_case.
#[must_use]
pub fn to_snake(ident: &str) -> String {
    ident.trim().to_case(Case::Snake).to_lowercase()
}

/// Remove a trailing `id` word from a snake_case identifier, if present.
///
/// A bare `id` is left alone; stripping it would leave nothing to compare.
#[must_use]
pub fn strip_id_word(snake: &str) -> Option<&str> {
    snake
        .strip_suffix("_id")
        .filter(|stem| !stem.is_empty() && !stem.ends_with('_'))
}

/// Strip `suffix` from the end of `name`, comparing ASCII case-insensitively.
#[must_use]
pub fn strip_suffix_ignore_ascii_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }

    let (stem, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

/// Number of leading characters two identifiers share.
#[must_use]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
