use crate::{MAX_IDENT_LEN, prelude::*};
use std::collections::BTreeSet;

/// Ensure an identifier is non-empty, ASCII, free of whitespace and within
/// the maximum length.
pub(crate) fn validate_ident(kind: &str, ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err(format!("{kind} name is empty"));
    }
    if ident.len() > MAX_IDENT_LEN {
        return Err(format!(
            "{kind} name '{ident}' exceeds max length {MAX_IDENT_LEN}"
        ));
    }
    if !ident.is_ascii() {
        return Err(format!("{kind} name '{ident}' must be ASCII"));
    }
    if ident.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err(format!(
            "{kind} name '{ident}' must not contain whitespace or commas"
        ));
    }

    Ok(())
}

/// Report every name that appears more than once.
pub(crate) fn validate_unique<'a>(
    kind: &str,
    names: impl IntoIterator<Item = &'a str>,
    errs: &mut ErrorTree,
) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();

    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            err!(errs, "duplicate {kind} '{name}'");
        }
    }
}
