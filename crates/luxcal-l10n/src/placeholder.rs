//! Positional `$N` placeholder substitution.
//!
//! # Invariants
//!
//! 1. **Single pass**: the template is scanned once, left to right. Text
//!    introduced by a replacement is never rescanned, so a parameter value
//!    containing `$2` stays literal.
//! 2. **Greedy digits**: the whole digit run after `$` forms the index, so
//!    `$12` is placeholder twelve, never placeholder one followed by `2`.
//! 3. **Best effort**: `$0`, indices past the supplied parameters, and `$`
//!    not followed by a digit are copied through unchanged.
//!
//! Markup in the template is opaque; only placeholder tokens are touched.

use std::collections::BTreeSet;

/// Replace every `$i` in `template` with `params[i - 1]`.
///
/// ```
/// use luxcal_l10n::placeholder::substitute;
///
/// assert_eq!(substitute("$1 of $2", &["3", "7"]), "3 of 7");
/// assert_eq!(substitute("costs $5", &["x"]), "costs $5");
/// ```
#[must_use]
pub fn substitute<S: AsRef<str>>(template: &str, params: &[S]) -> String {
    if params.is_empty() || !template.contains('$') {
        return template.to_owned();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        let index = after[..digits]
            .parse::<usize>()
            .ok()
            .filter(|&i| (1..=params.len()).contains(&i));

        match index {
            Some(i) => result.push_str(params[i - 1].as_ref()),
            None => {
                result.push('$');
                result.push_str(&after[..digits]);
            }
        }
        rest = &after[digits..];
    }

    result.push_str(rest);
    result
}

/// Collect the placeholder indices referenced by `template`.
///
/// `$0` is not a placeholder and is skipped.
#[must_use]
pub fn placeholder_indices(template: &str) -> BTreeSet<usize> {
    let mut found = BTreeSet::new();
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        let after = &rest[pos + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        match after[..digits].parse::<usize>() {
            Ok(0) | Err(_) => {}
            Ok(i) => {
                found.insert(i);
            }
        }
        rest = &after[digits..];
    }

    found
}
