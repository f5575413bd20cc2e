//! Row-key construction and token derivation
//!
//! A row key addresses one row in one backing table. Keys are built
//! deterministically from a semantic prefix plus an entity id and optional
//! qualifiers (property, place type, date), joined by [`KEY_DELIMITER`]:
//!
//! ```text
//! {prefix}/{entity}^{qualifier}^{qualifier}...
//! ```
//!
//! Components are escaped so the delimiter never occurs inside a component,
//! which keeps key parsing unambiguous.
//!
//! A *token* is the logical identifier correlating keys across stores to one
//! application entity. Tokens are derived from keys via a token function; the
//! default ([`default_token`]) is identity plus unescaping. Callers that key
//! their result maps by the key body alone can use [`strip_prefix_token`].

use crate::error::{Error, Result};

/// Delimiter joining key components
pub const KEY_DELIMITER: char = '^';

/// Separator between the semantic prefix and the key body
pub const PREFIX_SEPARATOR: char = '/';

/// Escape a key component so it contains no raw delimiter
///
/// `%` is escaped first so unescaping is unambiguous.
pub fn escape_component(component: &str) -> String {
    component.replace('%', "%25").replace(KEY_DELIMITER, "%5E")
}

/// Reverse [`escape_component`]
///
/// Fails with an `InvalidArgument` error on a truncated or unknown escape
/// sequence.
pub fn unescape_component(component: &str) -> Result<String> {
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let hi = chars.next();
        let lo = chars.next();
        match (hi, lo) {
            (Some('2'), Some('5')) => out.push('%'),
            (Some('5'), Some('E')) => out.push(KEY_DELIMITER),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "invalid escape sequence in key component '{}'",
                    component
                )))
            }
        }
    }
    Ok(out)
}

/// Build a row key from a semantic prefix and ordered components
///
/// The first component is the entity id; any further components are
/// qualifiers. Each component is escaped before joining.
pub fn build_row_key(prefix: &str, components: &[&str]) -> String {
    let body = components
        .iter()
        .map(|c| escape_component(c))
        .collect::<Vec<_>>()
        .join(&KEY_DELIMITER.to_string());
    format!("{}{}{}", prefix, PREFIX_SEPARATOR, body)
}

/// Default token function: identity plus unescaping
///
/// The token is the full key with escape sequences resolved. Suitable when
/// every participating store uses identical key layouts.
pub fn default_token(key: &str) -> Result<String> {
    unescape_component(key)
}

/// Build a token function that strips `{prefix}/` and unescapes the remainder
///
/// Fails with `InvalidArgument` when a fetched key does not carry the
/// expected prefix, which indicates a store wired to the wrong key space.
pub fn strip_prefix_token(prefix: &str) -> impl Fn(&str) -> Result<String> + Send + Sync {
    let expected = format!("{}{}", prefix, PREFIX_SEPARATOR);
    move |key: &str| {
        let body = key.strip_prefix(&expected).ok_or_else(|| {
            Error::invalid_argument(format!(
                "key '{}' does not start with expected prefix '{}'",
                key, expected
            ))
        })?;
        unescape_component(body)
    }
}
