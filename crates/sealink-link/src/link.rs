//! Share-link fragment protocol
//!
//! A share link is the sender's page address with a fragment carrying two
//! url-safe tokens:
//!
//! ```text
//! https://host/path#d=<package token>&k=<key token>
//! ```
//!
//! Fragments never reach a server, so the key stays between the two
//! browsers (or terminals) holding the link. Parsing is a presence and shape
//! check only. Whether the tokens hold a valid package and key is decided
//! later by the codec and key manager.

use crate::codec::restore_padding;

/// Fragment parameter carrying the serialized package
pub const PACKAGE_PARAM: &str = "d";

/// Fragment parameter carrying the exported key
pub const KEY_PARAM: &str = "k";

/// Tokens extracted from a share fragment, padding restored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTokens {
    /// Serialized package token
    pub package: String,
    /// Exported key token
    pub key: String,
}

/// Strip query and fragment from a location, leaving scheme, host and path
pub fn base_of(location: &str) -> &str {
    match location.find(['?', '#']) {
        Some(idx) => &location[..idx],
        None => location,
    }
}

/// The fragment of a location without its leading `#`, or `""`
pub fn fragment_of(location: &str) -> &str {
    location
        .split_once('#')
        .map(|(_, fragment)| fragment)
        .unwrap_or("")
}

/// Whether `fragment` looks like a share fragment
///
/// True iff both `d=` and `k=` occur somewhere in the text.
pub fn is_share_fragment(fragment: &str) -> bool {
    fragment.contains("d=") && fragment.contains("k=")
}

/// Build a share link from a base URL and the two tokens
///
/// Any query or fragment already present on `base_url` is dropped.
pub fn build(base_url: &str, package_token: &str, key_token: &str) -> String {
    format!(
        "{}#{}={}&{}={}",
        base_of(base_url),
        PACKAGE_PARAM,
        package_token,
        KEY_PARAM,
        key_token
    )
}

/// Extract the package and key tokens from a fragment
///
/// Accepts the fragment with or without its leading `#`, or a full
/// location. Returns `None` unless both markers are present and both
/// parameters carry a non-empty value. Parameters may come in any order and
/// may be surrounded by other `&`-separated parameters; when a parameter
/// repeats, its first occurrence wins.
pub fn parse(fragment: &str) -> Option<LinkTokens> {
    if !is_share_fragment(fragment) {
        return None;
    }

    let fragment = match fragment.split_once('#') {
        Some((_, rest)) => rest,
        None => fragment,
    };

    let mut package = None;
    let mut key = None;

    for pair in fragment.split('&') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        match name {
            PACKAGE_PARAM if package.is_none() => package = Some(value),
            KEY_PARAM if key.is_none() => key = Some(value),
            _ => {}
        }
    }

    match (package, key) {
        (Some(package), Some(key)) if !package.is_empty() && !key.is_empty() => Some(LinkTokens {
            package: restore_padding(package),
            key: restore_padding(key),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_link() {
        let link = build("https://example.com/share", "PKG", "KEY");
        assert_eq!(link, "https://example.com/share#d=PKG&k=KEY");
    }

    #[test]
    fn test_build_strips_existing_query_and_fragment() {
        let link = build("https://example.com/share?tab=1#old", "P", "K");
        assert_eq!(link, "https://example.com/share#d=P&k=K");

        let link = build("https://example.com/share#d=x&k=y", "P", "K");
        assert_eq!(link, "https://example.com/share#d=P&k=K");
    }

    #[test]
    fn test_parse_built_link() {
        let link = build("https://example.com/", "abcd", "efgh");
        let tokens = parse(fragment_of(&link)).unwrap();
        assert_eq!(tokens.package, "abcd");
        assert_eq!(tokens.key, "efgh");

        // Full locations and leading '#' are accepted too
        assert_eq!(parse(&link), Some(tokens.clone()));
        assert_eq!(parse("#d=abcd&k=efgh"), Some(tokens));
    }

    #[test]
    fn test_parse_restores_padding() {
        let tokens = parse("d=abc&k=ab").unwrap();
        assert_eq!(tokens.package, "abc=");
        assert_eq!(tokens.key, "ab==");
    }

    #[test]
    fn test_parse_requires_both_markers() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("#"), None);
        assert_eq!(parse("d=abcd"), None);
        assert_eq!(parse("k=abcd"), None);
        assert_eq!(parse("#d=abcd&x=efgh"), None);
    }

    #[test]
    fn test_parse_any_order_and_extra_params() {
        let tokens = parse("#k=KEY&d=PKG").unwrap();
        assert_eq!(tokens.package, "PKG=");
        assert_eq!(tokens.key, "KEY=");

        let tokens = parse("#utm=1&k=KEY0&foo&d=PKG0&z=9").unwrap();
        assert_eq!(tokens.package, "PKG0");
        assert_eq!(tokens.key, "KEY0");
    }

    #[test]
    fn test_parse_empty_values() {
        assert_eq!(parse("#d=&k=abcd"), None);
        assert_eq!(parse("#d=abcd&k="), None);
    }

    #[test]
    fn test_parse_first_occurrence_wins() {
        let tokens = parse("d=AAAA&k=BBBB&d=CCCC").unwrap();
        assert_eq!(tokens.package, "AAAA");
    }

    #[test]
    fn test_parse_does_not_validate_tokens() {
        // Shape only; garbage tokens are the codec's problem
        let tokens = parse("d=***&k=???").unwrap();
        assert_eq!(tokens.package, "***=");
    }

    #[test]
    fn test_base_and_fragment_helpers() {
        assert_eq!(base_of("https://a.b/c?q=1#f"), "https://a.b/c");
        assert_eq!(base_of("https://a.b/c"), "https://a.b/c");
        assert_eq!(fragment_of("https://a.b/c#d=1&k=2"), "d=1&k=2");
        assert_eq!(fragment_of("https://a.b/c"), "");
    }
}
