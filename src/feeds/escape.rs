//! Reversible URI-to-filename escaping
//!
//! Two schemes coexist on disk. `escape` is the legacy scheme used for
//! cache `interfaces/` entries: every byte outside `[A-Za-z0-9._-]` becomes
//! `%xx`. `pretty_escape` is the newer scheme used for config paths and
//! check-attempt stamps: it keeps `:` readable and maps `/` to `#`. They are
//! not interchangeable; each has its own inverse. Do not unify them without
//! breaking existing on-disk caches.

use crate::error::{LarderError, LarderResult};

fn is_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-')
}

fn push_hex(out: &mut String, b: u8) {
    out.push('%');
    out.push_str(&format!("{b:02x}"));
}

/// Escape a URI into a filename-safe form (legacy scheme).
pub fn escape(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    for &b in uri.as_bytes() {
        if is_safe(b) {
            out.push(b as char);
        } else {
            push_hex(&mut out, b);
        }
    }
    out
}

/// Invert [`escape`]. Fails on truncated or non-hex `%` sequences and on
/// byte sequences that do not decode as UTF-8.
pub fn unescape(name: &str) -> LarderResult<String> {
    decode(name, |c| c as u8)
}

/// Escape a URI into a readable filename-safe form (newer scheme).
///
/// `https://example.com/feed.xml` becomes `https:##example.com#feed.xml`.
pub fn pretty_escape(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    for &b in uri.as_bytes() {
        if is_safe(b) || b == b':' {
            out.push(b as char);
        } else if b == b'/' {
            out.push('#');
        } else {
            push_hex(&mut out, b);
        }
    }
    out
}

/// Invert [`pretty_escape`].
pub fn pretty_unescape(name: &str) -> LarderResult<String> {
    decode(name, |c| if c == '#' { b'/' } else { c as u8 })
}

fn decode(name: &str, map_plain: impl Fn(char) -> u8) -> LarderResult<String> {
    let mut bytes = Vec::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            let hi = chars.next();
            let lo = chars.next();
            let byte = match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    let hex = format!("{hi}{lo}");
                    u8::from_str_radix(&hex, 16)
                        .map_err(|_| LarderError::MalformedName(name.to_string()))?
                }
                _ => return Err(LarderError::MalformedName(name.to_string())),
            };
            bytes.push(byte);
        } else if c.is_ascii() {
            bytes.push(map_plain(c));
        } else {
            return Err(LarderError::MalformedName(name.to_string()));
        }
    }
    String::from_utf8(bytes).map_err(|_| LarderError::MalformedName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_round_trip() {
        let uri = "https://example.com/feeds/tool.xml?v=1";
        let escaped = escape(uri);
        assert!(!escaped.contains('/'));
        assert!(!escaped.contains(':'));
        assert_eq!(unescape(&escaped).unwrap(), uri);
    }

    #[test]
    fn escape_known_form() {
        assert_eq!(escape("http://a/b"), "http%3a%2f%2fa%2fb");
        assert_eq!(escape("plain-name_1.0"), "plain-name_1.0");
    }

    #[test]
    fn pretty_escape_round_trip() {
        let uri = "https://example.com/feeds/tool.xml";
        let escaped = pretty_escape(uri);
        assert_eq!(escaped, "https:##example.com#feeds#tool.xml");
        assert_eq!(pretty_unescape(&escaped).unwrap(), uri);
    }

    #[test]
    fn pretty_escapes_literal_hash_and_percent() {
        let uri = "https://example.com/a#b%c";
        let escaped = pretty_escape(uri);
        assert_eq!(pretty_unescape(&escaped).unwrap(), uri);
    }

    #[test]
    fn schemes_are_distinct() {
        let uri = "https://example.com/feed";
        assert_ne!(escape(uri), pretty_escape(uri));
    }

    #[test]
    fn unescape_rejects_garbage() {
        assert!(unescape("broken%g1").is_err());
        assert!(unescape("truncated%2").is_err());
    }

    #[test]
    fn non_ascii_round_trip() {
        let uri = "https://example.com/caf\u{e9}";
        assert_eq!(unescape(&escape(uri)).unwrap(), uri);
        assert_eq!(pretty_unescape(&pretty_escape(uri)).unwrap(), uri);
    }
}
