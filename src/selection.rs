//! Selection elements: the resolver's record of one chosen component
//!
//! A selection is produced by the resolver and consumed read-only here.
//! This crate only inspects attributes; it never mutates a selection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One chosen component to be checked for installedness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Selection {
    /// Canonical implementation identifier, e.g.
    /// `package:deb:libfoo:1.2-1:amd64`
    pub id: String,

    /// Native package name, when the implementation came from the host's
    /// package manager
    #[serde(default)]
    pub package: Option<String>,

    /// Cheap pre-recorded existence proof: a file whose presence implies
    /// the component is installed
    #[serde(default)]
    pub quick_test_file: Option<PathBuf>,

    /// Expected mtime (integer seconds) of `quick_test_file`; when set,
    /// existence alone is not enough
    #[serde(default)]
    pub quick_test_mtime: Option<i64>,

    /// Architecture the implementation was selected for, e.g. `Linux-x86_64`
    #[serde(default)]
    pub arch: Option<String>,
}

impl Selection {
    /// Build a minimal selection carrying only an id (tests, ad-hoc CLI use)
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            package: None,
            quick_test_file: None,
            quick_test_mtime: None,
            arch: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_attributes() {
        let toml = r#"
            id = "package:deb:foo:1.0:amd64"
            package = "foo"
            quick-test-file = "/usr/bin/foo"
            quick-test-mtime = 1000
        "#;
        let sel: Selection = toml::from_str(toml).unwrap();
        assert_eq!(sel.package.as_deref(), Some("foo"));
        assert_eq!(sel.quick_test_file, Some(PathBuf::from("/usr/bin/foo")));
        assert_eq!(sel.quick_test_mtime, Some(1000));
    }

    #[test]
    fn optional_attributes_default() {
        let sel: Selection = toml::from_str(r#"id = "sha1=abc""#).unwrap();
        assert!(sel.package.is_none());
        assert!(sel.quick_test_file.is_none());
        assert!(sel.quick_test_mtime.is_none());
        assert!(sel.arch.is_none());
    }
}
