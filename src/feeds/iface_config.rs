//! Per-interface user configuration
//!
//! Each interface may carry a small user override file holding a stability
//! policy, extra feed imports and the last-checked timestamp. Two on-disk
//! locations exist: the newer injector-interfaces layout (pretty-escaped
//! names, tried first) and the legacy `user_overrides` layout (fully escaped
//! names). The config is re-read on every lookup; callers cache if needed.

use crate::config::{ConfigManager, CONFIG_PROG, CONFIG_SITE};
use crate::error::{LarderError, LarderResult};
use crate::feeds::escape::{escape, pretty_escape};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, warn};

/// User preference constraining acceptable release stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityPolicy {
    Stable,
    Testing,
    Developer,
}

impl FromStr for StabilityPolicy {
    type Err = LarderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(Self::Stable),
            "testing" => Ok(Self::Testing),
            "developer" => Ok(Self::Developer),
            other => Err(LarderError::UnknownStability(other.to_string())),
        }
    }
}

impl std::fmt::Display for StabilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Stable => "stable",
            Self::Testing => "testing",
            Self::Developer => "developer",
        };
        write!(f, "{name}")
    }
}

/// One user-added feed import, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedImport {
    pub src: String,
    pub os: Option<String>,
    pub machine: Option<String>,
    pub langs: Option<HashSet<String>>,
}

/// Per-interface user overrides, constructed fresh on each load.
#[derive(Debug, Clone, Default)]
pub struct InterfaceConfig {
    pub stability_policy: Option<StabilityPolicy>,
    pub extra_feeds: Vec<FeedImport>,
}

/// On-disk schema. Unknown keys are ignored; `last-checked` lives in the
/// same file but belongs to the override store, not this loader.
#[derive(Debug, Deserialize)]
pub(crate) struct RawInterfaceConfig {
    #[serde(rename = "stability-policy")]
    stability_policy: Option<String>,
    #[serde(default, rename = "feed")]
    feeds: Vec<RawFeed>,
    #[serde(rename = "last-checked")]
    pub(crate) last_checked: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawFeed {
    src: String,
    arch: Option<String>,
    langs: Option<String>,
    #[serde(default, rename = "site-package")]
    site_package: bool,
}

/// Split an `<os>-<machine>` architecture string; `*` means unconstrained.
/// A string with no separator is treated as unconstrained, with a warning.
fn parse_arch(arch: &str) -> (Option<String>, Option<String>) {
    let Some((os, machine)) = arch.split_once('-') else {
        warn!("Malformed arch {arch:?}: expected <os>-<machine>, treating as unconstrained");
        return (None, None);
    };
    let part = |s: &str| {
        if s.is_empty() || s == "*" {
            None
        } else {
            Some(s.to_string())
        }
    };
    (part(os), part(machine))
}

/// Loads per-interface user override files.
pub struct InterfaceConfigLoader {
    config_root: PathBuf,
}

impl InterfaceConfigLoader {
    /// Loader over the default per-user config root
    pub fn new() -> Self {
        Self {
            config_root: ConfigManager::user_config_root(),
        }
    }

    /// Loader over an explicit root (tests)
    pub fn with_root(config_root: PathBuf) -> Self {
        Self { config_root }
    }

    /// Resolve the override file for `uri`: newer layout first, then legacy.
    pub(crate) async fn resolve_path(&self, uri: &str) -> Option<PathBuf> {
        let site = self.config_root.join(CONFIG_SITE);

        let preferred = site
            .join("injector")
            .join("interfaces")
            .join(pretty_escape(uri));
        if fs::metadata(&preferred).await.is_ok() {
            return Some(preferred);
        }

        let legacy = site
            .join(CONFIG_PROG)
            .join("user_overrides")
            .join(escape(uri));
        if fs::metadata(&legacy).await.is_ok() {
            return Some(legacy);
        }

        None
    }

    pub(crate) async fn read_raw(&self, uri: &str) -> LarderResult<Option<RawInterfaceConfig>> {
        let Some(path) = self.resolve_path(uri).await else {
            return Ok(None);
        };

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| LarderError::iface_config(uri, e))?;
        let raw: RawInterfaceConfig =
            toml::from_str(&content).map_err(|e| LarderError::iface_config(uri, e))?;
        Ok(Some(raw))
    }

    /// Load the interface config for `uri`.
    ///
    /// Feeds marked as site packages, and feeds already known to come from
    /// the distribution, contribute nothing. Document order is preserved for
    /// the rest. A missing file is an empty config, not an error; a parse
    /// fault is fatal for this interface and carries its URI.
    pub async fn load(
        &self,
        uri: &str,
        known_site_feeds: &HashSet<String>,
    ) -> LarderResult<InterfaceConfig> {
        let Some(raw) = self.read_raw(uri).await? else {
            debug!("No interface config for {uri}");
            return Ok(InterfaceConfig::default());
        };

        let stability_policy = raw
            .stability_policy
            .as_deref()
            .map(StabilityPolicy::from_str)
            .transpose()
            .map_err(|e| LarderError::iface_config(uri, e))?;

        let mut extra_feeds = Vec::new();
        for feed in raw.feeds {
            if feed.site_package || known_site_feeds.contains(&feed.src) {
                debug!("Skipping site feed {}", feed.src);
                continue;
            }
            let (os, machine) = match feed.arch.as_deref() {
                Some(arch) => parse_arch(arch),
                None => (None, None),
            };
            let langs = feed
                .langs
                .map(|langs| langs.split_whitespace().map(str::to_string).collect());
            extra_feeds.push(FeedImport {
                src: feed.src,
                os,
                machine,
                langs,
            });
        }

        Ok(InterfaceConfig {
            stability_policy,
            extra_feeds,
        })
    }
}

impl Default for InterfaceConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    const URI: &str = "https://example.com/tool.xml";

    fn write_preferred(root: &std::path::Path, uri: &str, content: &str) {
        let dir = root.join(CONFIG_SITE).join("injector").join("interfaces");
        stdfs::create_dir_all(&dir).unwrap();
        stdfs::write(dir.join(pretty_escape(uri)), content).unwrap();
    }

    fn write_legacy(root: &std::path::Path, uri: &str, content: &str) {
        let dir = root.join(CONFIG_SITE).join(CONFIG_PROG).join("user_overrides");
        stdfs::create_dir_all(&dir).unwrap();
        stdfs::write(dir.join(escape(uri)), content).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_empty_config() {
        let temp = TempDir::new().unwrap();
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let config = loader.load(URI, &HashSet::new()).await.unwrap();
        assert!(config.stability_policy.is_none());
        assert!(config.extra_feeds.is_empty());
    }

    #[tokio::test]
    async fn parses_policy_and_feeds_in_order() {
        let temp = TempDir::new().unwrap();
        write_preferred(
            temp.path(),
            URI,
            r#"
                stability-policy = "testing"

                [[feed]]
                src = "https://mirror.test/one.xml"
                arch = "Linux-x86_64"
                langs = "en fr"

                [[feed]]
                src = "https://mirror.test/two.xml"
                arch = "*-*"
            "#,
        );
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let config = loader.load(URI, &HashSet::new()).await.unwrap();
        assert_eq!(config.stability_policy, Some(StabilityPolicy::Testing));
        assert_eq!(config.extra_feeds.len(), 2);

        let first = &config.extra_feeds[0];
        assert_eq!(first.src, "https://mirror.test/one.xml");
        assert_eq!(first.os.as_deref(), Some("Linux"));
        assert_eq!(first.machine.as_deref(), Some("x86_64"));
        let langs = first.langs.as_ref().unwrap();
        assert!(langs.contains("en") && langs.contains("fr"));

        let second = &config.extra_feeds[1];
        assert_eq!(second.os, None);
        assert_eq!(second.machine, None);
        assert_eq!(second.langs, None);
    }

    #[tokio::test]
    async fn arch_without_separator_is_unconstrained() {
        let temp = TempDir::new().unwrap();
        write_preferred(
            temp.path(),
            URI,
            r#"
                [[feed]]
                src = "https://mirror.test/one.xml"
                arch = "Linux"
            "#,
        );
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let config = loader.load(URI, &HashSet::new()).await.unwrap();
        assert_eq!(config.extra_feeds.len(), 1);
        assert_eq!(config.extra_feeds[0].os, None);
        assert_eq!(config.extra_feeds[0].machine, None);
    }

    #[tokio::test]
    async fn site_feeds_are_filtered() {
        let temp = TempDir::new().unwrap();
        write_preferred(
            temp.path(),
            URI,
            r#"
                [[feed]]
                src = "https://mirror.test/site.xml"
                site-package = true

                [[feed]]
                src = "https://mirror.test/known.xml"

                [[feed]]
                src = "https://mirror.test/kept.xml"
            "#,
        );
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let known: HashSet<String> = ["https://mirror.test/known.xml".to_string()].into();
        let config = loader.load(URI, &known).await.unwrap();
        assert_eq!(config.extra_feeds.len(), 1);
        assert_eq!(config.extra_feeds[0].src, "https://mirror.test/kept.xml");
    }

    #[tokio::test]
    async fn unknown_stability_is_fatal_with_uri_context() {
        let temp = TempDir::new().unwrap();
        write_preferred(temp.path(), URI, "stability-policy = \"beta\"\n");
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let err = loader.load(URI, &HashSet::new()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(URI));
        assert!(msg.contains("beta"));
    }

    #[tokio::test]
    async fn malformed_toml_is_fatal_with_uri_context() {
        let temp = TempDir::new().unwrap();
        write_preferred(temp.path(), URI, "not = [valid\n");
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let err = loader.load(URI, &HashSet::new()).await.unwrap_err();
        assert!(err.to_string().contains(URI));
    }

    #[tokio::test]
    async fn preferred_location_shadows_legacy() {
        let temp = TempDir::new().unwrap();
        write_legacy(temp.path(), URI, "stability-policy = \"stable\"\n");
        write_preferred(temp.path(), URI, "stability-policy = \"developer\"\n");
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let config = loader.load(URI, &HashSet::new()).await.unwrap();
        assert_eq!(config.stability_policy, Some(StabilityPolicy::Developer));
    }

    #[tokio::test]
    async fn legacy_location_still_read() {
        let temp = TempDir::new().unwrap();
        write_legacy(temp.path(), URI, "stability-policy = \"stable\"\n");
        let loader = InterfaceConfigLoader::with_root(temp.path().to_path_buf());

        let config = loader.load(URI, &HashSet::new()).await.unwrap();
        assert_eq!(config.stability_policy, Some(StabilityPolicy::Stable));
    }
}
