//! Tool configuration.
//!
//! Settings live in an optional TOML file (`storyblok-hugo.toml` in the working
//! directory unless `--config` says otherwise). The file is sparse: its values
//! are merged over the stock defaults, so it only needs the keys it changes.
//!
//! ```toml
//! [source]
//! endpoint = "http://api.storyblok.com/v1/cdn/stories"
//! fixture = "stories.json"     # read instead of the API in offline mode
//! offline_var = "DEV"          # env var that switches on offline mode
//! fail_on_status = true        # treat non-2xx responses as errors
//!
//! [render]
//! style = "hugo"               # or "legacy"
//! timezone = "utc"             # or "local"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "storyblok-hugo.toml";

/// Full tool configuration. Every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Where story JSON comes from.
    pub source: SourceConfig,
    /// How records turn into markdown.
    pub render: RenderConfig,
}

impl SyncConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.source.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "source.endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }
        if self.source.fixture.is_empty() {
            return Err(ConfigError::Validation(
                "source.fixture must not be empty".into(),
            ));
        }
        if self.source.offline_var.is_empty() {
            return Err(ConfigError::Validation(
                "source.offline_var must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Source reader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// CDN stories endpoint. Token and cache-buster are appended as query params.
    pub endpoint: String,
    /// Local JSON fixture read in offline mode.
    pub fixture: String,
    /// Environment variable that selects offline mode when non-empty.
    pub offline_var: String,
    /// Fail on non-2xx HTTP status instead of decoding whatever came back.
    pub fail_on_status: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://api.storyblok.com/v1/cdn/stories".to_string(),
            fixture: "stories.json".to_string(),
            offline_var: "DEV".to_string(),
            fail_on_status: true,
        }
    }
}

/// Renderer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub style: RenderStyle,
    pub timezone: Timezone,
}

/// Frontmatter flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Escaped scalars and well-formed list literals.
    #[default]
    Hugo,
    /// Byte-for-byte output of the older exporter, including the
    /// single-string `tags` list.
    Legacy,
}

/// Zone used to interpret the offset-less story dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Utc,
    /// The executing machine's local zone.
    Local,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SyncConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SyncConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SyncConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<SyncConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config file. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# storyblok-hugo configuration
# ============================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Source
# ---------------------------------------------------------------------------
[source]
# Storyblok CDN stories endpoint. `token` and a cache-busting `q` timestamp
# are appended as query parameters.
endpoint = "http://api.storyblok.com/v1/cdn/stories"

# JSON file read instead of the API when offline mode is on.
fixture = "stories.json"

# Offline mode is on whenever this environment variable is non-empty.
offline_var = "DEV"

# Treat non-2xx responses as errors. Set to false to decode the response
# body regardless of status.
fail_on_status = true

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[render]
# "hugo": escaped strings, lists as ["a","b"].
# "legacy": unescaped strings, tags collapsed into one string ["a,b"].
style = "hugo"

# Zone for story dates, which carry no offset: "utc" or "local".
timezone = "utc"
"##
}
