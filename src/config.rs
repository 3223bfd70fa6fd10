//! Tool configuration module.
//!
//! Handles loading and validating `iconsmith.toml`, which supplies defaults
//! for the CLI flags. The file is optional and sparse — specify only the
//! values you want to override:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! kind = "icon"        # icon | iconset | image | imageset
//! platform = "ios"     # ios | watchos | macos | web (device aliases accepted)
//! format = "source"    # bmp | gif | jpeg | png | tiff | source
//! width = "auto"       # @1x width in pixels, or "auto"
//! height = "auto"      # @1x height in pixels, or "auto"
//! quality = 90         # JPEG quality (1-100)
//! strict = false       # fail on undersized icon sources instead of warning
//! output = "assets"    # output directory
//! ```
//!
//! Command-line flags always win over the file. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config filename looked up in the working directory.
pub const CONFIG_FILE: &str = "iconsmith.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// CLI defaults loaded from `iconsmith.toml`.
///
/// Values stay in their CLI string spelling here; alias normalization into
/// the typed enums happens in one place, when the request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub kind: String,
    pub platform: String,
    pub format: String,
    pub width: String,
    pub height: String,
    pub quality: u32,
    pub strict: bool,
    pub output: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            kind: "icon".to_string(),
            platform: "ios".to_string(),
            format: "source".to_string(),
            width: "auto".to_string(),
            height: "auto".to_string(),
            quality: 90,
            strict: false,
            output: "assets".to_string(),
        }
    }
}

impl ToolConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(ConfigError::Validation(format!(
                "quality must be 1-100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Load `iconsmith.toml` from the given directory, falling back to stock
/// defaults when the file is absent.
pub fn load(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ToolConfig::default());
    }
    let raw = fs::read_to_string(&path)?;
    let config: ToolConfig = toml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock config, printed by `iconsmith gen-config`.
pub fn stock_config_toml() -> String {
    r#"# iconsmith configuration. All options are optional; defaults shown.
# Command-line flags override these values.

# Asset kind: icon | iconset | image | imageset
kind = "icon"

# Target platform: ios | watchos | macos | web
# Device aliases (iphone, ipad, watch, mac, osx) are accepted.
platform = "ios"

# Output format: bmp | gif | jpeg | png | tiff | source
# "source" preserves the source file's format. Icon kinds always emit PNG.
format = "source"

# Explicit @1x dimensions in pixels, or "auto".
# Ignored for icon kinds (catalog sizes are fixed by the platform).
width = "auto"
height = "auto"

# JPEG encoding quality (1-100). Lossless formats ignore this.
quality = 90

# Fail when an icon source is smaller than 1024x1024 instead of warning.
strict = false

# Output directory.
output = "assets"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load(tmp.path()).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn sparse_file_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "platform = \"macos\"\nstrict = true\n",
        )
        .unwrap();

        let config = load(tmp.path()).unwrap();
        assert_eq!(config.platform, "macos");
        assert!(config.strict);
        assert_eq!(config.kind, "icon");
        assert_eq!(config.quality, 90);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "platfrom = \"macos\"\n").unwrap();
        assert!(matches!(load(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn out_of_range_quality_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "quality = 101\n").unwrap();
        assert!(matches!(load(tmp.path()), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_parses_back_to_defaults() {
        let config: ToolConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(config, ToolConfig::default());
    }
}
