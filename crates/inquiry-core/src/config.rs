use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::id::{IdScheme, DEFAULT_PREFIX};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryConfig {
    #[serde(default)]
    pub ids: IdConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub scheme: IdScheme,

    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}
fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            scheme: IdScheme::default(),
            prefix: default_prefix(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
        }
    }
}

impl InquiryConfig {
    /// Load config from ~/.config/inquiry/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                crate::error::InquiryError::Config(format!("Failed to read config: {e}"))
            })?;
            Self::from_toml(&contents)
        } else {
            let config = InquiryConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Parse config from TOML text; missing keys take their defaults.
    pub fn from_toml(contents: &str) -> crate::error::Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| {
            crate::error::InquiryError::Config(format!("Failed to parse config: {e}"))
        })?;
        config.check()?;
        Ok(config)
    }

    /// The ID prefix ends up in download file names, so it must be a plain name.
    fn check(&self) -> crate::error::Result<()> {
        let prefix = &self.ids.prefix;
        let unsafe_char = |c: char| matches!(c, '/' | '\\') || c.is_control();
        if prefix.is_empty() || prefix.chars().any(unsafe_char) {
            return Err(crate::error::InquiryError::Config(format!(
                "Invalid id prefix '{prefix}': must be non-empty without path separators"
            )));
        }
        Ok(())
    }

    /// Save config to disk.
    pub fn save(&self) -> crate::error::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::InquiryError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::InquiryError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("inquiry").join("config.toml"))
    }

    /// Generate an inquiry ID with the configured scheme and prefix.
    pub fn generate_id(&self) -> String {
        self.ids.scheme.generate(&self.ids.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = InquiryConfig::from_toml("").unwrap();
        assert_eq!(config, InquiryConfig::default());
        assert_eq!(config.ids.scheme, IdScheme::Timestamp);
        assert_eq!(config.ids.prefix, "ASA");
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = InquiryConfig::from_toml(
            r#"
            [ids]
            scheme = "uuid"

            [export]
            download_dir = "/tmp/inquiries"
            "#,
        )
        .unwrap();
        assert_eq!(config.ids.scheme, IdScheme::Uuid);
        assert_eq!(config.ids.prefix, "ASA");
        assert_eq!(config.export.download_dir, PathBuf::from("/tmp/inquiries"));
        assert!(config.generate_id().starts_with("ASA-"));
    }

    #[test]
    fn toml_round_trip() {
        let mut config = InquiryConfig::default();
        config.ids.prefix = "NW".to_string();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(InquiryConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn prefix_with_path_separators_is_rejected() {
        for prefix in ["../x", "a/b", "a\\\\b", ""] {
            let text = format!("[ids]\nprefix = \"{prefix}\"");
            let err = InquiryConfig::from_toml(&text).unwrap_err();
            assert!(matches!(err, crate::error::InquiryError::Config(_)), "{prefix}");
        }
        assert!(InquiryConfig::from_toml("[ids]\nprefix = \"NW\"").is_ok());
    }

    #[test]
    fn bad_scheme_is_config_error() {
        let err = InquiryConfig::from_toml("[ids]\nscheme = \"sequential\"").unwrap_err();
        assert!(matches!(err, crate::error::InquiryError::Config(_)));
    }
}
