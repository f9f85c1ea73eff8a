use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use survey_chapters_engine::{CodecSettings, SiteSettings};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `capitulo_NN.html` / `chapter_NN.html`
    pub chapters_path: PathBuf,
    #[serde(default, skip_serializing_if = "SiteConfig::is_empty")]
    pub site: SiteConfig,
}

/// Overrides for the widget keys and asset paths written into every page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub recaptcha_site_key: Option<String>,
    pub emailjs_public_key: Option<String>,
    pub stylesheet_href: Option<String>,
    pub survey_script_src: Option<String>,
}

impl SiteConfig {
    pub fn is_empty(&self) -> bool {
        self == &SiteConfig::default()
    }

    /// Built-in site settings with any configured values laid over them
    pub fn site_settings(&self) -> SiteSettings {
        let defaults = SiteSettings::default();
        SiteSettings {
            recaptcha_site_key: self
                .recaptcha_site_key
                .clone()
                .unwrap_or(defaults.recaptcha_site_key),
            emailjs_public_key: self
                .emailjs_public_key
                .clone()
                .unwrap_or(defaults.emailjs_public_key),
            stylesheet_href: self
                .stylesheet_href
                .clone()
                .unwrap_or(defaults.stylesheet_href),
            survey_script_src: self
                .survey_script_src
                .clone()
                .unwrap_or(defaults.survey_script_src),
        }
    }
}

impl Config {
    pub fn new(chapters_path: PathBuf) -> Self {
        Self {
            chapters_path,
            site: SiteConfig::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded chapters path
        config.chapters_path =
            Self::expand_path(&config.chapters_path).unwrap_or(config.chapters_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/survey-chapters");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Codec settings for this configuration, with the built-in label defaults
    pub fn codec_settings(&self) -> CodecSettings {
        CodecSettings {
            site: self.site.site_settings(),
            ..CodecSettings::default()
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}
