// Configuration for Inclusivo: environment first, optional TOML file underneath
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Credentials and endpoint for one suggestion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Startup configuration, built once and handed to the suggestion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub gemini: Option<ProviderConfig>,
    pub groq: Option<ProviderConfig>,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: None,
            groq: None,
            output_dir: PathBuf::from("."),
        }
    }
}

// On-disk layout of config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub gemini: ProviderSection,
    #[serde(default)]
    pub groq: ProviderSection,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderSection {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("inclusivo").join("config.toml"))
}

impl Config {
    /// Load from the process environment, layered over `file` when one is given.
    pub fn from_env(file: Option<&Path>) -> Result<Self> {
        let file_config = match file {
            Some(path) => FileConfig::load(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => FileConfig::load(&path)?,
                _ => FileConfig::default(),
            },
        };
        Ok(Self::resolve(file_config, |key| env::var(key).ok()))
    }

    /// Merge file values with variables from `lookup`; variables win.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let gemini = provider(
            var(&["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"]).or(file.gemini.api_key),
            var(&["GEMINI_MODEL"]).or(file.gemini.model),
            file.gemini.base_url,
            DEFAULT_GEMINI_MODEL,
            DEFAULT_GEMINI_URL,
        );
        let groq = provider(
            var(&["GROQ_API_KEY", "VITE_GROQ_API_KEY"]).or(file.groq.api_key),
            var(&["GROQ_MODEL"]).or(file.groq.model),
            file.groq.base_url,
            DEFAULT_GROQ_MODEL,
            DEFAULT_GROQ_URL,
        );

        let output_dir = var(&["INCLUSIVO_OUTPUT_DIR"])
            .map(PathBuf::from)
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self { gemini, groq, output_dir }
    }

    pub fn configured_providers(&self) -> usize {
        usize::from(self.gemini.is_some()) + usize::from(self.groq.is_some())
    }
}

fn provider(
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    default_model: &str,
    default_url: &str,
) -> Option<ProviderConfig> {
    let api_key = api_key.filter(|k| !k.trim().is_empty())?;
    Some(ProviderConfig {
        api_key,
        model: model.unwrap_or_else(|| default_model.to_string()),
        base_url: base_url
            .unwrap_or_else(|| default_url.to_string())
            .trim_end_matches('/')
            .to_string(),
    })
}
