use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Configuration file looked up in the working directory when no
/// `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "survey.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `<kind>/<id>.json` questionnaires.
    pub data_dir: PathBuf,
    /// Directory submitted responses are written to.
    pub output_dir: PathBuf,
    /// Stay on the page after a successful submission.
    pub no_redirect: bool,
    pub log_filter: String,
    pub colorful: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            output_dir: PathBuf::from("./responses"),
            no_redirect: false,
            log_filter: "info".into(),
            colorful: true,
        }
    }
}

/// Read settings from `path` (or `survey.toml` if present), then apply
/// environment overrides.
///
/// An explicitly given file must exist; the default one is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => read_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => read_file(Path::new(DEFAULT_CONFIG_FILE))?,
        None => Settings::default(),
    };
    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SURVEY_DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }
    if let Some(v) = var("SURVEY_OUTPUT_DIR") {
        settings.output_dir = PathBuf::from(v);
    }
    if let Some(v) = var("SURVEY_NO_REDIRECT") {
        settings.no_redirect = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
    }
    if let Some(v) = var("SURVEY_LOG") {
        settings.log_filter = v;
    }
}
