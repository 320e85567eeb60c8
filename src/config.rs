//! Configuration types and loading

use eyre::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::template::TargetKey;

/// Local config file name, looked up in the current directory
pub const LOCAL_CONFIG_NAME: &str = ".templatepatcher.yml";

/// Main templatepatcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Top-level object holding the target key
    pub section: String,

    /// Key inside `section` that receives the script body
    pub key: String,

    /// Script file path
    pub script: Option<PathBuf>,

    /// Template file path
    pub template: Option<PathBuf>,

    /// Output path (defaults to the template path)
    pub output: Option<PathBuf>,

    /// Spaces per indentation level in the written JSON
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            section: crate::DEFAULT_SECTION.to_string(),
            key: crate::DEFAULT_KEY.to_string(),
            script: None,
            template: None,
            output: None,
            indent: crate::DEFAULT_INDENT,
        }
    }
}

/// Fully resolved input and output paths for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub script: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("templatepatcher").join("templatepatcher.yml"));
        }

        Ok(Self::load_first(&candidates))
    }

    /// First candidate that exists and parses, else defaults
    fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => warn!("Failed to load config from {}: {:#}", path.display(), e),
            }
        }

        info!("No config file found, using defaults");
        Self::default()
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Key the script body is written to
    pub fn target(&self) -> TargetKey {
        TargetKey::new(&self.section, &self.key)
    }

    /// Pick each path from the command line, then this config, then the
    /// convention relative to `tool_dir`. Output falls back to the template.
    pub fn resolve_paths(
        &self,
        tool_dir: &Path,
        script: Option<PathBuf>,
        template: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> ResolvedPaths {
        let script = script
            .or_else(|| self.script.clone())
            .unwrap_or_else(|| tool_dir.join(crate::DEFAULT_SCRIPT_NAME));
        let template = template
            .or_else(|| self.template.clone())
            .unwrap_or_else(|| tool_dir.join("..").join(crate::DEFAULT_TEMPLATE_NAME));
        let output = output
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| template.clone());

        ResolvedPaths {
            script,
            template,
            output,
        }
    }
}

/// Directory holding the running executable
pub fn tool_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")))
}
