use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ORG_URL_VAR: &str = "ADO_ORG_URL";
pub const PROJECT_VAR: &str = "ADO_PROJECT";
pub const PAT_VAR: &str = "ADO_PAT";

/// Immutable settings for one run, passed to everything that talks to the service.
#[derive(Clone)]
pub struct BacklogConfig {
    org_url: String,
    project: String,
    pat: SecretString,
}

impl fmt::Debug for BacklogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BacklogConfig")
            .field("org_url", &self.org_url)
            .field("project", &self.project)
            .field("pat", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

impl ConfigError {
    pub fn missing(&self) -> &[&'static str] {
        match self {
            ConfigError::Missing(names) => names,
        }
    }
}

/// Optional `config.toml` supplying values absent from the environment.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub org_url: Option<String>,
    pub project: Option<String>,
    pub pat: Option<String>,
}

impl BacklogConfig {
    pub fn new(
        org_url: impl Into<String>,
        project: impl Into<String>,
        pat: impl Into<String>,
    ) -> Self {
        let org_url: String = org_url.into();
        Self {
            org_url: org_url.trim_end_matches('/').to_string(),
            project: project.into(),
            pat: SecretString::from(pat.into()),
        }
    }

    /// Build from the process environment, falling back to `file` per key.
    pub fn from_env(file: &FileConfig) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), file)
    }

    /// Resolve every required value through `lookup` first, then `file`.
    /// Unset and blank values both count as missing.
    pub fn from_lookup<F>(lookup: F, file: &FileConfig) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |name: &str, fallback: &Option<String>| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| fallback.clone().filter(|v| !v.trim().is_empty()))
        };

        let org_url = resolve(ORG_URL_VAR, &file.org_url);
        let project = resolve(PROJECT_VAR, &file.project);
        let pat = resolve(PAT_VAR, &file.pat);

        match (org_url, project, pat) {
            (Some(org_url), Some(project), Some(pat)) => Ok(Self::new(org_url, project, pat)),
            (org_url, project, pat) => {
                let mut missing = Vec::new();
                if org_url.is_none() {
                    missing.push(ORG_URL_VAR);
                }
                if project.is_none() {
                    missing.push(PROJECT_VAR);
                }
                if pat.is_none() {
                    missing.push(PAT_VAR);
                }
                Err(ConfigError::Missing(missing))
            }
        }
    }

    pub fn org_url(&self) -> &str {
        &self.org_url
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub(crate) fn pat(&self) -> &str {
        self.pat.expose_secret()
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ado-backlog")
        .join("config.toml")
}

pub fn load_file_config() -> Result<FileConfig> {
    load_file_config_from(&config_path())
}

pub fn load_file_config_from(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// The message printed when required settings are absent.
pub fn missing_config_message(err: &ConfigError) -> String {
    let mut msg = String::from("❌ Error: Missing environment variables:\n");
    for name in err.missing() {
        msg.push_str(&format!("   - {name}\n"));
    }
    msg.push_str("\nUsage example:\n");
    msg.push_str(&format!("   export {ORG_URL_VAR}='https://dev.azure.com/MyOrg'\n"));
    msg.push_str(&format!("   export {PROJECT_VAR}='My Project'\n"));
    msg.push_str(&format!("   export {PAT_VAR}='...'\n"));
    msg
}
