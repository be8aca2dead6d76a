use anyhow::{Context, Result};
use chrono::NaiveDate;
use graph::render::{DEFAULT_ISSUE_BASE_URL, DEFAULT_ISSUE_PATTERN, DEFAULT_SUBJECT_WIDTH};
use graph::{ExtractOptions, RenderOptions};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Looked up in the repository directory when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "gitup-report.toml";

/// Report settings, all optional in the configuration file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Commits authored before this day are ignored
    pub since: NaiveDate,
    pub issue_base_url: String,
    pub issue_pattern: String,
    pub branch_pattern: String,
    pub tag_pattern: String,
    pub subject_width: usize,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            since: ExtractOptions::default_cutoff().date(),
            issue_base_url: DEFAULT_ISSUE_BASE_URL.to_string(),
            issue_pattern: DEFAULT_ISSUE_PATTERN.to_string(),
            branch_pattern: ExtractOptions::DEFAULT_BRANCH_PATTERN.to_string(),
            tag_pattern: ExtractOptions::DEFAULT_TAG_PATTERN.to_string(),
            subject_width: DEFAULT_SUBJECT_WIDTH,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ReportConfig {
    /// Load `explicit` if given, else `gitup-report.toml` from the repository
    /// if present, else the defaults
    pub fn load(explicit: Option<&Path>, repo: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = repo.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::from_file(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn extract_options(&self) -> Result<ExtractOptions> {
        let ignore_before = self
            .since
            .and_hms_opt(0, 0, 0)
            .context("Invalid cutoff date")?;
        Ok(ExtractOptions {
            ignore_before,
            branch_pattern: compile("branch_pattern", &self.branch_pattern)?,
            tag_pattern: compile("tag_pattern", &self.tag_pattern)?,
        })
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            issue_base_url: self.issue_base_url.clone(),
            issue_pattern: compile("issue_pattern", &self.issue_pattern)?,
            subject_width: self.subject_width,
        })
    }
}

fn compile(key: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid {} {:?}", key, pattern))
}
