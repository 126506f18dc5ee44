use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Defaults read from the optional YAML config file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub redis: RedisSection,
    pub slack: SlackSection,
    pub poppit: ChannelSection,
    pub timebomb: ChannelSection,
    pub logging: LoggingSection,
    pub draft_pr_filter: DraftFilterSection,
    pub branch_blacklist: BlacklistSection,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RedisSection {
    pub host: Option<String>,
    pub port: Option<Port>,
    pub channel: Option<String>,
}

/// Ports may be written quoted or bare.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub(crate) enum Port {
    Number(u16),
    Text(String),
}

impl Port {
    pub(crate) fn parse(&self) -> Result<u16> {
        match self {
            Port::Number(port) => Ok(*port),
            Port::Text(port) => port
                .trim()
                .parse()
                .with_context(|| format!("invalid Redis port {port:?}")),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct SlackSection {
    pub channel_id: Option<String>,
    pub redis_list: Option<String>,
    pub reactions_list: Option<String>,
    pub search_limit: Option<u32>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct ChannelSection {
    pub channel: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct LoggingSection {
    pub level: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct DraftFilterSection {
    pub enabled_repos: Vec<String>,
    pub allowed_branch_prefixes: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct BlacklistSection {
    pub patterns: Vec<String>,
}

impl FileConfig {
    /// Read the config file. A missing file is `Ok(None)`.
    pub(crate) fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        Self::parse(&contents)
            .map(Some)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub(crate) fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
