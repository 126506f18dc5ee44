//! Startup configuration.
//!
//! Every setting is resolved once, in this order of precedence:
//! command line flag or environment variable, then the YAML config file,
//! then the built-in default. Empty values count as unset. List settings
//! given on the command line or in the environment replace the file's list.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::cli::{FilterArgs, RedisArgs, ServeArgs, SlackArgs};
use crate::event::Routes;
use crate::filter::{compile_patterns, split_and_trim, FilterConfig};
use crate::outbox::OutboxKeys;

mod file;

pub(crate) use file::FileConfig;

const DEFAULT_REDIS_HOST: &str = "localhost";
const DEFAULT_REDIS_PORT: u16 = 6379;
const DEFAULT_PR_CHANNEL: &str = "github-events";
const DEFAULT_DEPLOY_CHANNEL: &str = "poppit:command-output";
const DEFAULT_DELETION_CHANNEL: &str = "timebomb-messages";
const DEFAULT_NOTIFICATIONS_LIST: &str = "slack_messages";
const DEFAULT_REACTIONS_LIST: &str = "slack_reactions";
const DEFAULT_SEARCH_LIMIT: u32 = 100;
const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
const DEFAULT_SLACK_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub(crate) struct Config {
    pub redis: RedisConfig,
    pub slack: SlackConfig,
    pub routes: Routes,
    pub keys: OutboxKeys,
    pub filter: FilterConfig,
}

#[derive(Debug)]
pub(crate) struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<SecretString>,
}

#[derive(Debug)]
pub(crate) struct SlackConfig {
    pub channel_id: String,
    pub bot_token: SecretString,
    pub search_limit: u32,
    pub api_url: String,
    pub timeout: Duration,
}

impl RedisConfig {
    pub(crate) fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("redis://{}:{}/", self.host, self.port))
            .with_context(|| format!("invalid Redis host {:?}", self.host))?;
        if let Some(password) = &self.password {
            url.set_password(Some(password.expose_secret()))
                .map_err(|()| anyhow!("cannot use a password with Redis host {}", self.host))?;
        }
        Ok(url)
    }
}

impl Config {
    pub(crate) fn resolve(args: ServeArgs, file: &FileConfig) -> Result<Self> {
        let ServeArgs {
            redis,
            slack,
            filter,
        } = args;
        let routes = Routes {
            pull_requests: pick(redis.redis_channel.clone(), &file.redis.channel, DEFAULT_PR_CHANNEL),
            deployments: pick(redis.poppit_channel.clone(), &file.poppit.channel, DEFAULT_DEPLOY_CHANNEL),
        };
        let keys = OutboxKeys {
            notifications_list: pick(
                slack.slack_redis_list.clone(),
                &file.slack.redis_list,
                DEFAULT_NOTIFICATIONS_LIST,
            ),
            reactions_list: pick(
                slack.slack_reactions_list.clone(),
                &file.slack.reactions_list,
                DEFAULT_REACTIONS_LIST,
            ),
            deletion_channel: pick(
                redis.timebomb_channel.clone(),
                &file.timebomb.channel,
                DEFAULT_DELETION_CHANNEL,
            ),
        };
        let config = Config {
            redis: resolve_redis(redis, file)?,
            slack: resolve_slack(slack, file)?,
            routes,
            keys,
            filter: resolve_filter(&filter, file),
        };
        tracing::info!(
            "Configuration loaded: Redis={}:{}, Channel={}, SlackList={}",
            config.redis.host,
            config.redis.port,
            config.routes.pull_requests,
            config.keys.notifications_list,
        );
        Ok(config)
    }
}

fn resolve_redis(args: RedisArgs, file: &FileConfig) -> Result<RedisConfig> {
    let port = match (args.redis_port, &file.redis.port) {
        (Some(port), _) => port,
        (None, Some(port)) => port.parse()?,
        (None, None) => DEFAULT_REDIS_PORT,
    };
    Ok(RedisConfig {
        host: pick(args.redis_host, &file.redis.host, DEFAULT_REDIS_HOST),
        port,
        password: non_empty(args.redis_password).map(SecretString::from),
    })
}

fn resolve_slack(args: SlackArgs, file: &FileConfig) -> Result<SlackConfig> {
    let Some(channel_id) = non_empty(args.slack_channel_id).or_else(|| non_empty(file.slack.channel_id.clone())) else {
        bail!("SLACK_CHANNEL_ID must be set via config file or environment variable");
    };
    let bot_token = match non_empty(args.slack_bot_token) {
        Some(token) => SecretString::from(token),
        None => bot_token_credential()
            .context("SLACK_BOT_TOKEN environment variable is required")?,
    };
    let search_limit = args
        .slack_search_limit
        .or(file.slack.search_limit)
        .filter(|&limit| limit > 0)
        .unwrap_or(DEFAULT_SEARCH_LIMIT);
    let timeout_secs = args
        .slack_timeout_secs
        .or(file.slack.timeout_secs)
        .filter(|&secs| secs > 0)
        .unwrap_or(DEFAULT_SLACK_TIMEOUT_SECS);
    Ok(SlackConfig {
        channel_id,
        bot_token,
        search_limit,
        api_url: pick(args.slack_api_url, &file.slack.api_url, DEFAULT_SLACK_API_URL),
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// If the token has not been passed via CLI or env, get it as a credential.
#[cfg(target_os = "linux")]
fn bot_token_credential() -> Result<SecretString> {
    crate::utils::get_credential("slack_bot_token")
}

#[cfg(not(target_os = "linux"))]
fn bot_token_credential() -> Result<SecretString> {
    bail!("no bot token given")
}

pub(crate) fn resolve_filter(args: &FilterArgs, file: &FileConfig) -> FilterConfig {
    let list = |arg: &Option<String>, from_file: &Vec<String>| match arg.as_deref() {
        Some(csv) if !csv.is_empty() => split_and_trim(csv),
        _ => from_file.clone(),
    };
    FilterConfig {
        enabled_repos: list(&args.draft_notify_repos, &file.draft_pr_filter.enabled_repos),
        allowed_branch_prefixes: list(
            &args.draft_notify_branch_prefixes,
            &file.draft_pr_filter.allowed_branch_prefixes,
        ),
        blacklist: compile_patterns(&list(
            &args.branch_blacklist_patterns,
            &file.branch_blacklist.patterns,
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn pick(arg: Option<String>, from_file: &Option<String>, default: &str) -> String {
    non_empty(arg)
        .or_else(|| non_empty(from_file.clone()))
        .unwrap_or_else(|| default.to_owned())
}
