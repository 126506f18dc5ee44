use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// YAML file with default settings (optional)
    #[arg(long, env, default_value = "config.yaml", global = true)]
    pub(crate) config_file: PathBuf,
    /// DEBUG, INFO, WARN or ERROR [default: INFO]
    #[arg(long, env, global = true)]
    pub(crate) log_level: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Relay pull request events to Slack until interrupted
    Serve(ServeArgs),
    /// Print how a pull request event would be handled
    Classify(ClassifyArgs),
}

#[derive(Args, Default)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    pub(crate) redis: RedisArgs,
    #[command(flatten)]
    pub(crate) slack: SlackArgs,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
}

#[derive(Args, Default)]
pub(crate) struct RedisArgs {
    /// Redis host [default: localhost]
    #[arg(long, env)]
    pub(crate) redis_host: Option<String>,
    /// Redis port [default: 6379]
    #[arg(long, env)]
    pub(crate) redis_port: Option<u16>,
    #[arg(long, env, hide_env_values = true)]
    pub(crate) redis_password: Option<String>,
    /// Channel carrying GitHub pull request events [default: github-events]
    #[arg(long, env)]
    pub(crate) redis_channel: Option<String>,
    /// Channel carrying command output events [default: poppit:command-output]
    #[arg(long, env)]
    pub(crate) poppit_channel: Option<String>,
    /// Channel to publish deletion requests on [default: timebomb-messages]
    #[arg(long, env)]
    pub(crate) timebomb_channel: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct SlackArgs {
    /// Slack channel to notify (required)
    #[arg(long, env)]
    pub(crate) slack_channel_id: Option<String>,
    /// Bot token used to read channel history (required)
    #[arg(long, env, hide_env_values = true)]
    pub(crate) slack_bot_token: Option<String>,
    /// Redis list for outgoing messages [default: slack_messages]
    #[arg(long, env)]
    pub(crate) slack_redis_list: Option<String>,
    /// Redis list for outgoing reactions [default: slack_reactions]
    #[arg(long, env)]
    pub(crate) slack_reactions_list: Option<String>,
    /// How many recent messages to search [default: 100]
    #[arg(long, env)]
    pub(crate) slack_search_limit: Option<u32>,
    /// [default: https://slack.com/api]
    #[arg(long, env)]
    pub(crate) slack_api_url: Option<String>,
    /// Timeout for Slack API requests [default: 10]
    #[arg(long, env)]
    pub(crate) slack_timeout_secs: Option<u64>,
}

#[derive(Args, Default)]
pub(crate) struct FilterArgs {
    /// Comma separated repositories whose draft PRs notify
    #[arg(long, env)]
    pub(crate) draft_notify_repos: Option<String>,
    /// Comma separated branch prefixes whose draft PRs notify
    #[arg(long, env)]
    pub(crate) draft_notify_branch_prefixes: Option<String>,
    /// Comma separated regexes of branches that never notify
    #[arg(long, env)]
    pub(crate) branch_blacklist_patterns: Option<String>,
}

#[derive(Args)]
pub(crate) struct ClassifyArgs {
    /// JSON file containing a pull_request webhook payload
    pub(crate) event: PathBuf,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
}
