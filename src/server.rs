use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::correlate::Correlator;
use crate::outbox::RedisOutbox;
use crate::slack::SlackClient;

mod runner;
mod subscriber;

use runner::Relay;

pub(crate) async fn serve(config: Config) -> Result<()> {
    let Config {
        redis,
        slack,
        routes,
        keys,
        filter,
    } = config;

    let client = redis::Client::open(redis.url()?.as_str())
        .context("invalid Redis connection settings")?;
    let conn = client
        .get_multiplexed_async_connection()
        .await
        .context("failed to connect to Redis")?;
    tracing::info!("Connected to Redis at {}:{}", redis.host, redis.port);

    let history = SlackClient::new(
        &slack.api_url,
        slack.bot_token,
        slack.channel_id.clone(),
        slack.timeout,
    )?;
    tracing::info!("Slack client initialized for channel {}", slack.channel_id);

    let relay = Relay {
        channel_id: slack.channel_id,
        routes,
        filter,
        correlator: Correlator::new(history, slack.search_limit),
        outbox: RedisOutbox::new(conn, keys),
    };

    let deliveries = subscriber::subscribe(&client, &relay.routes.channels()).await?;
    tracing::info!("Waiting for pull request events and command output...");

    tokio::select! {
        () = runner::runner(deliveries, &relay) => bail!("Redis subscription closed"),
        res = shutdown_signal() => {
            res?;
            tracing::info!("Shutting down gracefully...");
        }
    }
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM where available.
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;
    Ok(())
}
