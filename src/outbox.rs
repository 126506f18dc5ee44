use anyhow::{Context, Result};
use redis::{aio::MultiplexedConnection, AsyncCommands};
use serde::Serialize;

use crate::slack::{Deletion, Notification, Reaction};

/// Where relay decisions go. Each call emits exactly one record.
pub(crate) trait Outbox {
    async fn push_notification(&self, notification: &Notification) -> Result<()>;
    async fn push_reaction(&self, reaction: &Reaction) -> Result<()>;
    async fn publish_deletion(&self, deletion: &Deletion) -> Result<()>;
}

/// Names of the Redis keys the downstream Slack services consume.
#[derive(Debug, Clone)]
pub(crate) struct OutboxKeys {
    pub notifications_list: String,
    pub reactions_list: String,
    pub deletion_channel: String,
}

pub(crate) struct RedisOutbox {
    conn: MultiplexedConnection,
    keys: OutboxKeys,
}

impl RedisOutbox {
    pub(crate) fn new(conn: MultiplexedConnection, keys: OutboxKeys) -> Self {
        Self { conn, keys }
    }

    async fn rpush<T: Serialize>(&self, list: &str, item: &T) -> Result<()> {
        let json = serde_json::to_string(item).context("failed to encode message")?;
        let mut conn = self.conn.clone();
        let () = conn
            .rpush(list, json)
            .await
            .with_context(|| format!("failed to push message to Redis list '{list}'"))?;
        tracing::info!("Pushed message to Redis list '{list}'");
        Ok(())
    }
}

impl Outbox for RedisOutbox {
    async fn push_notification(&self, notification: &Notification) -> Result<()> {
        self.rpush(&self.keys.notifications_list, notification).await
    }

    async fn push_reaction(&self, reaction: &Reaction) -> Result<()> {
        self.rpush(&self.keys.reactions_list, reaction).await
    }

    async fn publish_deletion(&self, deletion: &Deletion) -> Result<()> {
        let channel = self.keys.deletion_channel.as_str();
        let json = serde_json::to_string(deletion).context("failed to encode deletion request")?;
        let mut conn = self.conn.clone();
        let () = conn
            .publish(channel, json)
            .await
            .with_context(|| format!("failed to publish to Redis channel '{channel}'"))?;
        tracing::info!(
            "Scheduled deletion of {} in {}s via '{channel}'",
            deletion.ts,
            deletion.ttl
        );
        Ok(())
    }
}
