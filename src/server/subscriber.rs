use anyhow::{Context, Result};
use futures::{future, Stream, StreamExt};

use crate::event::Delivery;

/// Subscribe to `channels` and stream their messages in arrival order.
pub(super) async fn subscribe(
    client: &redis::Client,
    channels: &[&str],
) -> Result<impl Stream<Item = Delivery>> {
    let mut pubsub = client
        .get_async_pubsub()
        .await
        .context("failed to open Redis pub/sub connection")?;
    for channel in channels {
        pubsub
            .subscribe(*channel)
            .await
            .with_context(|| format!("failed to subscribe to Redis channel '{channel}'"))?;
    }
    tracing::info!("Subscribed to Redis channels: {}", channels.join(", "));

    Ok(pubsub
        .into_on_message()
        .filter_map(|msg| future::ready(to_delivery(&msg))))
}

fn to_delivery(msg: &redis::Msg) -> Option<Delivery> {
    let channel = msg.get_channel_name().to_owned();
    match msg.get_payload::<String>() {
        Ok(payload) => Some(Delivery { channel, payload }),
        Err(e) => {
            tracing::warn!("Dropping unreadable message on '{channel}': {e}");
            None
        }
    }
}
