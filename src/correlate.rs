use anyhow::{Context, Result};

use crate::constants::{CLOSED_EVENT_TYPE, MERGE_COMMIT_SHA_KEY, NOTIFICATION_EVENT_TYPES};
use crate::slack::{self, History, HistoryMessage};

/// Finds earlier notifications in the channel history.
/// Only the `limit` most recent messages (and replies per thread) are searched.
pub(crate) struct Correlator<H> {
    history: H,
    limit: u32,
}

impl<H: History> Correlator<H> {
    pub(crate) fn new(history: H, limit: u32) -> Self {
        Self { history, limit }
    }

    /// First recent message whose metadata payload has `key` set to the string `value`.
    pub(crate) async fn find_by_metadata(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Option<HistoryMessage>> {
        let Some(messages) = self.recent().await? else {
            return Ok(None);
        };
        Ok(messages.into_iter().find(|msg| {
            msg.metadata.as_ref().is_some_and(|metadata| {
                !metadata.event_type.is_empty() && metadata.payload_str(key) == Some(value)
            })
        }))
    }

    /// The PR notification whose thread holds the merge reply for `sha`.
    pub(crate) async fn find_by_merge_commit(&self, sha: &str) -> Result<Option<HistoryMessage>> {
        let Some(messages) = self.recent().await? else {
            return Ok(None);
        };
        for parent in messages
            .into_iter()
            .filter(|msg| NOTIFICATION_EVENT_TYPES.iter().any(|t| *t == msg.event_type()))
        {
            let replies = match self.history.replies(&parent.ts, self.limit).await {
                Ok(replies) => replies,
                Err(e) => {
                    tracing::warn!("Failed to get replies for message {}: {e}", parent.ts);
                    continue;
                }
            };
            let merged_here = replies.iter().any(|reply| {
                reply.event_type() == CLOSED_EVENT_TYPE
                    && reply
                        .metadata
                        .as_ref()
                        .and_then(|m| m.payload_str(MERGE_COMMIT_SHA_KEY))
                        == Some(sha)
            });
            if merged_here {
                return Ok(Some(parent));
            }
        }
        Ok(None)
    }

    /// Recent channel history. `None` if Slack didn't answer in time.
    async fn recent(&self) -> Result<Option<Vec<HistoryMessage>>> {
        match self.history.history(self.limit).await {
            Ok(messages) => Ok(Some(messages)),
            Err(slack::Error::Timeout) => {
                tracing::warn!("Timed out fetching Slack history, treating as no match");
                Ok(None)
            }
            Err(e) => Err(e).context("failed to search Slack messages"),
        }
    }
}
