mod client;
mod messages;

pub(crate) use client::SlackClient;
pub(crate) use messages::{Deletion, HistoryMessage, Metadata, Notification, Reaction};

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("request to Slack timed out")]
    Timeout,
    #[error("request to Slack failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("Slack API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(e)
        }
    }
}

/// Access to the notification channel's message history, newest first.
pub(crate) trait History {
    async fn history(&self, limit: u32) -> Result<Vec<HistoryMessage>, Error>;
    /// Messages in the thread rooted at `ts`, the parent included.
    async fn replies(&self, ts: &str, limit: u32) -> Result<Vec<HistoryMessage>, Error>;
}
