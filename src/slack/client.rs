use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{Error, History, HistoryMessage};

/// Read-only client for one channel's history via the Slack Web API.
#[derive(Debug)]
pub(crate) struct SlackClient {
    http: reqwest::Client,
    api_url: String,
    token: SecretString,
    channel: String,
}

#[derive(Deserialize)]
struct ConversationsResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<HistoryMessage>,
}

impl SlackClient {
    pub(crate) fn new(
        api_url: &str,
        token: SecretString,
        channel: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_owned(),
            token,
            channel,
        })
    }

    async fn conversations(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<HistoryMessage>, Error> {
        let response: ConversationsResponse = self
            .http
            .get(format!("{}/{method}", self.api_url))
            .bearer_auth(self.token.expose_secret())
            .query(&[
                ("channel", self.channel.as_str()),
                ("include_all_metadata", "true"),
            ])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !response.ok {
            return Err(Error::Api(
                response.error.unwrap_or_else(|| "unknown_error".to_owned()),
            ));
        }
        Ok(response.messages)
    }
}

impl History for SlackClient {
    async fn history(&self, limit: u32) -> Result<Vec<HistoryMessage>, Error> {
        let limit = limit.to_string();
        self.conversations("conversations.history", &[("limit", limit.as_str())])
            .await
    }

    async fn replies(&self, ts: &str, limit: u32) -> Result<Vec<HistoryMessage>, Error> {
        let limit = limit.to_string();
        self.conversations("conversations.replies", &[("ts", ts), ("limit", limit.as_str())])
            .await
    }
}
