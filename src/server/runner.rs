use std::pin::pin;

use anyhow::Result;
use futures::{Stream, StreamExt};
use serde_json::json;
use tracing::Instrument;

use crate::classify::{classify, Decision, NotifyKind};
use crate::constants::{
    short_sha, CLOSED_EVENT_TYPE, DEPLOYED_REACTION, PR_URL_KEY, REJECTED_REACTION,
    REJECTED_TTL_SECS,
};
use crate::correlate::Correlator;
use crate::event::{CommandOutputEvent, Delivery, Event, PullRequest, PullRequestEvent, Routes};
use crate::filter::FilterConfig;
use crate::outbox::Outbox;
use crate::slack::{Deletion, History, HistoryMessage, Metadata, Notification, Reaction};

mod text;

/// How handling a single event ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Ignored,
    Emitted,
    /// No earlier notification to correlate with, so nothing was emitted.
    Unmatched,
}

/// Everything needed to turn deliveries into Slack-bound records.
pub(crate) struct Relay<H, O> {
    /// Slack channel notifications go to and are looked up in
    pub channel_id: String,
    pub routes: Routes,
    pub filter: FilterConfig,
    pub correlator: Correlator<H>,
    pub outbox: O,
}

/// Handle deliveries one at a time until the stream ends.
/// A failing event is logged and dropped.
pub(crate) async fn runner<S, H, O>(deliveries: S, relay: &Relay<H, O>)
where
    S: Stream<Item = Delivery>,
    H: History,
    O: Outbox,
{
    let mut deliveries = pin!(deliveries);
    while let Some(delivery) = deliveries.next().await {
        let span = tracing::info_span!("handle_event", channel = %delivery.channel);
        match relay.handle(&delivery).instrument(span).await {
            Ok(outcome) => tracing::debug!("Handled event on '{}': {outcome:?}", delivery.channel),
            Err(error) => tracing::warn!("Error handling event on '{}': {error:#}", delivery.channel),
        }
    }
}

impl<H: History, O: Outbox> Relay<H, O> {
    pub(crate) async fn handle(&self, delivery: &Delivery) -> Result<Outcome> {
        match Event::decode(delivery, &self.routes)? {
            Some(Event::PullRequest(event)) => self.handle_pull_request(&event).await,
            Some(Event::Deployment(event)) => self.handle_deployment(&event).await,
            None => {
                tracing::debug!("Received message on unrouted channel '{}'", delivery.channel);
                Ok(Outcome::Ignored)
            }
        }
    }

    async fn handle_pull_request(&self, event: &PullRequestEvent) -> Result<Outcome> {
        let pr = &event.pull_request;
        match classify(event, &self.filter) {
            Decision::Notify(kind) => self.notify(kind, event).await,
            Decision::MergedReply => self.merged(pr).await,
            Decision::Rejected => self.rejected(pr).await,
            Decision::Ignore(reason) => {
                tracing::debug!(
                    "Ignoring {} event for PR #{} ({reason}; merged: {}, draft: {})",
                    event.action,
                    pr.number,
                    pr.merged,
                    pr.draft,
                );
                Ok(Outcome::Ignored)
            }
        }
    }

    async fn notify(&self, kind: NotifyKind, event: &PullRequestEvent) -> Result<Outcome> {
        let pr = &event.pull_request;
        tracing::info!("Processing {} event for PR #{}", event.action, pr.number);
        let notification = Notification {
            channel: self.channel_id.clone(),
            text: text::notification(kind, pr)?,
            thread_ts: None,
            metadata: Some(Metadata::new(
                event.action.as_str(),
                json!({
                    "pr_number": pr.number,
                    "repository": pr.repository(),
                    "pr_url": pr.html_url,
                    "author": pr.author(),
                    "branch": pr.branch(),
                }),
            )),
        };
        self.outbox.push_notification(&notification).await?;
        Ok(Outcome::Emitted)
    }

    async fn merged(&self, pr: &PullRequest) -> Result<Outcome> {
        let sha = pr.merge_commit_sha();
        tracing::info!(
            "Processing closed (merged) event for PR #{} with merge commit {sha}",
            pr.number
        );
        let Some(parent) = self.find_notification(pr).await? else {
            return Ok(Outcome::Unmatched);
        };
        let reply = Notification {
            channel: self.channel_id.clone(),
            text: text::merged(short_sha(sha)),
            thread_ts: Some(parent.ts),
            metadata: Some(Metadata::new(
                CLOSED_EVENT_TYPE,
                json!({ "merge_commit_sha": sha }),
            )),
        };
        self.outbox.push_notification(&reply).await?;
        Ok(Outcome::Emitted)
    }

    async fn rejected(&self, pr: &PullRequest) -> Result<Outcome> {
        tracing::info!("Processing closed (rejected) event for PR #{}", pr.number);
        let Some(parent) = self.find_notification(pr).await? else {
            return Ok(Outcome::Unmatched);
        };
        self.outbox
            .push_reaction(&Reaction {
                reaction: REJECTED_REACTION.to_owned(),
                channel: self.channel_id.clone(),
                ts: parent.ts.clone(),
            })
            .await?;
        self.outbox
            .publish_deletion(&Deletion {
                channel: self.channel_id.clone(),
                ts: parent.ts,
                ttl: REJECTED_TTL_SECS,
            })
            .await?;
        Ok(Outcome::Emitted)
    }

    async fn handle_deployment(&self, event: &CommandOutputEvent) -> Result<Outcome> {
        let Some(sha) = event.deployed_commit() else {
            return Ok(Outcome::Ignored);
        };
        tracing::info!("Processing deployment of commit {sha}");
        tracing::debug!("Deployment output: {}", event.output.trim_end());
        let Some(parent) = self.correlator.find_by_merge_commit(sha).await? else {
            tracing::warn!("No matching Slack message found for commit SHA: {sha}");
            return Ok(Outcome::Unmatched);
        };
        tracing::debug!("Found matching parent message with ts: {}", parent.ts);
        self.outbox
            .push_reaction(&Reaction {
                reaction: DEPLOYED_REACTION.to_owned(),
                channel: self.channel_id.clone(),
                ts: parent.ts,
            })
            .await?;
        Ok(Outcome::Emitted)
    }

    async fn find_notification(&self, pr: &PullRequest) -> Result<Option<HistoryMessage>> {
        let found = self
            .correlator
            .find_by_metadata(PR_URL_KEY, &pr.html_url)
            .await?;
        match &found {
            Some(msg) => tracing::debug!("Found matching message with ts: {}", msg.ts),
            None => tracing::warn!("No matching Slack message found for PR URL: {}", pr.html_url),
        }
        Ok(found)
    }
}
