use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use serde_json::Value;

use crate::event::{PullRequest, Routes};
use crate::outbox::Outbox;
use crate::slack::{self, Deletion, History, HistoryMessage, Metadata, Notification, Reaction};

pub(crate) const PR_REVIEW_REQUESTED: &str = r#"{
  "action": "review_requested",
  "number": 42,
  "pull_request": {
    "url": "https://api.github.com/repos/acme/widgets/pulls/42",
    "id": 1789012345,
    "html_url": "https://github.com/acme/widgets/pull/42",
    "number": 42,
    "state": "open",
    "locked": false,
    "title": "Add sprocket support",
    "user": {"login": "octocat", "id": 583231, "type": "User"},
    "body": "Adds sprockets.",
    "merged": false,
    "merge_commit_sha": null,
    "draft": false,
    "head": {
      "label": "acme:feature/sprockets",
      "ref": "feature/sprockets",
      "sha": "cc6d6ea741ff6c35df3747a95c4869cc3ed5f84e"
    },
    "base": {
      "label": "acme:main",
      "ref": "main",
      "sha": "a4786471ee4d4e894fec150e426c3551db0f31e0",
      "repo": {"id": 123456, "name": "widgets", "full_name": "acme/widgets"}
    }
  },
  "requested_reviewer": {"login": "hubot"},
  "repository": {"id": 123456, "name": "widgets", "full_name": "acme/widgets"},
  "sender": {"login": "octocat"}
}"#;

pub(crate) const PR_MERGED: &str = r#"{
  "action": "closed",
  "number": 42,
  "pull_request": {
    "html_url": "https://github.com/acme/widgets/pull/42",
    "number": 42,
    "state": "closed",
    "title": "Add sprocket support",
    "user": {"login": "octocat"},
    "merged": true,
    "merge_commit_sha": "9f2c1e4b7d0a5c3e8f6b1a2d4c7e9f0b3a5d8c1e",
    "draft": false,
    "head": {"ref": "feature/sprockets"},
    "base": {"ref": "main", "repo": {"full_name": "acme/widgets"}}
  }
}"#;

pub(crate) fn routes() -> Routes {
    Routes {
        pull_requests: "github-events".to_owned(),
        deployments: "poppit:command-output".to_owned(),
    }
}

pub(crate) fn pull_request(repo: &str, branch: &str, draft: bool) -> PullRequest {
    let mut pr = PullRequest {
        number: 1,
        draft,
        ..PullRequest::default()
    };
    pr.base.repo.full_name = repo.to_owned();
    pr.head.branch = branch.to_owned();
    pr
}

pub(crate) fn history_message(ts: &str, metadata: Option<(&str, Value)>) -> HistoryMessage {
    HistoryMessage {
        ts: ts.to_owned(),
        thread_ts: None,
        metadata: metadata.map(|(event_type, payload)| Metadata::new(event_type, payload)),
    }
}

enum Failure {
    Timeout,
    Api(String),
}

/// In-memory channel history.
pub(crate) struct FakeHistory {
    messages: Vec<HistoryMessage>,
    replies: HashMap<String, Vec<HistoryMessage>>,
    failure: Option<Failure>,
    limits: Mutex<Vec<u32>>,
}

impl FakeHistory {
    pub(crate) fn new(messages: Vec<HistoryMessage>) -> Self {
        Self {
            messages,
            replies: HashMap::new(),
            failure: None,
            limits: Mutex::default(),
        }
    }

    pub(crate) fn with_replies(mut self, ts: &str, replies: Vec<HistoryMessage>) -> Self {
        self.replies.insert(ts.to_owned(), replies);
        self
    }

    pub(crate) fn timing_out(mut self) -> Self {
        self.failure = Some(Failure::Timeout);
        self
    }

    pub(crate) fn failing(mut self, error: &str) -> Self {
        self.failure = Some(Failure::Api(error.to_owned()));
        self
    }

    /// Limits passed to `history`, in call order.
    pub(crate) fn requested_limits(&self) -> Vec<u32> {
        self.limits.lock().unwrap().clone()
    }
}

impl History for FakeHistory {
    async fn history(&self, limit: u32) -> Result<Vec<HistoryMessage>, slack::Error> {
        self.limits.lock().unwrap().push(limit);
        match &self.failure {
            Some(Failure::Timeout) => Err(slack::Error::Timeout),
            Some(Failure::Api(e)) => Err(slack::Error::Api(e.clone())),
            None => Ok(self
                .messages
                .iter()
                .take(limit as usize)
                .cloned()
                .collect()),
        }
    }

    async fn replies(&self, ts: &str, _limit: u32) -> Result<Vec<HistoryMessage>, slack::Error> {
        Ok(self.replies.get(ts).cloned().unwrap_or_default())
    }
}

/// Records everything emitted, in order.
#[derive(Default)]
pub(crate) struct RecordingOutbox {
    notifications: Mutex<Vec<Notification>>,
    reactions: Mutex<Vec<Reaction>>,
    deletions: Mutex<Vec<Deletion>>,
    broken: bool,
}

impl RecordingOutbox {
    pub(crate) fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub(crate) fn reactions(&self) -> Vec<Reaction> {
        self.reactions.lock().unwrap().clone()
    }

    pub(crate) fn deletions(&self) -> Vec<Deletion> {
        self.deletions.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.broken {
            bail!("connection refused");
        }
        Ok(())
    }
}

impl Outbox for RecordingOutbox {
    async fn push_notification(&self, notification: &Notification) -> Result<()> {
        self.check()?;
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn push_reaction(&self, reaction: &Reaction) -> Result<()> {
        self.check()?;
        self.reactions.lock().unwrap().push(reaction.clone());
        Ok(())
    }

    async fn publish_deletion(&self, deletion: &Deletion) -> Result<()> {
        self.check()?;
        self.deletions.lock().unwrap().push(deletion.clone());
        Ok(())
    }
}
