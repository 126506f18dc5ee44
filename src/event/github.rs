use serde::Deserialize;
use std::fmt::Display;

/// A stripped down GitHub `pull_request` webhook event.
/// Fields missing from the payload decode to their empty values.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct PullRequestEvent {
    /// The action this event represents.
    pub action: PullRequestAction,
    /// The pull request this event corresponds to
    pub pull_request: PullRequest,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub(crate) enum PullRequestAction {
    Opened,
    Closed,
    ReviewRequested,
    Other(String),
}

impl Default for PullRequestAction {
    fn default() -> Self {
        PullRequestAction::Other(String::new())
    }
}

impl From<String> for PullRequestAction {
    fn from(action: String) -> Self {
        match action.as_str() {
            "opened" => PullRequestAction::Opened,
            "closed" => PullRequestAction::Closed,
            "review_requested" => PullRequestAction::ReviewRequested,
            _ => PullRequestAction::Other(action),
        }
    }
}

impl PullRequestAction {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            PullRequestAction::Opened => "opened",
            PullRequestAction::Closed => "closed",
            PullRequestAction::ReviewRequested => "review_requested",
            PullRequestAction::Other(action) => action,
        }
    }
}

impl Display for PullRequestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub merged: bool,
    /// `null` until GitHub has computed a test merge
    pub merge_commit_sha: Option<String>,
    pub draft: bool,
    pub user: User,
    pub head: Head,
    pub base: Base,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct User {
    pub login: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Head {
    /// Source branch name
    #[serde(rename = "ref")]
    pub branch: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Base {
    pub repo: Repo,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Repo {
    pub full_name: String,
}

impl PullRequest {
    pub(crate) fn repository(&self) -> &str {
        &self.base.repo.full_name
    }

    pub(crate) fn branch(&self) -> &str {
        &self.head.branch
    }

    pub(crate) fn author(&self) -> &str {
        &self.user.login
    }

    pub(crate) fn merge_commit_sha(&self) -> &str {
        self.merge_commit_sha.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{PR_MERGED, PR_REVIEW_REQUESTED};

    use super::*;

    #[test]
    fn test_deserialize() {
        let event = serde_json::from_str::<PullRequestEvent>(PR_REVIEW_REQUESTED).unwrap();
        assert_eq!(event.action, PullRequestAction::ReviewRequested);
        let pr = event.pull_request;
        assert_eq!(pr.number, 42);
        assert_eq!(pr.repository(), "acme/widgets");
        assert_eq!(pr.branch(), "feature/sprockets");
        assert_eq!(pr.author(), "octocat");
        assert_eq!(pr.html_url, "https://github.com/acme/widgets/pull/42");
        assert!(!pr.draft);
        assert_eq!(pr.merge_commit_sha, None);
    }

    #[test]
    fn test_deserialize_merged() {
        let event = serde_json::from_str::<PullRequestEvent>(PR_MERGED).unwrap();
        assert_eq!(event.action, PullRequestAction::Closed);
        assert!(event.pull_request.merged);
        assert_eq!(
            event.pull_request.merge_commit_sha(),
            "9f2c1e4b7d0a5c3e8f6b1a2d4c7e9f0b3a5d8c1e"
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let event = serde_json::from_str::<PullRequestEvent>(
            r#"{"action": "labeled", "pull_request": {"number": 7, "head": {"ref": "x"}}}"#,
        )
        .unwrap();
        assert_eq!(event.action, PullRequestAction::Other("labeled".to_owned()));
        assert_eq!(event.action.to_string(), "labeled");
        assert_eq!(event.pull_request.number, 7);
        assert_eq!(event.pull_request.branch(), "x");
        assert_eq!(event.pull_request.repository(), "");
    }
}
