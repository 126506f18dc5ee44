pub(crate) const REVIEW_REQUESTED_HEADER: &str = "👀 Review Requested for Pull Request!";
pub(crate) const OPENED_HEADER: &str = "🚀 New Pull Request Opened!";

/// Metadata event type carried by merge replies, and looked up by deployments.
pub(crate) const CLOSED_EVENT_TYPE: &str = "closed";
/// Metadata event types of top-level PR notifications.
pub(crate) const NOTIFICATION_EVENT_TYPES: [&str; 2] = ["review_requested", "opened"];

pub(crate) const PR_URL_KEY: &str = "pr_url";
pub(crate) const MERGE_COMMIT_SHA_KEY: &str = "merge_commit_sha";
pub(crate) const GIT_COMMIT_SHA_KEY: &str = "git_commit_sha";

pub(crate) const REJECTED_REACTION: &str = "x";
pub(crate) const DEPLOYED_REACTION: &str = "package";
/// Rejected PR notifications are deleted after an hour.
pub(crate) const REJECTED_TTL_SECS: u64 = 3600;

pub(crate) const DEPLOY_EVENT_TYPE: &str = "github-dispatcher";
pub(crate) const DEPLOY_COMMAND: &str = "docker compose up -d";

pub(crate) const SHORT_SHA_LEN: usize = 7;

pub(crate) fn short_sha(sha: &str) -> &str {
    sha.get(..SHORT_SHA_LEN).unwrap_or(sha)
}
