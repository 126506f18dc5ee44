use std::fmt::Display;

use crate::constants::{OPENED_HEADER, REVIEW_REQUESTED_HEADER};
use crate::event::{PullRequestAction, PullRequestEvent};
use crate::filter::FilterConfig;

/// What to do with a pull request event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    /// Post a top-level notification.
    Notify(NotifyKind),
    /// Reply in the notification's thread that the PR was merged.
    MergedReply,
    /// React to the notification and schedule it for deletion.
    Rejected,
    Ignore(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotifyKind {
    ReviewRequested,
    Opened,
}

impl NotifyKind {
    pub(crate) fn header(self) -> &'static str {
        match self {
            NotifyKind::ReviewRequested => REVIEW_REQUESTED_HEADER,
            NotifyKind::Opened => OPENED_HEADER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IgnoreReason {
    Blacklisted,
    DraftFiltered,
    Action,
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IgnoreReason::Blacklisted => "branch blacklisted",
            IgnoreReason::DraftFiltered => "draft does not match filter criteria",
            IgnoreReason::Action => "action not handled",
        })
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Notify(kind) => write!(f, "notify: {}", kind.header()),
            Decision::MergedReply => f.write_str("reply in thread: merged"),
            Decision::Rejected => f.write_str("react and schedule deletion: closed without merge"),
            Decision::Ignore(reason) => write!(f, "ignore: {reason}"),
        }
    }
}

/// Pick the single rule that applies to an event. The first matching rule wins,
/// and the branch blacklist is checked before the draft filter.
pub(crate) fn classify(event: &PullRequestEvent, filter: &FilterConfig) -> Decision {
    let pr = &event.pull_request;
    match event.action {
        PullRequestAction::ReviewRequested | PullRequestAction::Opened
            if filter.is_blacklisted(pr) =>
        {
            Decision::Ignore(IgnoreReason::Blacklisted)
        }
        PullRequestAction::ReviewRequested => Decision::Notify(NotifyKind::ReviewRequested),
        PullRequestAction::Opened if !pr.draft => Decision::Notify(NotifyKind::Opened),
        PullRequestAction::Opened if filter.should_notify_draft(pr) => {
            Decision::Notify(NotifyKind::Opened)
        }
        PullRequestAction::Opened => Decision::Ignore(IgnoreReason::DraftFiltered),
        PullRequestAction::Closed if pr.merged => Decision::MergedReply,
        PullRequestAction::Closed => Decision::Rejected,
        PullRequestAction::Other(_) => Decision::Ignore(IgnoreReason::Action),
    }
}
