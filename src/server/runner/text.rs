use anyhow::Result;
use askama::Template;

use crate::classify::NotifyKind;
use crate::event::PullRequest;

#[derive(Template)]
#[template(path = "notification.txt.j2", escape = "none")]
struct NotificationText<'a> {
    header: &'a str,
    pr: &'a PullRequest,
}

/// Slack mrkdwn body of a top-level PR notification.
pub(super) fn notification(kind: NotifyKind, pr: &PullRequest) -> Result<String> {
    Ok(NotificationText {
        header: kind.header(),
        pr,
    }
    .render()?)
}

pub(super) fn merged(short_sha: &str) -> String {
    format!("✅ Pull Request merged! Commit: {short_sha}")
}

#[cfg(test)]
mod tests {
    use crate::fixtures::pull_request;

    use super::*;

    #[test]
    fn test_notification_review_requested() {
        let mut pr = pull_request("acme/widgets", "feature/sprockets", false);
        pr.number = 42;
        pr.title = "Add <sprockets> & gears".to_owned();
        pr.user.login = "octocat".to_owned();
        pr.html_url = "https://github.com/acme/widgets/pull/42".to_owned();

        let text = notification(NotifyKind::ReviewRequested, &pr).unwrap();
        assert!(text.starts_with("👀 Review Requested for Pull Request!\n\n"));
        assert!(text.contains("*Repository:* acme/widgets\n"));
        // titles are passed through verbatim
        assert!(text.contains("*PR #42:* Add <sprockets> & gears\n"));
        assert!(text.contains("*Author:* octocat\n"));
        assert!(text.contains("*Branch:* feature/sprockets\n"));
        assert!(text.contains("*Link:* <https://github.com/acme/widgets/pull/42|View PR>"));
    }

    #[test]
    fn test_notification_opened() {
        let pr = pull_request("acme/widgets", "feature/sprockets", false);
        let text = notification(NotifyKind::Opened, &pr).unwrap();
        assert!(text.starts_with("🚀 New Pull Request Opened!\n\n"));
    }

    #[test]
    fn test_merged() {
        assert_eq!(merged("9f2c1e4"), "✅ Pull Request merged! Commit: 9f2c1e4");
    }
}
