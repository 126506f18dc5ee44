use anyhow::{Context, Result};

mod deployment;
mod github;

pub(crate) use deployment::CommandOutputEvent;
pub(crate) use github::{PullRequest, PullRequestAction, PullRequestEvent};

/// A raw message received on one of the subscribed channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Delivery {
    pub channel: String,
    pub payload: String,
}

/// Which subscribed channel carries which kind of event.
#[derive(Debug, Clone)]
pub(crate) struct Routes {
    pub pull_requests: String,
    pub deployments: String,
}

impl Routes {
    pub(crate) fn channels(&self) -> [&str; 2] {
        [&self.pull_requests, &self.deployments]
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Event {
    PullRequest(PullRequestEvent),
    Deployment(CommandOutputEvent),
}

impl Event {
    /// Decode a delivery according to the channel it arrived on.
    /// Deliveries on channels we don't route yield `None`.
    pub(crate) fn decode(delivery: &Delivery, routes: &Routes) -> Result<Option<Self>> {
        let event = if delivery.channel == routes.pull_requests {
            Event::PullRequest(
                serde_json::from_str(&delivery.payload)
                    .context("failed to decode pull request event")?,
            )
        } else if delivery.channel == routes.deployments {
            Event::Deployment(
                serde_json::from_str(&delivery.payload)
                    .context("failed to decode command output event")?,
            )
        } else {
            return Ok(None);
        };
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{routes, PR_REVIEW_REQUESTED};

    use super::*;

    fn delivery(channel: &str, payload: &str) -> Delivery {
        Delivery {
            channel: channel.to_owned(),
            payload: payload.to_owned(),
        }
    }

    #[test]
    fn test_decode_routes_by_channel() {
        let routes = routes();
        let event = Event::decode(&delivery("github-events", PR_REVIEW_REQUESTED), &routes)
            .unwrap()
            .unwrap();
        assert!(matches!(event, Event::PullRequest(e) if e.pull_request.number == 42));

        let payload = r#"{"type": "github-dispatcher", "command": "docker compose up -d"}"#;
        let event = Event::decode(&delivery("poppit:command-output", payload), &routes)
            .unwrap()
            .unwrap();
        assert!(matches!(event, Event::Deployment(e) if e.kind == "github-dispatcher"));
    }

    #[test]
    fn test_decode_unknown_channel() {
        let event = Event::decode(&delivery("elsewhere", "not json"), &routes()).unwrap();
        assert!(event.is_none());
    }

    #[test]
    fn test_decode_invalid_payload() {
        let err = Event::decode(&delivery("github-events", "{"), &routes()).unwrap_err();
        assert_eq!(err.to_string(), "failed to decode pull request event");
    }
}
