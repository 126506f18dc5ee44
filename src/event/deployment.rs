use serde::Deserialize;
use serde_json::{Map, Value};

use crate::constants::{DEPLOY_COMMAND, DEPLOY_EVENT_TYPE, GIT_COMMIT_SHA_KEY};

/// Output of a command run by the deployment runner.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct CommandOutputEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl CommandOutputEvent {
    /// The deployed commit, if this event signals a completed deployment.
    pub(crate) fn deployed_commit(&self) -> Option<&str> {
        if self.kind != DEPLOY_EVENT_TYPE {
            tracing::debug!("Ignoring command output event with type: {}", self.kind);
            return None;
        }
        if self.command != DEPLOY_COMMAND {
            tracing::debug!("Ignoring command: {}", self.command);
            return None;
        }
        let sha = self
            .metadata
            .get(GIT_COMMIT_SHA_KEY)
            .and_then(Value::as_str)
            .filter(|sha| !sha.is_empty());
        if sha.is_none() {
            tracing::debug!("Command output event missing {GIT_COMMIT_SHA_KEY} in metadata");
        }
        sha
    }
}
