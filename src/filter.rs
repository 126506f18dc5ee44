use regex::Regex;

use crate::event::PullRequest;

/// Which PRs are worth a notification beyond the default rules.
#[derive(Debug, Default)]
pub(crate) struct FilterConfig {
    /// Repositories (`owner/name`) whose draft PRs notify.
    pub enabled_repos: Vec<String>,
    /// Branch prefixes whose draft PRs notify.
    pub allowed_branch_prefixes: Vec<String>,
    /// Branches matching any of these never notify.
    pub blacklist: Vec<Regex>,
}

impl FilterConfig {
    /// Whether a draft PR should notify: both lists must be configured,
    /// the repository must be enabled and the branch must start with an allowed prefix.
    pub(crate) fn should_notify_draft(&self, pr: &PullRequest) -> bool {
        if self.enabled_repos.is_empty() || self.allowed_branch_prefixes.is_empty() {
            return false;
        }
        if !self.enabled_repos.iter().any(|r| r == pr.repository()) {
            return false;
        }
        let Some(prefix) = self
            .allowed_branch_prefixes
            .iter()
            .find(|p| pr.branch().starts_with(p.as_str()))
        else {
            return false;
        };
        tracing::info!(
            "Draft PR #{} matches filter: repo={}, branch={} (prefix={prefix})",
            pr.number,
            pr.repository(),
            pr.branch(),
        );
        true
    }

    pub(crate) fn is_blacklisted(&self, pr: &PullRequest) -> bool {
        let Some(pattern) = self.blacklist.iter().find(|re| re.is_match(pr.branch())) else {
            return false;
        };
        tracing::info!(
            "PR #{} blacklisted: branch '{}' matches pattern '{pattern}'",
            pr.number,
            pr.branch(),
        );
        true
    }
}

/// Split a comma separated list, trimming items and dropping empty ones.
pub(crate) fn split_and_trim(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Compile blacklist patterns. Invalid patterns are logged and skipped.
pub(crate) fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<Regex> {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => {
                tracing::debug!("Compiled branch blacklist pattern: {pattern}");
                Some(re)
            }
            Err(e) => {
                tracing::warn!("Invalid regex pattern '{pattern}': {e} (skipping)");
                None
            }
        })
        .collect()
}
