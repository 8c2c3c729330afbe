//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{MergePrCall, MockPlatformService};

use pr_automerge::config::AutomationConfig;
use pr_automerge::error::{Error, Result};
use pr_automerge::notify::{Notification, NotificationLevel, NotificationSink, Notifier};
use pr_automerge::types::{
    MergeableState, PlatformConfig, PrState, PullRequestDetails, Review, ReviewState,
};
use std::sync::{Arc, Mutex};

/// Platform config for a test repository
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        host: None,
    }
}

/// An open, non-draft, clean PR with no labels
pub fn make_pr(number: u64, title: &str) -> PullRequestDetails {
    PullRequestDetails {
        number,
        title: title.to_string(),
        state: PrState::Open,
        merged: false,
        is_draft: false,
        mergeable_state: MergeableState::Clean,
        labels: vec![],
    }
}

/// A review by `author`
pub fn review(author: &str, state: ReviewState) -> Review {
    Review::new(author, state)
}

/// Config with defaults, a token and a repository
pub fn test_config() -> AutomationConfig {
    AutomationConfig {
        token: Some("test-token".to_string()),
        repository: Some("octo/widgets".to_string()),
        ..AutomationConfig::default()
    }
}

/// Sink that keeps every notification in memory
#[derive(Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<(NotificationLevel, String)>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn contains(&self, level: NotificationLevel, fragment: &str) -> bool {
        self.messages()
            .iter()
            .any(|(l, m)| *l == level && m.contains(fragment))
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        self.notifications
            .lock()
            .unwrap()
            .push((notification.level, notification.message.clone()));
        Ok(())
    }
}

/// Sink that fails for messages containing a marker
pub struct FailingSink {
    pub marker: String,
}

impl NotificationSink for FailingSink {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        if notification.message.contains(&self.marker) {
            Err(Error::Notification(format!(
                "cannot deliver {:?}",
                notification.message
            )))
        } else {
            Ok(())
        }
    }
}

/// Enabled notifier backed by a recording sink
pub fn recording_notifier() -> (Notifier, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (Notifier::with_sink(true, sink.clone()), sink)
}
