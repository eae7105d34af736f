// SPDX-License-Identifier: MPL-2.0
//! A single message for the user: severity, message key and arguments.

use crate::error::{EditError, Error};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// How loudly a notification is shown and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Time on screen before `Manager::tick` drops it. Errors stay until
    /// dismissed.
    #[must_use]
    pub fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }

    #[must_use]
    pub fn log_level(self) -> log::Level {
        match self {
            Severity::Success | Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    /// Outcome of a completed ingestion or commit.
    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    /// Builds the notification reporting a recovered failure.
    ///
    /// Rejected files are warnings, deferred edits and mode mismatches are
    /// informational and everything else is an error.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let severity = match err {
            Error::Ingestion(_) => Severity::Warning,
            Error::Edit(edit) if edit.is_deferred() => Severity::Info,
            Error::Edit(EditError::InactiveMode(_) | EditError::ModeBusy(_)) => Severity::Info,
            _ => Severity::Error,
        };
        let notification = Self::new(severity, err.notification_key());
        match err {
            Error::Ingestion(rejection) => notification.with_arg("filename", rejection.name()),
            Error::Edit(EditError::InactiveMode(mode) | EditError::ModeBusy(mode)) => {
                notification.with_arg("mode", *mode)
            }
            Error::Io(detail)
            | Error::Config(detail)
            | Error::Decode(detail)
            | Error::Edit(EditError::Compositing(detail) | EditError::FontUnavailable(detail)) => {
                notification.with_arg("detail", detail.as_str())
            }
            Error::Edit(_) => notification,
        }
    }

    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.message_args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|limit| self.created_at.elapsed() >= limit)
    }
}
