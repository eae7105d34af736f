// SPDX-License-Identifier: MPL-2.0
//! User-facing notifications.
//!
//! Failures recovered by the studio and the outcome of ingestion and commits
//! become notifications carrying a message key and arguments. The front end
//! renders them; this module only queues them.

mod manager;
mod notification;

pub use manager::Manager;
pub use notification::{Notification, NotificationId, Severity};
