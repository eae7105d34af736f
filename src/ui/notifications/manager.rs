// SPDX-License-Identifier: MPL-2.0
//! Notification queue of the studio.
//!
//! At most [`MAX_VISIBLE`] notifications are on screen; the rest wait in a
//! FIFO queue. Both lists are kept oldest first.

use super::notification::{Notification, NotificationId};
use std::collections::VecDeque;

const MAX_VISIBLE: usize = 3;

#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification`, or queues it while the screen is full. It is
    /// logged at its severity's level either way.
    pub fn push(&mut self, notification: Notification) {
        log::log!(
            notification.severity().log_level(),
            "{} {:?}",
            notification.message_key(),
            notification.message_args()
        );

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_back(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Returns `false` when no notification has this id.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            true
        } else if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            true
        } else {
            false
        }
    }

    /// Drops visible notifications whose time is up.
    pub fn tick(&mut self) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.should_auto_dismiss());
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    /// On-screen notifications, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Takes every notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.visible.drain(..).chain(self.queue.drain(..)).collect()
    }

    pub fn clear(&mut self) {
        self.visible.clear();
        self.queue.clear();
    }

    /// Drops notifications about a file that is no longer in the gallery.
    pub fn clear_for_file(&mut self, name: &str) {
        let before = self.visible.len();
        self.visible.retain(|n| n.arg("filename") != Some(name));
        self.queue.retain(|n| n.arg("filename") != Some(name));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            match self.queue.pop_front() {
                Some(notification) => self.visible.push_back(notification),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::Severity;

    fn keys(notifications: &[Notification]) -> Vec<&str> {
        notifications.iter().map(Notification::message_key).collect()
    }

    #[test]
    fn overflow_waits_in_queue() {
        let mut manager = Manager::new();
        for key in ["a", "b", "c", "d"] {
            manager.push(Notification::success(key));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
    }

    #[test]
    fn drain_keeps_order_after_promotion() {
        let mut manager = Manager::new();
        let mut ids = Vec::new();
        for key in ["a", "b", "c", "d", "e"] {
            let notification = Notification::success(key);
            ids.push(notification.id());
            manager.push(notification);
        }

        assert!(manager.dismiss(ids[1]));
        let on_screen: Vec<&str> = manager.visible().map(Notification::message_key).collect();
        assert_eq!(on_screen, ["a", "c", "d"]);

        let drained = manager.drain();
        assert_eq!(keys(&drained), ["a", "c", "d", "e"]);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn unknown_id_is_not_dismissed() {
        let mut manager = Manager::new();
        manager.push(Notification::success("kept"));
        assert!(!manager.dismiss(Notification::success("other").id()));
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn tick_keeps_errors() {
        let mut manager = Manager::new();
        manager.push(Notification::new(Severity::Error, "notification-io-error"));
        manager.tick();
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn clear_for_file_promotes_the_rest() {
        let mut manager = Manager::new();
        for name in ["a.png", "b.png", "a.png"] {
            manager.push(
                Notification::new(Severity::Warning, "notification-ingest-duplicate")
                    .with_arg("filename", name),
            );
        }
        manager.push(Notification::success("notification-crop-applied"));

        manager.clear_for_file("a.png");

        let drained = manager.drain();
        assert_eq!(
            keys(&drained),
            ["notification-ingest-duplicate", "notification-crop-applied"]
        );
        assert_eq!(drained[0].arg("filename"), Some("b.png"));
    }
}
