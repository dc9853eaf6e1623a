use std::cell::RefCell;
use std::rc::Rc;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

/// Destination for user-facing confirmations and errors. Delivery is
/// fire-and-forget: a sink never fails the operation that notified it.
pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification {
            level: Level::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notification {
            level: Level::Error,
            message: message.to_string(),
        });
    }
}

/// Prints notifications to stderr, keeping stdout for command output.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    color: bool,
    errors: bool,
}

impl ConsoleNotifier {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            errors: true,
        }
    }

    /// Drop error notifications; the caller prints failures itself.
    pub fn successes_only(self) -> Self {
        Self {
            errors: false,
            ..self
        }
    }

    fn line(&self, notification: &Notification) -> Option<String> {
        if notification.level == Level::Error && !self.errors {
            return None;
        }
        let line = match (notification.level, self.color) {
            (Level::Success, true) => format!("{} {}", "✓".green(), notification.message),
            (Level::Error, true) => format!("{} {}", "✗".red(), notification.message.red()),
            (Level::Success, false) => format!("ok: {}", notification.message),
            (Level::Error, false) => format!("error: {}", notification.message),
        };
        Some(line)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        if let Some(line) = self.line(&notification) {
            eprintln!("{line}");
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Keeps notifications in memory. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.log.borrow().iter().map(|n| n.message.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.log.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.log.borrow_mut().push(notification);
    }
}
