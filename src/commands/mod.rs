pub mod init;
pub mod project;
pub mod task;

use crate::error::TaskflowError;
use crate::notify::{ConsoleNotifier, Notifier, SilentNotifier};
use crate::output::Format;

/// Machine-readable output stays quiet; the other formats confirm on stderr.
/// Failures are printed once, by `main`, through [`report_error`].
pub fn notifier_for(format: Format) -> Box<dyn Notifier> {
    match format {
        Format::Json => Box::new(SilentNotifier),
        Format::Pretty => Box::new(ConsoleNotifier::new(true).successes_only()),
        Format::Minimal => Box::new(ConsoleNotifier::new(false).successes_only()),
    }
}

/// Print a failed command on stderr: a `{"error", "message"}` object in JSON
/// mode, otherwise an error notification line.
pub fn report_error(err: &TaskflowError, format: Format) {
    match format {
        Format::Json => eprintln!(
            "{}",
            serde_json::json!({
                "error": err.code(),
                "message": err.to_string()
            })
        ),
        Format::Pretty => ConsoleNotifier::new(true).error(&err.to_string()),
        Format::Minimal => ConsoleNotifier::new(false).error(&err.to_string()),
    }
}
