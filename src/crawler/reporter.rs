//! Sinks for per-page crawl errors

/// Receives one human-readable line per skipped page
///
/// Implementations must not panic; a reporting failure is their own concern
/// and never stops the crawl. Any `Fn(&str)` closure is a reporter.
pub trait ErrorReporter {
    fn report(&self, message: &str);
}

impl<F> ErrorReporter for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Writes `Skipping <message>` to standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&self, message: &str) {
        eprintln!("Skipping {}", message);
    }
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn report(&self, _message: &str) {}
}
