//! Deduplicated warnings with colored terminal output.
//!
//! Parsers report dropped declarations and unsupported rules here instead of
//! failing. Each unique message is printed once; every message is recorded so
//! that front ends can summarize what happened after a run.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};

use owo_colors::OwoColorize;

/// Messages already reported, plus the order they were first seen in.
#[derive(Default)]
struct WarningLog {
    seen: HashSet<String>,
    recorded: Vec<String>,
}

static LOG: LazyLock<Mutex<WarningLog>> = LazyLock::new(|| Mutex::new(WarningLog::default()));

/// When set, warnings are recorded but not printed.
static QUIET: AtomicBool = AtomicBool::new(false);

/// A poisoned lock only means another thread panicked while holding it; the
/// log itself is still a valid set of strings.
fn log() -> MutexGuard<'static, WarningLog> {
    LOG.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Warn about dropped or unsupported input (prints once per unique message).
///
/// # Example
/// ```
/// petrel_common::warning::set_quiet(true);
/// petrel_common::warning::warn_once("CSS", "unknown property 'colr'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = {
        let mut log = log();
        if log.seen.insert(key.clone()) {
            log.recorded.push(key);
            true
        } else {
            false
        }
    };

    if first_time && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[Petrel {component}] ⚠ {message}").yellow());
    }
}

/// Suppress (or re-enable) printing. Messages are still recorded.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Drain the recorded messages in first-seen order.
///
/// The deduplication set is kept, so a message taken here is not printed
/// again until [`clear_warnings`] is called.
#[must_use]
pub fn take_warnings() -> Vec<String> {
    std::mem::take(&mut log().recorded)
}

/// Forget every recorded warning (call before processing a new input).
pub fn clear_warnings() {
    let mut log = log();
    log.seen.clear();
    log.recorded.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        set_quiet(true);
        warn_once("Test-dedup", "same message");
        warn_once("Test-dedup", "same message");
        warn_once("Test-dedup", "other message");

        let taken: Vec<String> = take_warnings()
            .into_iter()
            .filter(|w| w.starts_with("[Test-dedup]"))
            .collect();
        assert_eq!(
            taken,
            vec![
                "[Test-dedup] same message".to_string(),
                "[Test-dedup] other message".to_string()
            ]
        );
    }
}
