use log::{debug, info, trace};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// Library code only talks to the `log` facade. Binaries that want to see the
/// matcher's output call this once at startup.
pub fn init_logger() {
    init_with(false);
}

/// Initialize the logging system for test harnesses
///
/// Output goes through the harness's captured stdout, so it only shows for
/// failing tests. Unit and integration suites call this instead of
/// `init_logger`.
pub fn init_test_logger() {
    init_with(true);
}

fn init_with(is_test: bool) {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn) // Default level
            .filter_module("game_title_match", log::LevelFilter::Debug)
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .is_test(is_test)
            .try_init();

        info!("Logging system initialized");
    });
}

/// Structured logging helpers for the matching pipeline
pub struct LogContext;

impl LogContext {
    /// Log a single alias pair evaluation
    pub fn pair_scored(a: &str, b: &str, similarity: f64, penalty: f64) {
        trace!(
            "Pair: '{}' vs '{}' similarity={:.4} penalty={:.4} score={:.4}",
            a,
            b,
            similarity,
            penalty,
            similarity - penalty
        );
    }

    /// Log a skipped pair (one side normalized to nothing)
    pub fn pair_skipped(a: &str, b: &str) {
        trace!("Pair: skipping '{}' vs '{}' (empty after normalization)", a, b);
    }

    /// Log the outcome of a title list comparison
    pub fn match_finished(pairs: usize, best: f64) {
        debug!("Match: {} pairs evaluated, best score {:.4}", pairs, best);
    }
}
