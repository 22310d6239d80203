// ============================================================
// Layer 6 - Stage Timing
// ============================================================
// Wraps a pipeline stage and logs how long it took, e.g.
//
//   Finding shared verses between 7 translations   done in 0.961s

use std::time::Instant;

/// Run `stage`, log its duration at debug level and return its result.
pub fn timed<T>(label: &str, stage: impl FnOnce() -> T) -> T {
    let start  = Instant::now();
    let result = stage();
    tracing::debug!("{:<50} done in {:.3}s", label, start.elapsed().as_secs_f64());
    result
}
