//! The per-call state threaded through the transformer passes: an import
//! tracker, a bounded-iteration guard, and a counter for synthesized
//! element variable names. Constructed fresh by `transform()` on every
//! call and never shared across calls or threads.

use std::time::Duration;

use crate::error::InternalError;
use crate::import_tracker::ImportTracker;
use crate::options::{RuntimePaths, TransformOptions};

pub struct PipelineContext {
    pub imports: ImportTracker,
    pub runtime_paths: RuntimePaths,
    pub loop_ceiling: u32,
    loop_counter: u32,
    element_var_counter: u32,
}

impl PipelineContext {
    pub fn new(options: &TransformOptions) -> Self {
        Self {
            imports: ImportTracker::new(),
            runtime_paths: options.emitter.runtime_paths.clone(),
            loop_ceiling: options.loop_ceiling,
            loop_counter: 0,
            element_var_counter: 0,
        }
    }

    /// The next unique element-variable name, e.g. for a deferred text node
    /// (`t0`, `t1`, ...). Stable within a call.
    pub fn next_element_var(&mut self) -> String {
        let name = format!("t{}", self.element_var_counter);
        self.element_var_counter += 1;
        name
    }

    /// Bump the bounded-iteration guard used by every recursive pass walk;
    /// returns a loop-detected error once `loop_ceiling` is exceeded, so a
    /// runaway walk over malformed IR aborts instead of hanging.
    pub fn tick(&mut self, pass: &'static str) -> Result<(), InternalError> {
        self.loop_counter += 1;
        if self.loop_counter > self.loop_ceiling {
            return Err(InternalError::LoopDetected { pass, ceiling: self.loop_ceiling });
        }
        Ok(())
    }
}

/// Wall-clock time spent in each phase of one `transform()` call. Lexing is
/// folded into `parser` since the parser drives the lexer and the two are
/// never timed separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseMetrics {
    pub parser: Duration,
    pub analyzer: Duration,
    pub transform: Duration,
    pub emitter: Duration,
    pub validator: Duration,
}
