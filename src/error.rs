//! Internal, programmer-error conditions — never a user-facing compile
//! problem. User-facing compile problems are `Diagnostic` values returned in
//! `PipelineResult` (see `diagnostics.rs`); this type exists only for the
//! small set of invariant violations that are always a bug in a prior pass
//! (an emitter reaching an IR node it doesn't know how to print) or a
//! genuinely unrecoverable host condition.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InternalError {
    #[error("emitter reached an unsupported IR node: {0}")]
    UnsupportedIrNode(String),

    #[error("bounded-iteration ceiling ({ceiling}) exceeded in {pass}")]
    LoopDetected { pass: &'static str, ceiling: u32 },

    #[error("{0}")]
    Other(String),
}

impl InternalError {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
