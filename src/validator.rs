//! Post-emit syntactic sanity check, run only when `options.validator.enabled`:
//! the emitted code should be valid ECMAScript that a downstream
//! off-the-shelf parser would accept.
//!
//! The core has no bundled JavaScript engine or off-the-shelf ECMAScript
//! parser to hand the emitted text to (bundling, resolution, and any
//! runtime dependency are out of scope); re-running this crate's own
//! recursive-descent parser over the emitted text is the cheapest stand-in
//! that is still a real parse, not a regex sanity check. By the time code
//! reaches here it no longer contains JSX, `component`, or type syntax —
//! JSX lowering and component wrapping have already lowered or erased all
//! of it — so a parser that only has to accept that narrower ECMAScript
//! subset is sufficient.

use crate::diagnostics::{Diagnostic, Phase};
use crate::parser;

/// Re-parses `code` and turns any parser-level diagnostic into a
/// `Phase::Validator` diagnostic of the same severity, so a caller can tell
/// "the emitter itself flagged this" apart from "the emitted text didn't
/// re-parse" in the returned diagnostic list.
pub fn validate(code: &str) -> Vec<Diagnostic> {
    if code.trim().is_empty() {
        return Vec::new();
    }
    let (_program, diags) = parser::parse(code);
    diags
        .into_iter()
        .map(|d| Diagnostic { phase: Phase::Validator, ..d })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::has_errors;

    #[test]
    fn well_formed_emitted_code_validates_cleanly() {
        let code = "import { createSignal } from 'dialect-runtime';\nconst [c, setC] = createSignal(0);\n";
        let diags = validate(code);
        assert!(!has_errors(&diags), "{diags:?}");
    }

    #[test]
    fn malformed_code_is_flagged_as_a_validator_diagnostic() {
        let code = "const x = (1 + ;";
        let diags = validate(code);
        assert!(has_errors(&diags));
        assert!(diags.iter().all(|d| d.phase == Phase::Validator));
    }

    #[test]
    fn empty_code_validates_with_no_diagnostics() {
        assert!(validate("").is_empty());
    }
}
