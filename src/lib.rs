//! dialect-core: the transformation core of a source-to-source compiler for
//! a component-oriented reactive UI dialect.
//!
//! The pipeline is linear, with one feedback loop between the parser and
//! the lexer (mode transitions):
//!
//! ```text
//! source text -> lexer -> tokens -> parser -> AST -> analyzer -> IR
//!             -> transformer passes (ordered) -> IR -> emitter -> code
//! ```
//!
//! Every call to [`transform`] is independent: a fresh lexer, parser,
//! analyzer scope table, and import tracker are constructed per call, and
//! nothing is shared across calls or threads. The thin CLI/bundler entry
//! point, the debug logger's sink, on-disk file access, the golden-fixture
//! test harness, and the runtime library the emitted code imports are all
//! external collaborators, out of scope for this crate.

mod analyzer;
mod ast;
mod diagnostics;
mod emitter;
mod error;
mod import_tracker;
mod ir;
mod lexer;
mod options;
mod parser;
mod passes;
mod pipeline;
mod span;
mod token;
mod validator;

pub use diagnostics::{Diagnostic, Phase, Severity};
pub use error::InternalError;
pub use lexer::Lexer;
pub use options::{EmitterFormat, EmitterOptions, IndentKind, RuntimePaths, TransformOptions, ValidatorOptions};
pub use pipeline::PhaseMetrics;
pub use span::LineCol;
pub use token::{Token, TokenKind};

use std::time::{Duration, Instant};

use diagnostics::{has_errors, resolve_locations};
use ir::ModuleIR;
use pipeline::PipelineContext;
use span::LineIndex;

/// The result of one [`transform`] call.
#[derive(Debug, Clone, Default)]
pub struct PipelineResult {
    /// Emitted ECMAScript text. Empty if any `error`-severity diagnostic
    /// was raised (including a warning promoted by `strict`).
    pub code: String,
    /// Every diagnostic raised by every phase, in source/phase order.
    pub diagnostics: Vec<Diagnostic>,
    /// Wall-clock time spent in each phase, measured around each phase
    /// call in `transform()`.
    pub metrics: PhaseMetrics,
}

impl PipelineResult {
    fn fatal(diagnostics: Vec<Diagnostic>, metrics: PhaseMetrics) -> Self {
        Self { code: String::new(), diagnostics, metrics }
    }
}

/// Transform one compilation unit of dialect source into plain ECMAScript.
///
/// Runs to completion synchronously on the caller's task: parse, analyze,
/// run the four ordered transformer passes, emit, and (if
/// `options.validator.enabled`) re-parse the emitted output as a syntactic
/// sanity check. On any `error`-severity diagnostic — including a warning
/// promoted by `options.strict` — `result.code` is empty and no later phase
/// runs.
pub fn transform(source: &str, options: &TransformOptions) -> PipelineResult {
    if options.debug {
        tracing::debug!(file = options.file_path.as_deref().unwrap_or("<anonymous>"), len = source.len(), "transform: start");
    }

    let mut metrics = PhaseMetrics::default();
    let mut diagnostics = Vec::new();

    // Empty source, or source that is only whitespace/comments, produces
    // empty code and zero diagnostics without running any later phase —
    // parsing it would already yield an empty program with no diagnostics,
    // but short-circuiting here avoids even constructing a pipeline context
    // for the degenerate case.
    if source.trim().is_empty() {
        return PipelineResult::default();
    }

    let parse_start = now();
    let (program, parse_diags) = parser::parse(source);
    diagnostics.extend(parse_diags);
    metrics.parser = elapsed(parse_start);

    if has_errors(&diagnostics) || (options.strict && has_warnings(&diagnostics)) {
        return finish_fatal(diagnostics, metrics, options, source);
    }

    let analyze_start = now();
    let (module, analyze_diags) = analyzer::analyze(source, &program, options.strict);
    diagnostics.extend(analyze_diags);
    metrics.analyzer = elapsed(analyze_start);

    if has_errors(&diagnostics) {
        return finish_fatal(diagnostics, metrics, options, source);
    }

    let transform_start = now();
    let mut ctx = PipelineContext::new(options);
    let module = match passes::run_all(module, &mut ctx) {
        Ok(module) => module,
        Err(err) => {
            diagnostics.push(Diagnostic::error(Phase::Transform, err.to_string()));
            return finish_fatal(diagnostics, metrics, options, source);
        }
    };
    metrics.transform = elapsed(transform_start);

    if module_is_empty(&module) && ctx.imports.is_empty() {
        // Source was non-empty but lowered to nothing emittable (e.g. only
        // type-level declarations) — still a successful, empty result, not
        // a fatal one.
        return finish(String::new(), diagnostics, metrics, options, source);
    }

    let emit_start = now();
    let preamble = ctx.imports.preamble();
    let code = emitter::emit(&module, &preamble, &options.emitter);
    metrics.emitter = elapsed(emit_start);

    finish(code, diagnostics, metrics, options, source)
}

fn finish(code: String, mut diagnostics: Vec<Diagnostic>, mut metrics: PhaseMetrics, options: &TransformOptions, source: &str) -> PipelineResult {
    let code = if options.validator.enabled {
        let validate_start = now();
        let validator_diags = validator::validate(&code);
        metrics.validator = elapsed(validate_start);
        let had_validator_error = has_errors(&validator_diags);
        diagnostics.extend(validator_diags);
        if had_validator_error || (options.strict && has_warnings(&diagnostics)) {
            String::new()
        } else {
            code
        }
    } else {
        code
    };

    let line_index = LineIndex::new(source);
    resolve_locations(&mut diagnostics, &line_index);
    if options.debug {
        tracing::debug!(diagnostics = diagnostics.len(), emitted = !code.is_empty(), "transform: done");
    }
    PipelineResult { code, diagnostics, metrics }
}

fn finish_fatal(mut diagnostics: Vec<Diagnostic>, metrics: PhaseMetrics, options: &TransformOptions, source: &str) -> PipelineResult {
    let line_index = LineIndex::new(source);
    resolve_locations(&mut diagnostics, &line_index);
    if options.debug {
        tracing::debug!(diagnostics = diagnostics.len(), "transform: fatal");
    }
    PipelineResult::fatal(diagnostics, metrics)
}

fn has_warnings(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Warning)
}

fn module_is_empty(module: &ModuleIR) -> bool {
    module.imports.is_empty() && module.items.is_empty()
}

fn now() -> Instant {
    Instant::now()
}

fn elapsed(start: Instant) -> Duration {
    start.elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_empty_code_and_no_diagnostics() {
        let result = transform("", &TransformOptions::default());
        assert_eq!(result.code, "");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn whitespace_and_comments_only_yields_empty_code() {
        let result = transform("  \n// just a comment\n/* block */\n  ", &TransformOptions::default());
        assert_eq!(result.code, "");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn fragment_with_text_lowers_to_single_t_element_call() {
        let result = transform("export default () => <>Hello</>;", &TransformOptions::default());
        assert!(result.code.contains("t_element(Fragment, null, ['Hello'])"), "{}", result.code);
    }

    #[test]
    fn counter_component_wires_signal_and_registry_calls() {
        let source = "component Counter() { const [c, setC] = signal(0); return <button onClick={() => setC(c()+1)}>{c()}</button>; }";
        let result = transform(source, &TransformOptions::default());
        assert!(result.code.contains("$REGISTRY.execute('component:Counter'"), "{}", result.code);
        assert!(result.code.contains("createSignal(0)"), "{}", result.code);
        assert!(result.code.contains("const [c, setC] = createSignal(0)"), "{}", result.code);
        assert!(result.code.contains("t_element('button'"), "{}", result.code);
        assert!(result.code.contains("$REGISTRY.wire("), "{}", result.code);
    }

    #[test]
    fn show_unwraps_zero_arg_signal_getter_in_when() {
        let source = "const [visible, setVisible] = signal(true); const el = <Show when={visible()} fallback={<span/>}><p>hi</p></Show>;";
        let result = transform(source, &TransformOptions::default());
        assert!(result.code.contains("when: visible"), "{}", result.code);
        assert!(!result.code.contains("when: visible()"), "{}", result.code);
    }

    #[test]
    fn syntax_error_yields_empty_code_and_error_diagnostic_with_location() {
        let result = transform("component C( { return 1; }", &TransformOptions::default());
        assert_eq!(result.code, "");
        assert!(has_errors(&result.diagnostics));
        assert!(result.diagnostics.iter().any(|d| d.location.is_some()));
    }

    #[test]
    fn strict_mode_promotes_duplicate_export_warning_to_error() {
        let source = "export default 1; export default 2;";

        let lenient = transform(source, &TransformOptions::default());
        assert!(!lenient.diagnostics.iter().any(|d| d.severity == Severity::Error));

        let strict = transform(source, &TransformOptions::default().with_strict(true));
        assert!(strict.diagnostics.iter().any(|d| d.severity == Severity::Error));
        assert_eq!(strict.code, "");
    }

    #[test]
    fn validator_accepts_well_formed_output() {
        let opts = TransformOptions::default().with_validator(true);
        let result = transform("component C() { return <div/>; }", &opts);
        assert!(!result.code.is_empty());
        assert!(!has_errors(&result.diagnostics));
    }

    #[test]
    fn deterministic_emission_across_repeated_calls() {
        let source = "component Counter() { const [c, setC] = signal(0); return <button onClick={() => setC(c()+1)}>{c()}</button>; }";
        let a = transform(source, &TransformOptions::default());
        let b = transform(source, &TransformOptions::default());
        assert_eq!(a.code, b.code);
    }
}
