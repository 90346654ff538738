//! Pass 4 — reactivity normalization.
//!
//! Renames call sites whose callee is a dialect alias (`signal`, `computed`,
//! `effect`) to the runtime's names (`createSignal`, `createMemo`,
//! `createEffect`) and records the corresponding import. `useState` keeps
//! its name but is still recorded. Every one of these is recorded under
//! `runtimePaths.core` — there is no separate hooks module (see DESIGN.md).
//!
//! Runs last so the import tracker reflects the final emitted call names.

use crate::error::InternalError;
use crate::ir::{ExprIR, ExprKindIR, ModuleIR};
use crate::pipeline::PipelineContext;

use super::walk::map_module;

pub fn run(module: ModuleIR, ctx: &mut PipelineContext) -> Result<ModuleIR, InternalError> {
    map_module(module, ctx, "reactivity", &mut |ctx, expr| Ok(rename(ctx, expr)))
}

fn rename(ctx: &mut PipelineContext, expr: ExprIR) -> ExprIR {
    let span = expr.span;
    let ExprKindIR::Call(mut call) = expr.kind else { return ExprIR::new(expr.kind, span) };

    if let ExprKindIR::Ident(name) = &call.callee.kind {
        if let Some(runtime_name) = runtime_name_for(name, call.is_signal_creation, call.is_effect) {
            let core = ctx.runtime_paths.core.clone();
            ctx.imports.ensure_named(&core, runtime_name);
            if runtime_name != name {
                call.callee = ExprIR::new(ExprKindIR::Ident(runtime_name.to_string()), call.callee.span);
            }
        }
    }

    ExprIR::new(ExprKindIR::Call(call), span)
}

/// The runtime import/rename target for a recognized constructor or effect
/// name, or `None` if this call isn't one the analyzer tagged.
fn runtime_name_for(local_name: &str, is_signal_creation: bool, is_effect: bool) -> Option<&'static str> {
    if is_effect {
        return Some("createEffect");
    }
    if !is_signal_creation {
        return None;
    }
    match local_name {
        "signal" => Some("createSignal"),
        "computed" => Some("createMemo"),
        // already the runtime name, or `useState` preserved verbatim
        "createSignal" => Some("createSignal"),
        "createMemo" => Some("createMemo"),
        "useState" => Some("useState"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::ir::{ImportSpecifierIR, ItemIR};
    use crate::options::TransformOptions;
    use crate::parser::parse;

    #[test]
    fn renames_signal_to_create_signal_and_records_import() {
        let source = "component C() { const [c, setC] = signal(0); return c(); }";
        let (program, _) = parse(source);
        let (module, _) = analyze(source, &program, false);
        let options = TransformOptions::default();
        let mut ctx = PipelineContext::new(&options);
        let module = run(module, &mut ctx).unwrap();

        let ItemIR::Component(c) = &module.items[0] else { panic!("expected a component") };
        let crate::ir::StmtKindIR::Var(decl) = &c.body[0].kind else { panic!("expected a var decl") };
        let init = decl.decls[0].init.as_ref().unwrap();
        let ExprKindIR::Call(call) = &init.kind else { panic!("expected a call") };
        assert!(matches!(&call.callee.kind, ExprKindIR::Ident(n) if n == "createSignal"));

        let preamble = ctx.imports.preamble();
        let (_, specs) = preamble.iter().find(|(s, _)| s == "dialect-runtime").unwrap();
        assert!(specs.contains(&ImportSpecifierIR::Named { imported: "createSignal".to_string(), local: "createSignal".to_string() }));
    }

    #[test]
    fn use_state_keeps_its_name() {
        let source = "component C() { const [v, setV] = useState(0); return v(); }";
        let (program, _) = parse(source);
        let (module, _) = analyze(source, &program, false);
        let options = TransformOptions::default();
        let mut ctx = PipelineContext::new(&options);
        let module = run(module, &mut ctx).unwrap();

        let ItemIR::Component(c) = &module.items[0] else { panic!("expected a component") };
        let crate::ir::StmtKindIR::Var(decl) = &c.body[0].kind else { panic!("expected a var decl") };
        let init = decl.decls[0].init.as_ref().unwrap();
        let ExprKindIR::Call(call) = &init.kind else { panic!("expected a call") };
        assert!(matches!(&call.callee.kind, ExprKindIR::Ident(n) if n == "useState"));
    }
}
