//! Pass 2 — control-flow lowering.
//!
//! `Show`/`ShowRegistry`'s `when` and `For`/`ForRegistry`/`Index`'s `each`
//! attribute expect a thunk, not an evaluated value: a zero-arg call to a
//! signal getter is unwrapped back to the bare getter so the runtime can
//! call it itself; anything else is wrapped in a synthesized zero-arg
//! arrow. Runs before generic JSX lowering so these attributes keep their
//! structural meaning.

use crate::error::InternalError;
use crate::ir::{AttributeIR, ControlFlowKind, ExprIR, ExprKindIR, ModuleIR};
use crate::pipeline::PipelineContext;

use super::walk::map_module;
use super::zero_arg_expr_arrow;

pub fn run(module: ModuleIR, ctx: &mut PipelineContext) -> Result<ModuleIR, InternalError> {
    map_module(module, ctx, "control_flow", &mut |_ctx, expr| Ok(rewrite(expr)))
}

fn rewrite(expr: ExprIR) -> ExprIR {
    let span = expr.span;
    match expr.kind {
        ExprKindIR::Element(mut el) => {
            if let Some(kind) = el.control_flow {
                let target_key = match kind {
                    ControlFlowKind::Show => "when",
                    ControlFlowKind::For | ControlFlowKind::Index => "each",
                };
                for attr in &mut el.attributes {
                    if let AttributeIR::KeyValue { key, value } = attr {
                        if key == target_key {
                            take_mut(value, to_thunk);
                        }
                    }
                }
            }
            ExprIR::new(ExprKindIR::Element(el), span)
        }
        kind => ExprIR::new(kind, span),
    }
}

/// A zero-arg call to a signal getter is unwrapped to the bare getter,
/// since the runtime expects a thunk; anything else is wrapped in a
/// synthesized zero-arg arrow so the shape is uniform either way.
fn to_thunk(value: ExprIR) -> ExprIR {
    let span = value.span;
    match value.kind {
        ExprKindIR::Call(call) if call.is_signal_getter && call.args.is_empty() => call.callee,
        kind => {
            let expr = ExprIR::new(kind, span);
            ExprIR::new(ExprKindIR::Arrow(Box::new(zero_arg_expr_arrow(expr))), span)
        }
    }
}

fn take_mut(slot: &mut ExprIR, f: impl FnOnce(ExprIR) -> ExprIR) {
    let span = slot.span;
    let placeholder = ExprIR::new(ExprKindIR::Null, span);
    let owned = std::mem::replace(slot, placeholder);
    *slot = f(owned);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::ir::ItemIR;
    use crate::options::TransformOptions;
    use crate::parser::parse;

    #[test]
    fn unwraps_zero_arg_signal_getter_in_when_attribute() {
        let source = "const [visible, setVisible] = signal(true); const el = <Show when={visible()}><p/></Show>;";
        let (program, _) = parse(source);
        let (module, _) = analyze(source, &program, false);
        let options = TransformOptions::default();
        let mut ctx = PipelineContext::new(&options);
        let module = run(module, &mut ctx).unwrap();

        let ItemIR::Var(decl) = &module.items[1] else { panic!("expected a var decl") };
        let init = decl.decls[0].init.as_ref().unwrap();
        let ExprKindIR::Element(el) = &init.kind else { panic!("expected an element") };
        let AttributeIR::KeyValue { value, .. } = &el.attributes[0] else { panic!("expected a key-value attribute") };
        match &value.kind {
            ExprKindIR::Ident(name) => assert_eq!(name, "visible"),
            other => panic!("expected a bare identifier, got {other:?}"),
        }
    }
}
