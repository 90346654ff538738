//! The four ordered transformer passes: component wrapping, control-flow
//! lowering, JSX lowering, reactivity normalization. Run in this fixed
//! order by `run_all`: wrapping runs first so JSX lowering sees a stable
//! function shape; control-flow lowering runs before generic JSX lowering
//! so `when`/`each` keep structural meaning; reactivity normalization runs
//! last so imports reflect final emitted names.

mod component_wrap;
mod control_flow;
mod jsx_lowering;
mod reactivity;
mod walk;

use crate::error::InternalError;
use crate::ir::{ExprIR, ExprKindIR, ModuleIR};
use crate::pipeline::PipelineContext;
use crate::span::Span;

pub fn run_all(module: ModuleIR, ctx: &mut PipelineContext) -> Result<ModuleIR, InternalError> {
    let module = component_wrap::run(module, ctx)?;
    let module = control_flow::run(module, ctx)?;
    let module = jsx_lowering::run(module, ctx)?;
    let module = reactivity::run(module, ctx)?;
    Ok(module)
}

/// `$REGISTRY`-qualified member access, e.g. `$REGISTRY.execute` or
/// `$REGISTRY.wire` — shared by pass 1 (component wrapping) and pass 3
/// (deferred text bindings).
fn registry_member(method: &str, span: Span) -> ExprIR {
    ExprIR::new(
        ExprKindIR::Member {
            object: Box::new(ExprIR::new(ExprKindIR::Ident("$REGISTRY".to_string()), span)),
            property: Box::new(ExprIR::new(ExprKindIR::Ident(method.to_string()), span)),
            computed: false,
            optional: false,
        },
        span,
    )
}

fn string_lit(value: impl Into<String>, span: Span) -> ExprIR {
    ExprIR::new(ExprKindIR::String(value.into()), span)
}

fn call(callee: ExprIR, args: Vec<ExprIR>, span: Span) -> ExprIR {
    ExprIR::new(
        ExprKindIR::Call(Box::new(crate::ir::CallExpressionIR {
            callee,
            args,
            optional: false,
            is_signal_creation: false,
            is_signal_getter: false,
            is_effect: false,
        })),
        span,
    )
}

/// A zero-parameter arrow whose body is a single block of statements, e.g.
/// the thunk `$REGISTRY.execute` expects as its second argument.
fn zero_arg_block_arrow(body: Vec<crate::ir::StmtIR>) -> crate::ir::ArrowFunctionIR {
    crate::ir::ArrowFunctionIR { params: Vec::new(), body: crate::ir::ArrowBodyIR::Block(body), is_async: false }
}

/// A zero-parameter arrow whose body is a single expression, e.g. the
/// deferred getter thunk `() => theme()`.
fn zero_arg_expr_arrow(expr: ExprIR) -> crate::ir::ArrowFunctionIR {
    crate::ir::ArrowFunctionIR { params: Vec::new(), body: crate::ir::ArrowBodyIR::Expr(Box::new(expr)), is_async: false }
}
