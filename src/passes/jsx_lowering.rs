//! Pass 3 — JSX lowering.
//!
//! Every `ElementIR` becomes a `t_element(tagName, propsObject,
//! childrenArray)` call. Runs after control-flow lowering so `when`/`each`
//! are already in their final (unwrapped-getter) shape by the time this
//! pass builds the props object.

use crate::ast::{PropertyKey, PropertyKind};
use crate::error::InternalError;
use crate::ir::{AttributeIR, ChildIR, ElementIR, ExprIR, ExprKindIR, JsxTagIR, ModuleIR, ObjectMemberIR};
use crate::pipeline::PipelineContext;
use crate::span::Span;

use super::walk::map_module;
use super::{call, zero_arg_expr_arrow};

pub fn run(module: ModuleIR, ctx: &mut PipelineContext) -> Result<ModuleIR, InternalError> {
    let jsx_runtime = ctx.runtime_paths.jsx_runtime.clone();
    ctx.imports.ensure_named(&jsx_runtime, "t_element");
    map_module(module, ctx, "jsx_lowering", &mut |ctx, expr| lower(ctx, expr))
}

fn lower(ctx: &mut PipelineContext, expr: ExprIR) -> Result<ExprIR, InternalError> {
    let span = expr.span;
    match expr.kind {
        ExprKindIR::Element(el) => Ok(element_to_call(ctx, *el, span)),
        kind => Ok(ExprIR::new(kind, span)),
    }
}

fn element_to_call(ctx: &mut PipelineContext, el: ElementIR, span: Span) -> ExprIR {
    let (tag_expr, props_expr) = if el.is_fragment {
        let core = ctx.runtime_paths.core.clone();
        ctx.imports.ensure_named(&core, "Fragment");
        (ExprIR::new(ExprKindIR::Ident("Fragment".to_string()), span), ExprIR::new(ExprKindIR::Null, span))
    } else {
        let tag_expr = match el.tag_name.expect("non-fragment element always carries a tag name") {
            JsxTagIR::Intrinsic(name) => ExprIR::new(ExprKindIR::String(name), span),
            JsxTagIR::Component(e) => e,
        };
        (tag_expr, build_props(el.attributes, span))
    };
    let children_exprs = coalesce_children(ctx, el.children, span);
    let children_array = ExprIR::new(ExprKindIR::Array(children_exprs.into_iter().map(Box::new).map(Some).collect()), span);
    call(ExprIR::new(ExprKindIR::Ident("t_element".to_string()), span), vec![tag_expr, props_expr, children_array], span)
}

fn build_props(attributes: Vec<AttributeIR>, span: Span) -> ExprIR {
    let members = attributes
        .into_iter()
        .map(|attr| match attr {
            AttributeIR::KeyValue { key, value } => {
                let value = if key == "style" { defer_style_object(value) } else { value };
                ObjectMemberIR::Property {
                    key: PropertyKey::Ident(key),
                    value,
                    kind: PropertyKind::Init,
                    shorthand: false,
                    computed: false,
                }
            }
            AttributeIR::Spread(e) => ObjectMemberIR::Spread(Box::new(e)),
        })
        .collect();
    ExprIR::new(ExprKindIR::Object(members), span)
}

/// Wraps each property of a `style={{ ... }}` object literal whose value is
/// a zero-arg signal-getter call or an interpolated template literal in a
/// zero-arg arrow, so the runtime can re-evaluate it on dependency change.
/// Non-object `style` values (a plain string, a spread variable) pass
/// through unchanged — there is no per-property boundary to defer at.
fn defer_style_object(value: ExprIR) -> ExprIR {
    let span = value.span;
    match value.kind {
        ExprKindIR::Object(members) => {
            let members = members
                .into_iter()
                .map(|m| match m {
                    ObjectMemberIR::Property { key, value, kind, shorthand, computed } => {
                        ObjectMemberIR::Property { key, value: defer_if_reactive(value), kind, shorthand, computed }
                    }
                    other => other,
                })
                .collect();
            ExprIR::new(ExprKindIR::Object(members), span)
        }
        kind => ExprIR::new(kind, span),
    }
}

fn defer_if_reactive(value: ExprIR) -> ExprIR {
    let span = value.span;
    let needs_defer = match &value.kind {
        ExprKindIR::Call(call) => call.is_signal_getter && call.args.is_empty(),
        ExprKindIR::Template { exprs, .. } => !exprs.is_empty(),
        _ => false,
    };
    if needs_defer {
        ExprIR::new(ExprKindIR::Arrow(Box::new(zero_arg_expr_arrow(value))), span)
    } else {
        value
    }
}

/// Joins consecutive text children, collapses whitespace-only runs, and
/// turns a direct signal-getter child expression into a deferred
/// `$REGISTRY.wire(...)` text binding.
fn coalesce_children(ctx: &mut PipelineContext, children: Vec<ChildIR>, span: Span) -> Vec<ExprIR> {
    let mut out = Vec::new();
    let mut text_run = String::new();
    let mut flush = |run: &mut String, out: &mut Vec<ExprIR>| {
        if run.is_empty() {
            return;
        }
        if run.trim().is_empty() {
            if !run.contains('\n') {
                out.push(ExprIR::new(ExprKindIR::String(" ".to_string()), span));
            }
        } else {
            out.push(ExprIR::new(ExprKindIR::String(std::mem::take(run)), span));
        }
        run.clear();
    };

    for child in children {
        match child {
            ChildIR::Text(t) => text_run.push_str(&t),
            ChildIR::Expr(e) => {
                flush(&mut text_run, &mut out);
                out.push(lower_child_expr(ctx, e));
            }
        }
    }
    flush(&mut text_run, &mut out);
    out
}

fn lower_child_expr(ctx: &mut PipelineContext, expr: ExprIR) -> ExprIR {
    let span = expr.span;
    let is_signal_getter_child = matches!(&expr.kind, ExprKindIR::Call(call) if call.is_signal_getter && call.args.is_empty());
    if !is_signal_getter_child {
        return expr;
    }
    let registry_source = ctx.runtime_paths.registry.clone();
    ctx.imports.ensure_named(&registry_source, "$REGISTRY");
    let var_name = ctx.next_element_var();
    ExprIR::new(ExprKindIR::WiredText { var_name, getter: Box::new(expr) }, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::ir::ItemIR;
    use crate::options::TransformOptions;
    use crate::parser::parse;

    fn lower_source(source: &str) -> ModuleIR {
        let (program, _) = parse(source);
        let (module, _) = analyze(source, &program, false);
        let options = TransformOptions::default();
        let mut ctx = PipelineContext::new(&options);
        run(module, &mut ctx).unwrap()
    }

    #[test]
    fn fragment_lowers_to_t_element_with_fragment_tag_and_null_props() {
        let module = lower_source("const el = <>Hello</>;");
        let ItemIR::Var(decl) = &module.items[0] else { panic!("expected a var decl") };
        let init = decl.decls[0].init.as_ref().unwrap();
        let ExprKindIR::Call(call) = &init.kind else { panic!("expected a call") };
        assert!(matches!(&call.args[0].kind, ExprKindIR::Ident(n) if n == "Fragment"));
        assert!(matches!(&call.args[1].kind, ExprKindIR::Null));
        let ExprKindIR::Array(children) = &call.args[2].kind else { panic!("expected an array") };
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn signal_getter_child_becomes_wired_text() {
        let module = lower_source("component C() { const [c, setC] = signal(0); return <p>{c()}</p>; }");
        let ItemIR::Component(c) = &module.items[0] else { panic!("expected a component") };
        let found_wired = format!("{:?}", c.body).contains("WiredText");
        assert!(found_wired, "expected a WiredText child binding");
    }
}
