//! A shared bottom-up IR walker used by passes 2–4.
//!
//! A pass can't be thought of as a simple `ComponentIR -> ComponentIR`
//! rewrite: JSX and control-flow elements can appear in any expression
//! position, including bare top-level `const` bindings with no component
//! in sight at all ("fragment with text", "show with signal"). So passes
//! 2–4 walk the whole `ModuleIR` here, visiting every expression exactly
//! once, children before parents, and handing each one to the pass's
//! callback after its children are already rewritten.

use crate::error::InternalError;
use crate::ir::*;
use crate::pipeline::PipelineContext;

pub type ExprVisitor<'a> = dyn FnMut(&mut PipelineContext, ExprIR) -> Result<ExprIR, InternalError> + 'a;

pub fn map_module(
    module: ModuleIR,
    ctx: &mut PipelineContext,
    pass: &'static str,
    f: &mut ExprVisitor,
) -> Result<ModuleIR, InternalError> {
    // `export component Foo() {...}`/`export default <jsx>` carry a full
    // item or expression inside `ImportItemIR::Export`, not inside `items` —
    // without this they'd silently skip every pass (no registry wrap, no
    // JSX lowering, no reactivity renaming).
    let imports = module.imports.into_iter().map(|i| map_import_item(i, ctx, pass, f)).collect::<Result<_, _>>()?;
    let items = module.items.into_iter().map(|item| map_item(item, ctx, pass, f)).collect::<Result<_, _>>()?;
    Ok(ModuleIR { imports, items, ..module })
}

fn map_import_item(item: ImportItemIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ImportItemIR, InternalError> {
    Ok(match item {
        ImportItemIR::Import(i) => ImportItemIR::Import(i),
        ImportItemIR::Export(e) => ImportItemIR::Export(match e {
            ExportIR::Named { specifiers, source } => ExportIR::Named { specifiers, source },
            ExportIR::All { exported, source } => ExportIR::All { exported, source },
            ExportIR::Default(expr) => ExportIR::Default(Box::new(map_expr(*expr, ctx, pass, f)?)),
            ExportIR::Item(item) => ExportIR::Item(Box::new(map_item(*item, ctx, pass, f)?)),
        }),
    })
}

fn map_item(item: ItemIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ItemIR, InternalError> {
    ctx.tick(pass)?;
    Ok(match item {
        ItemIR::Component(c) => ItemIR::Component(Box::new(map_component(*c, ctx, pass, f)?)),
        ItemIR::Function(fun) => ItemIR::Function(Box::new(map_function(*fun, ctx, pass, f)?)),
        ItemIR::Var(decl) => ItemIR::Var(Box::new(map_var_decl(*decl, ctx, pass, f)?)),
        ItemIR::Stmt(s) => ItemIR::Stmt(Box::new(map_stmt(*s, ctx, pass, f)?)),
        ItemIR::Enum(e) => ItemIR::Enum(e),
    })
}

fn map_component(c: ComponentIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ComponentIR, InternalError> {
    let body = map_stmts(c.body, ctx, pass, f)?;
    Ok(ComponentIR { body, ..c })
}

fn map_function(fun: FunctionIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<FunctionIR, InternalError> {
    let body = map_stmts(fun.body, ctx, pass, f)?;
    Ok(FunctionIR { body, ..fun })
}

fn map_stmts(stmts: Vec<StmtIR>, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<Vec<StmtIR>, InternalError> {
    stmts.into_iter().map(|s| map_stmt(s, ctx, pass, f)).collect()
}

fn map_stmt(stmt: StmtIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<StmtIR, InternalError> {
    ctx.tick(pass)?;
    let span = stmt.span;
    let kind = match stmt.kind {
        StmtKindIR::Var(decl) => StmtKindIR::Var(Box::new(map_var_decl(*decl, ctx, pass, f)?)),
        StmtKindIR::Function(fun) => StmtKindIR::Function(Box::new(map_function(*fun, ctx, pass, f)?)),
        StmtKindIR::NestedComponent(fun) => StmtKindIR::NestedComponent(Box::new(map_function(*fun, ctx, pass, f)?)),
        StmtKindIR::Block(stmts) => StmtKindIR::Block(map_stmts(stmts, ctx, pass, f)?),
        StmtKindIR::If { test, consequent, alternate } => StmtKindIR::If {
            test: f(ctx, map_expr_children(test, ctx, pass, f)?)?,
            consequent: Box::new(map_stmt(*consequent, ctx, pass, f)?),
            alternate: alternate.map(|a| map_stmt(*a, ctx, pass, f)).transpose()?.map(Box::new),
        },
        StmtKindIR::Switch { discriminant, cases } => StmtKindIR::Switch {
            discriminant: f(ctx, map_expr_children(discriminant, ctx, pass, f)?)?,
            cases: cases
                .into_iter()
                .map(|c| {
                    Ok::<_, InternalError>(SwitchCaseIR {
                        test: c.test.map(|t| map_expr(t, ctx, pass, f)).transpose()?,
                        consequent: map_stmts(c.consequent, ctx, pass, f)?,
                    })
                })
                .collect::<Result<_, _>>()?,
        },
        StmtKindIR::For { init, test, update, body } => StmtKindIR::For {
            init: init.map(|i| map_for_init(i, ctx, pass, f)).transpose()?,
            test: test.map(|t| map_expr(t, ctx, pass, f)).transpose()?,
            update: update.map(|u| map_expr(u, ctx, pass, f)).transpose()?,
            body: Box::new(map_stmt(*body, ctx, pass, f)?),
        },
        StmtKindIR::ForIn { left, right, body } => StmtKindIR::ForIn {
            left: map_for_init(left, ctx, pass, f)?,
            right: map_expr(right, ctx, pass, f)?,
            body: Box::new(map_stmt(*body, ctx, pass, f)?),
        },
        StmtKindIR::ForOf { left, right, body, is_await } => StmtKindIR::ForOf {
            left: map_for_init(left, ctx, pass, f)?,
            right: map_expr(right, ctx, pass, f)?,
            body: Box::new(map_stmt(*body, ctx, pass, f)?),
            is_await,
        },
        StmtKindIR::While { test, body } => StmtKindIR::While { test: map_expr(test, ctx, pass, f)?, body: Box::new(map_stmt(*body, ctx, pass, f)?) },
        StmtKindIR::DoWhile { body, test } => StmtKindIR::DoWhile { body: Box::new(map_stmt(*body, ctx, pass, f)?), test: map_expr(test, ctx, pass, f)? },
        StmtKindIR::Break(l) => StmtKindIR::Break(l),
        StmtKindIR::Continue(l) => StmtKindIR::Continue(l),
        StmtKindIR::Return(e) => StmtKindIR::Return(e.map(|e| map_expr(e, ctx, pass, f)).transpose()?),
        StmtKindIR::Throw(e) => StmtKindIR::Throw(map_expr(e, ctx, pass, f)?),
        StmtKindIR::Try { block, handler, finalizer } => StmtKindIR::Try {
            block: map_stmts(block, ctx, pass, f)?,
            handler: handler.map(|h| Ok::<_, InternalError>(CatchClauseIR { param: h.param, body: map_stmts(h.body, ctx, pass, f)? })).transpose()?,
            finalizer: finalizer.map(|fin| map_stmts(fin, ctx, pass, f)).transpose()?,
        },
        StmtKindIR::Labeled { label, body } => StmtKindIR::Labeled { label, body: Box::new(map_stmt(*body, ctx, pass, f)?) },
        StmtKindIR::Expr(e) => StmtKindIR::Expr(map_expr(e, ctx, pass, f)?),
        StmtKindIR::Empty => StmtKindIR::Empty,
        StmtKindIR::Enum(e) => StmtKindIR::Enum(e),
    };
    Ok(StmtIR { kind, span })
}

fn map_for_init(init: ForInitIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ForInitIR, InternalError> {
    Ok(match init {
        ForInitIR::Var(decl) => ForInitIR::Var(Box::new(map_var_decl(*decl, ctx, pass, f)?)),
        ForInitIR::Expr(e) => ForInitIR::Expr(map_expr(e, ctx, pass, f)?),
    })
}

fn map_var_decl(decl: VarDeclIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<VarDeclIR, InternalError> {
    let decls = decl
        .decls
        .into_iter()
        .map(|d| {
            Ok::<_, InternalError>(VarDeclaratorIR {
                init: d.init.map(|e| map_expr(e, ctx, pass, f)).transpose()?,
                ..d
            })
        })
        .collect::<Result<_, _>>()?;
    Ok(VarDeclIR { kind: decl.kind, decls })
}

/// Recurse into `expr`'s children without yet invoking `f` on `expr` itself.
fn map_expr_children(expr: ExprIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ExprIR, InternalError> {
    ctx.tick(pass)?;
    let span = expr.span;
    let kind = match expr.kind {
        ExprKindIR::Template { quasis, exprs } => {
            ExprKindIR::Template { quasis, exprs: exprs.into_iter().map(|e| map_expr(*e, ctx, pass, f).map(Box::new)).collect::<Result<_, _>>()? }
        }
        ExprKindIR::TaggedTemplate { tag, quasis, exprs } => ExprKindIR::TaggedTemplate {
            tag: Box::new(map_expr(*tag, ctx, pass, f)?),
            quasis,
            exprs: exprs.into_iter().map(|e| map_expr(*e, ctx, pass, f).map(Box::new)).collect::<Result<_, _>>()?,
        },
        ExprKindIR::Array(elements) => ExprKindIR::Array(
            elements.into_iter().map(|e| e.map(|e| map_expr(*e, ctx, pass, f).map(Box::new)).transpose()).collect::<Result<_, _>>()?,
        ),
        ExprKindIR::Object(members) => ExprKindIR::Object(
            members
                .into_iter()
                .map(|m| {
                    Ok::<_, InternalError>(match m {
                        ObjectMemberIR::Property { key, value, kind, shorthand, computed } => {
                            ObjectMemberIR::Property { key, value: map_expr(value, ctx, pass, f)?, kind, shorthand, computed }
                        }
                        ObjectMemberIR::Spread(e) => ObjectMemberIR::Spread(Box::new(map_expr(*e, ctx, pass, f)?)),
                    })
                })
                .collect::<Result<_, _>>()?,
        ),
        ExprKindIR::Function(fun) => ExprKindIR::Function(Box::new(map_function(*fun, ctx, pass, f)?)),
        ExprKindIR::Arrow(arrow) => ExprKindIR::Arrow(Box::new(map_arrow(*arrow, ctx, pass, f)?)),
        ExprKindIR::Unary { op, arg } => ExprKindIR::Unary { op, arg: Box::new(map_expr(*arg, ctx, pass, f)?) },
        ExprKindIR::Binary { op, left, right } => {
            ExprKindIR::Binary { op, left: Box::new(map_expr(*left, ctx, pass, f)?), right: Box::new(map_expr(*right, ctx, pass, f)?) }
        }
        ExprKindIR::Logical { op, left, right } => {
            ExprKindIR::Logical { op, left: Box::new(map_expr(*left, ctx, pass, f)?), right: Box::new(map_expr(*right, ctx, pass, f)?) }
        }
        ExprKindIR::Assign { op, left, right } => {
            ExprKindIR::Assign { op, left: Box::new(map_expr(*left, ctx, pass, f)?), right: Box::new(map_expr(*right, ctx, pass, f)?) }
        }
        ExprKindIR::Update { op, prefix, arg } => ExprKindIR::Update { op, prefix, arg: Box::new(map_expr(*arg, ctx, pass, f)?) },
        ExprKindIR::Conditional { test, consequent, alternate } => ExprKindIR::Conditional {
            test: Box::new(map_expr(*test, ctx, pass, f)?),
            consequent: Box::new(map_expr(*consequent, ctx, pass, f)?),
            alternate: Box::new(map_expr(*alternate, ctx, pass, f)?),
        },
        ExprKindIR::Sequence(exprs) => ExprKindIR::Sequence(exprs.into_iter().map(|e| map_expr(e, ctx, pass, f)).collect::<Result<_, _>>()?),
        ExprKindIR::Member { object, property, computed, optional } => ExprKindIR::Member {
            object: Box::new(map_expr(*object, ctx, pass, f)?),
            property: Box::new(map_expr(*property, ctx, pass, f)?),
            computed,
            optional,
        },
        ExprKindIR::Call(call) => ExprKindIR::Call(Box::new(CallExpressionIR {
            callee: map_expr(call.callee, ctx, pass, f)?,
            args: call.args.into_iter().map(|a| map_expr(a, ctx, pass, f)).collect::<Result<_, _>>()?,
            optional: call.optional,
            is_signal_creation: call.is_signal_creation,
            is_signal_getter: call.is_signal_getter,
            is_effect: call.is_effect,
        })),
        ExprKindIR::New { callee, args } => {
            ExprKindIR::New { callee: Box::new(map_expr(*callee, ctx, pass, f)?), args: args.into_iter().map(|a| map_expr(a, ctx, pass, f)).collect::<Result<_, _>>()? }
        }
        ExprKindIR::Spread(e) => ExprKindIR::Spread(Box::new(map_expr(*e, ctx, pass, f)?)),
        ExprKindIR::Yield { arg, delegate } => {
            ExprKindIR::Yield { arg: arg.map(|a| map_expr(*a, ctx, pass, f).map(Box::new)).transpose()?, delegate }
        }
        ExprKindIR::Await(e) => ExprKindIR::Await(Box::new(map_expr(*e, ctx, pass, f)?)),
        ExprKindIR::Element(el) => ExprKindIR::Element(Box::new(map_element(*el, ctx, pass, f)?)),
        ExprKindIR::WiredText { var_name, getter } => ExprKindIR::WiredText { var_name, getter: Box::new(map_expr(*getter, ctx, pass, f)?) },
        leaf @ (ExprKindIR::Null
        | ExprKindIR::Bool(_)
        | ExprKindIR::Number(_)
        | ExprKindIR::BigInt(_)
        | ExprKindIR::String(_)
        | ExprKindIR::Regex { .. }
        | ExprKindIR::TemplateNoSub(_)
        | ExprKindIR::Ident(_)
        | ExprKindIR::This
        | ExprKindIR::Super) => leaf,
    };
    Ok(ExprIR { kind, span })
}

fn map_arrow(arrow: ArrowFunctionIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ArrowFunctionIR, InternalError> {
    let body = match arrow.body {
        ArrowBodyIR::Expr(e) => ArrowBodyIR::Expr(Box::new(map_expr(*e, ctx, pass, f)?)),
        ArrowBodyIR::Block(stmts) => ArrowBodyIR::Block(map_stmts(stmts, ctx, pass, f)?),
    };
    Ok(ArrowFunctionIR { body, ..arrow })
}

fn map_element(el: ElementIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ElementIR, InternalError> {
    let tag_name = el
        .tag_name
        .map(|t| {
            Ok::<_, InternalError>(match t {
                JsxTagIR::Intrinsic(s) => JsxTagIR::Intrinsic(s),
                JsxTagIR::Component(e) => JsxTagIR::Component(map_expr(e, ctx, pass, f)?),
            })
        })
        .transpose()?;
    let attributes = el
        .attributes
        .into_iter()
        .map(|a| {
            Ok::<_, InternalError>(match a {
                AttributeIR::KeyValue { key, value } => AttributeIR::KeyValue { key, value: map_expr(value, ctx, pass, f)? },
                AttributeIR::Spread(e) => AttributeIR::Spread(map_expr(e, ctx, pass, f)?),
            })
        })
        .collect::<Result<_, _>>()?;
    let children = el
        .children
        .into_iter()
        .map(|c| {
            Ok::<_, InternalError>(match c {
                ChildIR::Text(t) => ChildIR::Text(t),
                ChildIR::Expr(e) => ChildIR::Expr(map_expr(e, ctx, pass, f)?),
            })
        })
        .collect::<Result<_, _>>()?;
    Ok(ElementIR { tag_name, attributes, children, ..el })
}

/// Recurse into `expr`'s children, then hand the rebuilt node to `f`.
pub fn map_expr(expr: ExprIR, ctx: &mut PipelineContext, pass: &'static str, f: &mut ExprVisitor) -> Result<ExprIR, InternalError> {
    let rebuilt = map_expr_children(expr, ctx, pass, f)?;
    f(ctx, rebuilt)
}
