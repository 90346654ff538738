//! Intermediate representation.
//!
//! IR nodes mirror the AST but are normalized: signal getters, components,
//! and control-flow elements are tagged explicitly instead of being
//! re-derived by every later pass. IR nodes carry the `Span` of the AST node
//! they were lowered from; synthesized nodes reuse the enclosing span rather
//! than fabricating one, so diagnostics and the (currently unused) source-map
//! metadata stay meaningful end to end.

use crate::ast::*;
use crate::span::Span;

/// One parsed-and-lowered compilation unit.
#[derive(Debug, Clone)]
pub struct ModuleIR {
    pub imports: Vec<ImportItemIR>,
    pub items: Vec<ItemIR>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ImportItemIR {
    Import(ImportIR),
    Export(ExportIR),
}

#[derive(Debug, Clone)]
pub struct ImportIR {
    pub source: String,
    pub specifiers: Vec<ImportSpecifierIR>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifierIR {
    Named { imported: String, local: String },
    Default { local: String },
    Namespace { local: String },
    TypeOnly { imported: String, local: String },
}

#[derive(Debug, Clone)]
pub enum ExportIR {
    Named { specifiers: Vec<ExportSpecifier>, source: Option<String> },
    Default(Box<ExprIR>),
    Item(Box<ItemIR>),
    All { exported: Option<String>, source: String },
}

/// A top-level (or nested, for non-component statements) IR item.
#[derive(Debug, Clone)]
pub enum ItemIR {
    Component(Box<ComponentIR>),
    Function(Box<FunctionIR>),
    Var(Box<VarDeclIR>),
    Stmt(Box<StmtIR>),
    /// `enum` is the one type-level declaration that survives emission.
    Enum(Box<EnumDecl>),
}

#[derive(Debug, Clone)]
pub struct ComponentIR {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<StmtIR>,
    pub registry_key: String,
    pub uses_signals: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionIR {
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<StmtIR>,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

/// Statements are carried through largely unchanged from the AST; only
/// expressions (where JSX, signals, and control flow actually live) are
/// replaced by their IR counterpart. Keeping `StmtIR` structurally close to
/// `StmtKind` lets every pass walk it with an ordinary recursive visitor.
#[derive(Debug, Clone)]
pub struct StmtIR {
    pub kind: StmtKindIR,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKindIR {
    Var(Box<VarDeclIR>),
    Function(Box<FunctionIR>),
    /// A component expression nested inside another function body. Nested
    /// component declarations are never registry-wrapped — they stay a
    /// plain function, distinguished here only so the emitter still prints
    /// the `component` shape as a function.
    NestedComponent(Box<FunctionIR>),
    Block(Vec<StmtIR>),
    If { test: ExprIR, consequent: Box<StmtIR>, alternate: Option<Box<StmtIR>> },
    Switch { discriminant: ExprIR, cases: Vec<SwitchCaseIR> },
    For { init: Option<ForInitIR>, test: Option<ExprIR>, update: Option<ExprIR>, body: Box<StmtIR> },
    ForIn { left: ForInitIR, right: ExprIR, body: Box<StmtIR> },
    ForOf { left: ForInitIR, right: ExprIR, body: Box<StmtIR>, is_await: bool },
    While { test: ExprIR, body: Box<StmtIR> },
    DoWhile { body: Box<StmtIR>, test: ExprIR },
    Break(Option<String>),
    Continue(Option<String>),
    Return(Option<ExprIR>),
    Throw(ExprIR),
    Try { block: Vec<StmtIR>, handler: Option<CatchClauseIR>, finalizer: Option<Vec<StmtIR>> },
    Labeled { label: String, body: Box<StmtIR> },
    Expr(ExprIR),
    Empty,
    Enum(Box<EnumDecl>),
}

#[derive(Debug, Clone)]
pub struct CatchClauseIR {
    pub param: Option<Binding>,
    pub body: Vec<StmtIR>,
}

#[derive(Debug, Clone)]
pub struct SwitchCaseIR {
    pub test: Option<ExprIR>,
    pub consequent: Vec<StmtIR>,
}

#[derive(Debug, Clone)]
pub enum ForInitIR {
    Var(Box<VarDeclIR>),
    Expr(ExprIR),
}

#[derive(Debug, Clone)]
pub struct VarDeclIR {
    pub kind: VarKind,
    pub decls: Vec<VarDeclaratorIR>,
}

#[derive(Debug, Clone)]
pub struct VarDeclaratorIR {
    pub binding: Binding,
    pub init: Option<ExprIR>,
    /// Set for `const [getter, setter] = signal(...)` style destructured
    /// signal creation, so the emitter can print the original names
    /// untouched rather than the analyzer having renamed anything.
    pub destructuring_names: Option<(String, String)>,
    pub span: Span,
}

/// An expression node, normalized. Most variants are a direct structural
/// copy of `ExprKind`; `Call` carries the reactivity/control-flow flags the
/// analyzer computed, and JSX is lowered away entirely by pass 3 before the
/// emitter ever sees an `ExprKind::Jsx*` — so `ExprIR` has no JSX variant at
/// all, only `Element`.
#[derive(Debug, Clone)]
pub struct ExprIR {
    pub kind: ExprKindIR,
    pub span: Span,
}

impl ExprIR {
    pub fn new(kind: ExprKindIR, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKindIR {
    Null,
    Bool(bool),
    Number(f64),
    BigInt(String),
    String(String),
    Regex { pattern: String, flags: String },
    TemplateNoSub(String),
    Template { quasis: Vec<String>, exprs: Vec<Box<ExprIR>> },
    TaggedTemplate { tag: Box<ExprIR>, quasis: Vec<String>, exprs: Vec<Box<ExprIR>> },

    Ident(String),
    This,
    Super,

    Array(Vec<Option<Box<ExprIR>>>),
    Object(Vec<ObjectMemberIR>),
    Function(Box<FunctionIR>),
    Arrow(Box<ArrowFunctionIR>),

    Unary { op: UnaryOp, arg: Box<ExprIR> },
    Binary { op: BinaryOp, left: Box<ExprIR>, right: Box<ExprIR> },
    Logical { op: LogicalOp, left: Box<ExprIR>, right: Box<ExprIR> },
    Assign { op: AssignOp, left: Box<ExprIR>, right: Box<ExprIR> },
    Update { op: UpdateOp, prefix: bool, arg: Box<ExprIR> },
    Conditional { test: Box<ExprIR>, consequent: Box<ExprIR>, alternate: Box<ExprIR> },
    Sequence(Vec<ExprIR>),

    Member { object: Box<ExprIR>, property: Box<ExprIR>, computed: bool, optional: bool },
    Call(Box<CallExpressionIR>),
    New { callee: Box<ExprIR>, args: Vec<ExprIR> },

    Spread(Box<ExprIR>),
    Yield { arg: Option<Box<ExprIR>>, delegate: bool },
    Await(Box<ExprIR>),

    /// The lowered shape of every JSX element/fragment: `t_element(tag,
    /// props, children)`. Built directly by pass 3 rather than staying a
    /// distinct `ElementIR` node, so every later pass (reactivity
    /// normalization) just sees an ordinary call expression.
    Element(Box<ElementIR>),

    /// `(() => { const t0 = document.createTextNode(''); $REGISTRY.wire(t0,
    /// 'textContent', () => getter()); return t0; })()` — a deferred
    /// reactive text binding produced by pass 3 for a signal-getter call
    /// appearing as a direct JSX child expression. `var_name` is allocated
    /// once, by pass 3, from `PipelineContext::next_element_var` so it stays
    /// stable through emission without the emitter needing its own counter.
    WiredText { var_name: String, getter: Box<ExprIR> },
}

#[derive(Debug, Clone)]
pub struct ArrowFunctionIR {
    pub params: Vec<Param>,
    pub body: ArrowBodyIR,
    pub is_async: bool,
}

#[derive(Debug, Clone)]
pub enum ArrowBodyIR {
    Expr(Box<ExprIR>),
    Block(Vec<StmtIR>),
}

#[derive(Debug, Clone)]
pub enum ObjectMemberIR {
    Property { key: PropertyKey, value: ExprIR, kind: PropertyKind, shorthand: bool, computed: bool },
    Spread(Box<ExprIR>),
}

/// Flags computed by the analyzer and consumed by the transformer passes.
/// Control-flow tagging lives on `ElementIR` instead — `Show`/`For`/`Index`
/// are JSX tags, not call expressions, until JSX lowering rewrites them.
#[derive(Debug, Clone)]
pub struct CallExpressionIR {
    pub callee: ExprIR,
    pub args: Vec<ExprIR>,
    pub optional: bool,
    pub is_signal_creation: bool,
    pub is_signal_getter: bool,
    /// Callee resolves to `effect`/`createEffect` — recorded but does not
    /// bind a signal. Consumed by `passes::reactivity`, which renames the
    /// call site.
    pub is_effect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlowKind {
    Show,
    For,
    Index,
}

/// A JSX element or fragment, normalized but not yet lowered to a
/// `t_element(...)` call — the shape the analyzer and passes 1/2 operate on
/// before pass 3 rewrites it into an `ExprKindIR::Element` call.
#[derive(Debug, Clone)]
pub struct ElementIR {
    /// `None` for a fragment.
    pub tag_name: Option<JsxTagIR>,
    pub attributes: Vec<AttributeIR>,
    pub children: Vec<ChildIR>,
    /// True when every attribute value and every child is a compile-time
    /// constant (no signal-getter calls, no expression containers wrapping
    /// dynamic state) — carried for potential downstream optimizers; the
    /// core pipeline does not special-case it further.
    pub is_static: bool,
    pub is_fragment: bool,
    pub control_flow: Option<ControlFlowKind>,
}

#[derive(Debug, Clone)]
pub enum JsxTagIR {
    Intrinsic(String),
    Component(ExprIR),
}

#[derive(Debug, Clone)]
pub enum AttributeIR {
    KeyValue { key: String, value: ExprIR },
    Spread(ExprIR),
}

#[derive(Debug, Clone)]
pub enum ChildIR {
    Text(String),
    Expr(ExprIR),
}

/// A reactive text insertion at an element child position — the
/// not-yet-lowered counterpart of `ExprKindIR::WiredText`, used by the
/// analyzer to flag which JSX expression-container children are direct
/// signal-getter calls before pass 3 performs the actual rewrite.
#[derive(Debug, Clone)]
pub struct SignalBindingIR {
    pub getter: ExprIR,
    pub span: Span,
}
