//! AST node types for the dialect.
//!
//! Everything is an expression, a binding, or a statement — no separate
//! reflective node hierarchy. Type annotations are never built into a type
//! tree: they are opaque, lexeme-only spans that the transformer erases
//! outright.

use crate::span::Span;

/// The root AST for one parsed compilation unit.
#[derive(Debug, Clone)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Null,
    Bool(bool),
    Number(f64),
    BigInt(String),
    String(String),
    Regex { pattern: String, flags: String },
    TemplateNoSub(String),
    Template { quasis: Vec<String>, exprs: Vec<Box<Expr>> },
    TaggedTemplate { tag: Box<Expr>, quasis: Vec<String>, exprs: Vec<Box<Expr>> },

    Ident(String),
    This,
    Super,

    Array(Vec<Option<Box<Expr>>>),
    Object(Vec<ObjectMember>),
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),

    Unary { op: UnaryOp, arg: Box<Expr> },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Logical { op: LogicalOp, left: Box<Expr>, right: Box<Expr> },
    Assign { op: AssignOp, left: Box<Expr>, right: Box<Expr> },
    Update { op: UpdateOp, prefix: bool, arg: Box<Expr> },
    Conditional { test: Box<Expr>, consequent: Box<Expr>, alternate: Box<Expr> },
    Sequence(Vec<Expr>),

    Member { object: Box<Expr>, property: Box<Expr>, computed: bool, optional: bool },
    Call { callee: Box<Expr>, args: Vec<Expr>, optional: bool },
    New { callee: Box<Expr>, args: Vec<Expr> },

    Spread(Box<Expr>),
    Yield { arg: Option<Box<Expr>>, delegate: bool },
    Await(Box<Expr>),

    /// A type annotation erased onto an expression, e.g. `x as Foo`,
    /// `x satisfies Foo`, `x!`. The annotation span is kept only for
    /// diagnostics; it carries no semantic weight downstream.
    TypeErased { expr: Box<Expr>, annotation: Option<TypeSpan> },

    JsxElement(Box<JsxElement>),
    JsxFragment(Box<JsxFragment>),
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Var { kind: VarKind, decls: Vec<VarDeclarator> },
    Function(Box<Function>),
    Component(Box<ComponentDecl>),

    Block(Vec<Stmt>),
    If { test: Expr, consequent: Box<Stmt>, alternate: Option<Box<Stmt>> },
    Switch { discriminant: Expr, cases: Vec<SwitchCase> },
    For { init: Option<ForInit>, test: Option<Expr>, update: Option<Expr>, body: Box<Stmt> },
    ForIn { left: ForInit, right: Expr, body: Box<Stmt> },
    ForOf { left: ForInit, right: Expr, body: Box<Stmt>, is_await: bool },
    While { test: Expr, body: Box<Stmt> },
    DoWhile { body: Box<Stmt>, test: Expr },
    Break { label: Option<String> },
    Continue { label: Option<String> },
    Return { arg: Option<Expr> },
    Throw { arg: Expr },
    Try { block: Vec<Stmt>, handler: Option<CatchClause>, finalizer: Option<Vec<Stmt>> },
    Labeled { label: String, body: Box<Stmt> },

    Expr(Expr),
    Empty,

    Import(Box<ImportDecl>),
    Export(Box<ExportDecl>),

    /// `interface Foo { ... }` — fully erased on emission; kept only so
    /// diagnostics can point at it.
    Interface(Box<InterfaceDecl>),
    /// `type Foo = ...` — fully erased on emission.
    TypeAlias(Box<TypeAliasDecl>),
    /// `enum Foo { ... }` — the one type-level declaration that survives
    /// emission, lowered to a plain object literal (see `passes::reactivity`
    /// is not involved; lowering happens directly in the emitter's
    /// declaration printer, since no reactive semantics apply).
    Enum(Box<EnumDecl>),
}

// =============================================================================
// Bindings (patterns)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub kind: BindingKind,
    pub span: Span,
}

impl Binding {
    pub fn new(kind: BindingKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindingKind {
    Ident { name: String, type_ann: Option<TypeSpan> },
    Array { elements: Vec<Option<ArrayPatternElement>>, type_ann: Option<TypeSpan> },
    Object { properties: Vec<ObjectPatternProperty>, type_ann: Option<TypeSpan> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPatternElement {
    pub binding: Binding,
    pub default: Option<Expr>,
    pub rest: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPatternProperty {
    pub key: PropertyKey,
    pub value: Binding,
    pub default: Option<Expr>,
    pub shorthand: bool,
    pub rest: bool,
}

// =============================================================================
// Supporting types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    BitNot,
    Typeof,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    UShr,
    In,
    Instanceof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    NullishCoalesce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    BitOrAssign,
    BitXorAssign,
    BitAndAssign,
    AndAssign,
    OrAssign,
    NullishAssign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub binding: Binding,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    Property(Property),
    Spread(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
    pub kind: PropertyKind,
    pub shorthand: bool,
    pub computed: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Ident(String),
    String(String),
    Number(f64),
    Computed(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
    Method,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub consequent: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<Binding>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Var { kind: VarKind, decls: Vec<VarDeclarator> },
    Expr(Expr),
}

// =============================================================================
// Functions and components
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
    pub return_type: Option<TypeSpan>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Param>,
    pub body: ArrowBody,
    pub is_async: bool,
    pub return_type: Option<TypeSpan>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub binding: Binding,
    pub default: Option<Expr>,
    pub rest: bool,
    pub span: Span,
}

/// `component Name<TypeParams?>(params) { body }`. Type params are parsed
/// and immediately discarded (opaque span only) since generics carry no
/// runtime meaning once erased.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDecl {
    pub name: String,
    pub type_params: Option<TypeSpan>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub return_type: Option<TypeSpan>,
    pub span: Span,
}

// =============================================================================
// Modules
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    pub is_type_only: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    Default { local: String, span: Span },
    Namespace { local: String, span: Span },
    Named { imported: String, local: String, is_type: bool, span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportDecl {
    Named { specifiers: Vec<ExportSpecifier>, source: Option<String>, is_type_only: bool, span: Span },
    Default { expr: Expr, span: Span },
    Decl { decl: Box<Stmt>, span: Span },
    All { exported: Option<String>, source: String, span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
    pub is_type: bool,
    pub span: Span,
}

// =============================================================================
// JSX
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub opening: JsxOpeningElement,
    pub children: Vec<JsxChild>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsxFragment {
    pub children: Vec<JsxChild>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsxOpeningElement {
    pub name: JsxElementName,
    pub attributes: Vec<JsxAttribute>,
    pub self_closing: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxElementName {
    Ident(String),
    MemberExpr(Vec<String>),
}

impl JsxElementName {
    /// A tag is an intrinsic (lowercase) HTML tag if its first segment
    /// starts with a lowercase letter; otherwise it is a component reference.
    pub fn is_intrinsic(&self) -> bool {
        let first = match self {
            JsxElementName::Ident(s) => s.as_str(),
            JsxElementName::MemberExpr(parts) => parts.first().map(String::as_str).unwrap_or(""),
        };
        first.chars().next().map(|c| c.is_lowercase()).unwrap_or(false)
    }

    pub fn as_source_text(&self) -> String {
        match self {
            JsxElementName::Ident(s) => s.clone(),
            JsxElementName::MemberExpr(parts) => parts.join("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttribute {
    Attribute { name: String, value: Option<JsxAttrValue>, span: Span },
    Spread { argument: Expr, span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttrValue {
    String(String),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    Text(String),
    Element(Box<JsxElement>),
    Fragment(Box<JsxFragment>),
    Expr(Box<Expr>),
}

// =============================================================================
// Type annotations (opaque, erased)
// =============================================================================

/// A type annotation, stored only as its source span. The parser consumes
/// and discards the grammar of the annotation; nothing downstream inspects
/// its shape. See `parser::types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpan(pub Span);

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub is_const: bool,
    pub members: Vec<EnumMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub init: Option<Expr>,
    pub span: Span,
}
