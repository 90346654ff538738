//! AST → IR semantic analysis.
//!
//! The analyzer lowers the AST into IR in one recursive walk, resolving
//! imports up front and then threading an explicit `ScopeStack` through the
//! rest of the walk so that signal-getter classification and call-site
//! tagging see every binding in its correct lexical scope. Per the Design
//! Notes ("scope stack with arena indices, not cyclic references"), scopes
//! are frames on a plain `Vec`, not a graph of parent pointers — a frame's
//! parent is simply "the frame below it on the stack" for as long as it's
//! live.

use rustc_hash::FxHashMap;

use crate::ast::*;
use crate::diagnostics::{Diagnostic, Phase};
use crate::ir::*;
use crate::span::Span;

/// What an identifier was bound to, as far as reactivity classification
/// cares. Everything else (plain locals, parameters, component names) is
/// simply absent from the table — the analyzer only needs to remember
/// *signal getters*, since that's the one fact every later pass depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeBinding {
    SignalGetter,
}

#[derive(Debug, Clone)]
struct ImportBinding {
    source: String,
    imported_name: String,
}

/// Local names recognized as the runtime's signal/memo/effect constructors
/// when no import resolves them to anything else — the common case, since
/// components routinely call `signal(...)` with no import statement in
/// sight at all. An import that *does* bind these names to a different
/// source is still honored: resolution by identity takes priority over
/// resolution by name.
const SIGNAL_CTOR_NAMES: &[&str] = &["signal", "createSignal", "useState"];
const MEMO_CTOR_NAMES: &[&str] = &["computed", "createMemo"];
const EFFECT_NAMES: &[&str] = &["effect", "createEffect"];

pub struct Analyzer<'a> {
    source: &'a str,
    imports: FxHashMap<String, ImportBinding>,
    scopes: Vec<FxHashMap<String, ScopeBinding>>,
    diagnostics: Vec<Diagnostic>,
    strict: bool,
}

/// Analyze a parsed program, producing IR and accumulated diagnostics.
pub fn analyze(source: &str, program: &Program, strict: bool) -> (ModuleIR, Vec<Diagnostic>) {
    let mut analyzer = Analyzer {
        source,
        imports: FxHashMap::default(),
        scopes: vec![FxHashMap::default()],
        diagnostics: Vec::new(),
        strict,
    };
    let module = analyzer.analyze_program(program);
    (module, analyzer.diagnostics)
}

impl<'a> Analyzer<'a> {
    fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "the module-level scope frame is never popped");
    }

    fn declare(&mut self, name: &str, binding: ScopeBinding) {
        self.scopes.last_mut().expect("scope stack is never empty").insert(name.to_string(), binding);
    }

    fn resolve(&self, name: &str) -> Option<ScopeBinding> {
        self.scopes.iter().rev().find_map(|frame| frame.get(name).copied())
    }

    fn text(&self, span: Span) -> &'a str {
        self.source.get(span.start as usize..span.end as usize).unwrap_or("")
    }

    fn warn_or_err(&mut self, phase: Phase, message: impl Into<String>) {
        let diag = Diagnostic::warning(phase, message);
        self.diagnostics.push(if self.strict { diag.promote_if_warning() } else { diag });
    }

    // === Imports ===

    fn analyze_program(&mut self, program: &Program) -> ModuleIR {
        // Resolve every import up front so later classification can check
        // identity, not just name.
        for stmt in &program.stmts {
            if let StmtKind::Import(import) = &stmt.kind {
                self.register_import(import);
            }
        }

        let mut imports = Vec::new();
        let mut items = Vec::new();
        for stmt in &program.stmts {
            match &stmt.kind {
                StmtKind::Import(import) => imports.push(ImportItemIR::Import(self.lower_import(import))),
                StmtKind::Export(export) => imports.push(ImportItemIR::Export(self.lower_export(export))),
                _ => {
                    if let Some(item) = self.lower_top_level_stmt(stmt) {
                        items.push(item);
                    }
                }
            }
        }

        self.check_duplicate_exports(&imports);

        ModuleIR { imports, items, span: program.span }
    }

    /// A duplicate `export default` or a named export specifier re-exported
    /// twice under the same external name. Export-of-declaration names
    /// (`export component Foo`) aren't cross-checked against named
    /// re-exports — a narrower, still useful scope; see DESIGN.md.
    fn check_duplicate_exports(&mut self, imports: &[ImportItemIR]) {
        let mut seen_default = false;
        let mut seen_named: std::collections::HashSet<String> = std::collections::HashSet::new();
        for item in imports {
            let ImportItemIR::Export(export) = item else { continue };
            match export {
                ExportIR::Default(_) => {
                    if seen_default {
                        self.warn_or_err(Phase::Analyzer, "duplicate `export default` declaration");
                    }
                    seen_default = true;
                }
                ExportIR::Named { specifiers, .. } => {
                    for spec in specifiers {
                        if !seen_named.insert(spec.exported.clone()) {
                            self.warn_or_err(Phase::Analyzer, format!("duplicate export of `{}`", spec.exported));
                        }
                    }
                }
                ExportIR::Item(_) | ExportIR::All { .. } => {}
            }
        }
    }

    fn register_import(&mut self, import: &ImportDecl) {
        for specifier in &import.specifiers {
            let (local, imported_name) = match specifier {
                ImportSpecifier::Default { local, .. } => (local.clone(), "default".to_string()),
                ImportSpecifier::Namespace { local, .. } => (local.clone(), "*".to_string()),
                ImportSpecifier::Named { imported, local, .. } => (local.clone(), imported.clone()),
            };
            self.imports.insert(local, ImportBinding { source: import.source.clone(), imported_name });
        }
    }

    fn lower_import(&mut self, import: &ImportDecl) -> ImportIR {
        let specifiers = import
            .specifiers
            .iter()
            .map(|s| match s {
                ImportSpecifier::Default { local, .. } => ImportSpecifierIR::Default { local: local.clone() },
                ImportSpecifier::Namespace { local, .. } => ImportSpecifierIR::Namespace { local: local.clone() },
                ImportSpecifier::Named { imported, local, is_type, .. } => {
                    if *is_type || import.is_type_only {
                        ImportSpecifierIR::TypeOnly { imported: imported.clone(), local: local.clone() }
                    } else {
                        ImportSpecifierIR::Named { imported: imported.clone(), local: local.clone() }
                    }
                }
            })
            .collect();
        ImportIR { source: import.source.clone(), specifiers, span: import.span }
    }

    fn lower_export(&mut self, export: &ExportDecl) -> ExportIR {
        match export {
            ExportDecl::Named { specifiers, source, .. } => {
                ExportIR::Named { specifiers: specifiers.clone(), source: source.clone() }
            }
            ExportDecl::Default { expr, .. } => ExportIR::Default(Box::new(self.lower_expr(expr))),
            ExportDecl::All { exported, source, .. } => ExportIR::All { exported: exported.clone(), source: source.clone() },
            ExportDecl::Decl { decl, .. } => {
                let item = self.lower_top_level_stmt(decl).unwrap_or_else(|| {
                    ItemIR::Stmt(Box::new(StmtIR { kind: StmtKindIR::Empty, span: decl.span }))
                });
                ExportIR::Item(Box::new(item))
            }
        }
    }

    // === Top-level items ===

    fn lower_top_level_stmt(&mut self, stmt: &Stmt) -> Option<ItemIR> {
        match &stmt.kind {
            StmtKind::Component(decl) => Some(ItemIR::Component(Box::new(self.lower_component(decl)))),
            StmtKind::Function(func) => Some(ItemIR::Function(Box::new(self.lower_function(func)))),
            StmtKind::Var { kind, decls } => Some(ItemIR::Var(Box::new(self.lower_var_decl(*kind, decls)))),
            StmtKind::Enum(decl) => Some(ItemIR::Enum(decl.clone())),
            StmtKind::Interface(_) | StmtKind::TypeAlias(_) => None,
            StmtKind::Empty => None,
            _ => Some(ItemIR::Stmt(Box::new(self.lower_stmt(stmt)))),
        }
    }

    /// Component registration: every top-level `component` declaration gets
    /// a stable registry key. Nested functions
    /// inside the body are never registered as components themselves.
    fn lower_component(&mut self, decl: &ComponentDecl) -> ComponentIR {
        self.push_scope();
        self.declare_params(&decl.params);
        let body: Vec<StmtIR> = decl.body.iter().map(|s| self.lower_stmt(s)).collect();
        let uses_signals = body_uses_signal_getter(&body);
        self.pop_scope();

        ComponentIR {
            name: decl.name.clone(),
            params: decl.params.clone(),
            body,
            registry_key: format!("component:{}", decl.name),
            uses_signals,
            span: decl.span,
        }
    }

    fn lower_function(&mut self, func: &Function) -> FunctionIR {
        self.push_scope();
        self.declare_params(&func.params);
        let body = func.body.iter().map(|s| self.lower_stmt(s)).collect();
        self.pop_scope();
        FunctionIR {
            name: func.name.clone(),
            params: func.params.clone(),
            body,
            is_async: func.is_async,
            is_generator: func.is_generator,
            span: func.span,
        }
    }

    fn declare_params(&mut self, params: &[Param]) {
        for param in params {
            self.declare_binding_names(&param.binding);
        }
    }

    /// Declares every name a parameter or plain `let`/`const` binding
    /// introduces. Plain identifiers are never classified as signal
    /// getters here — only `classify_declarator`'s `[getter, setter] =
    /// signal(...)` and single-ident memo shapes earn that tag, so this
    /// just keeps names resolvable (absent from the getter set).
    fn declare_binding_names(&mut self, binding: &Binding) {
        match &binding.kind {
            BindingKind::Ident { name, .. } => {
                self.scopes.last_mut().expect("scope stack is never empty").remove(name);
            }
            BindingKind::Array { elements, .. } => {
                for element in elements.iter().flatten() {
                    self.declare_binding_names(&element.binding);
                }
            }
            BindingKind::Object { properties, .. } => {
                for prop in properties {
                    self.declare_binding_names(&prop.value);
                }
            }
        }
    }

    // === Statements ===

    fn lower_stmt(&mut self, stmt: &Stmt) -> StmtIR {
        let kind = match &stmt.kind {
            StmtKind::Var { kind, decls } => StmtKindIR::Var(Box::new(self.lower_var_decl(*kind, decls))),
            StmtKind::Function(func) => StmtKindIR::Function(Box::new(self.lower_function(func))),
            StmtKind::Component(decl) => {
                // Nested `component` expressions are never registry-wrapped
                // — lowered as a plain function IR instead.
                self.push_scope();
                self.declare_params(&decl.params);
                let body = decl.body.iter().map(|s| self.lower_stmt(s)).collect();
                self.pop_scope();
                StmtKindIR::NestedComponent(Box::new(FunctionIR {
                    name: Some(decl.name.clone()),
                    params: decl.params.clone(),
                    body,
                    is_async: false,
                    is_generator: false,
                    span: decl.span,
                }))
            }
            StmtKind::Block(stmts) => {
                self.push_scope();
                let lowered = stmts.iter().map(|s| self.lower_stmt(s)).collect();
                self.pop_scope();
                StmtKindIR::Block(lowered)
            }
            StmtKind::If { test, consequent, alternate } => StmtKindIR::If {
                test: self.lower_expr(test),
                consequent: Box::new(self.lower_stmt(consequent)),
                alternate: alternate.as_ref().map(|a| Box::new(self.lower_stmt(a))),
            },
            StmtKind::Switch { discriminant, cases } => {
                self.push_scope();
                let cases = cases
                    .iter()
                    .map(|c| SwitchCaseIR {
                        test: c.test.as_ref().map(|e| self.lower_expr(e)),
                        consequent: c.consequent.iter().map(|s| self.lower_stmt(s)).collect(),
                    })
                    .collect();
                self.pop_scope();
                StmtKindIR::Switch { discriminant: self.lower_expr(discriminant), cases }
            }
            StmtKind::For { init, test, update, body } => {
                self.push_scope();
                let init = init.as_ref().map(|i| self.lower_for_init(i));
                let test = test.as_ref().map(|e| self.lower_expr(e));
                let update = update.as_ref().map(|e| self.lower_expr(e));
                let body = Box::new(self.lower_stmt(body));
                self.pop_scope();
                StmtKindIR::For { init, test, update, body }
            }
            StmtKind::ForIn { left, right, body } => {
                self.push_scope();
                let left = self.lower_for_init(left);
                let right = self.lower_expr(right);
                let body = Box::new(self.lower_stmt(body));
                self.pop_scope();
                StmtKindIR::ForIn { left, right, body }
            }
            StmtKind::ForOf { left, right, body, is_await } => {
                self.push_scope();
                let left = self.lower_for_init(left);
                let right = self.lower_expr(right);
                let body = Box::new(self.lower_stmt(body));
                self.pop_scope();
                StmtKindIR::ForOf { left, right, body, is_await: *is_await }
            }
            StmtKind::While { test, body } => {
                StmtKindIR::While { test: self.lower_expr(test), body: Box::new(self.lower_stmt(body)) }
            }
            StmtKind::DoWhile { body, test } => {
                StmtKindIR::DoWhile { body: Box::new(self.lower_stmt(body)), test: self.lower_expr(test) }
            }
            StmtKind::Break { label } => StmtKindIR::Break(label.clone()),
            StmtKind::Continue { label } => StmtKindIR::Continue(label.clone()),
            StmtKind::Return { arg } => StmtKindIR::Return(arg.as_ref().map(|e| self.lower_expr(e))),
            StmtKind::Throw { arg } => StmtKindIR::Throw(self.lower_expr(arg)),
            StmtKind::Try { block, handler, finalizer } => {
                self.push_scope();
                let block = block.iter().map(|s| self.lower_stmt(s)).collect();
                self.pop_scope();
                let handler = handler.as_ref().map(|h| {
                    self.push_scope();
                    if let Some(param) = &h.param {
                        self.declare_binding_names(param);
                    }
                    let body = h.body.iter().map(|s| self.lower_stmt(s)).collect();
                    self.pop_scope();
                    CatchClauseIR { param: h.param.clone(), body }
                });
                let finalizer = finalizer.as_ref().map(|f| {
                    self.push_scope();
                    let lowered = f.iter().map(|s| self.lower_stmt(s)).collect();
                    self.pop_scope();
                    lowered
                });
                StmtKindIR::Try { block, handler, finalizer }
            }
            StmtKind::Labeled { label, body } => StmtKindIR::Labeled { label: label.clone(), body: Box::new(self.lower_stmt(body)) },
            StmtKind::Expr(expr) => StmtKindIR::Expr(self.lower_expr(expr)),
            StmtKind::Empty => StmtKindIR::Empty,
            StmtKind::Import(_) | StmtKind::Export(_) => {
                self.warn_or_err(Phase::Analyzer, "import/export declarations are only supported at the top level");
                StmtKindIR::Empty
            }
            StmtKind::Interface(_) | StmtKind::TypeAlias(_) => StmtKindIR::Empty,
            StmtKind::Enum(decl) => StmtKindIR::Enum(decl.clone()),
        };
        StmtIR { kind, span: stmt.span }
    }

    fn lower_for_init(&mut self, init: &ForInit) -> ForInitIR {
        match init {
            ForInit::Var { kind, decls } => ForInitIR::Var(Box::new(self.lower_var_decl(*kind, decls))),
            ForInit::Expr(expr) => ForInitIR::Expr(self.lower_expr(expr)),
        }
    }

    /// Signal classification and destructuring normalization, performed
    /// together since both hinge on the same pattern match over the
    /// declarator's binding shape.
    fn lower_var_decl(&mut self, kind: VarKind, decls: &[VarDeclarator]) -> VarDeclIR {
        let decls = decls
            .iter()
            .map(|decl| {
                let destructuring_names = self.classify_declarator(&decl.binding, decl.init.as_ref());
                let init = decl.init.as_ref().map(|e| self.lower_expr(e));
                if destructuring_names.is_none() {
                    self.declare_binding_names(&decl.binding);
                }
                VarDeclaratorIR { binding: decl.binding.clone(), init, destructuring_names, span: decl.span }
            })
            .collect();
        VarDeclIR { kind, decls }
    }

    /// Returns `Some((getter, setter))` if this declarator is a signal
    /// binding of the `const [g, s] = signal(...)` shape, or registers a
    /// single-identifier memo getter and returns `None` otherwise.
    fn classify_declarator(&mut self, binding: &Binding, init: Option<&Expr>) -> Option<(String, String)> {
        let init = init?;
        let ExprKind::Call { callee, .. } = &init.kind else { return None };
        let ExprKind::Ident(callee_name) = &callee.kind else { return None };

        if let BindingKind::Array { elements, .. } = &binding.kind {
            if elements.len() == 2 && self.is_signal_constructor(callee_name) {
                let getter = elements[0].as_ref().and_then(|e| ident_name(&e.binding));
                let setter = elements[1].as_ref().and_then(|e| ident_name(&e.binding));
                if let (Some(getter), Some(setter)) = (getter, setter) {
                    self.declare(&getter, ScopeBinding::SignalGetter);
                    return Some((getter, setter));
                }
            }
        }

        if let BindingKind::Ident { name, .. } = &binding.kind {
            if self.is_memo_constructor(callee_name) {
                self.declare(name, ScopeBinding::SignalGetter);
            }
        }

        None
    }

    fn is_signal_constructor(&self, name: &str) -> bool {
        self.imports.get(name).map(|b| is_known_core_import(&b.imported_name, SIGNAL_CTOR_NAMES)).unwrap_or(false)
            || SIGNAL_CTOR_NAMES.contains(&name)
    }

    fn is_memo_constructor(&self, name: &str) -> bool {
        self.imports.get(name).map(|b| is_known_core_import(&b.imported_name, MEMO_CTOR_NAMES)).unwrap_or(false)
            || MEMO_CTOR_NAMES.contains(&name)
    }

    fn is_effect_name(&self, name: &str) -> bool {
        self.imports.get(name).map(|b| is_known_core_import(&b.imported_name, EFFECT_NAMES)).unwrap_or(false)
            || EFFECT_NAMES.contains(&name)
    }

    // === Expressions ===

    fn lower_expr(&mut self, expr: &Expr) -> ExprIR {
        let span = expr.span;
        let kind = match &expr.kind {
            ExprKind::Null => ExprKindIR::Null,
            ExprKind::Bool(b) => ExprKindIR::Bool(*b),
            ExprKind::Number(n) => ExprKindIR::Number(*n),
            ExprKind::BigInt(s) => ExprKindIR::BigInt(s.clone()),
            ExprKind::String(s) => ExprKindIR::String(s.clone()),
            ExprKind::Regex { pattern, flags } => ExprKindIR::Regex { pattern: pattern.clone(), flags: flags.clone() },
            ExprKind::TemplateNoSub(s) => ExprKindIR::TemplateNoSub(s.clone()),
            ExprKind::Template { quasis, exprs } => ExprKindIR::Template {
                quasis: quasis.clone(),
                exprs: exprs.iter().map(|e| Box::new(self.lower_expr(e))).collect(),
            },
            ExprKind::TaggedTemplate { tag, quasis, exprs } => ExprKindIR::TaggedTemplate {
                tag: Box::new(self.lower_expr(tag)),
                quasis: quasis.clone(),
                exprs: exprs.iter().map(|e| Box::new(self.lower_expr(e))).collect(),
            },
            ExprKind::Ident(name) => ExprKindIR::Ident(name.clone()),
            ExprKind::This => ExprKindIR::This,
            ExprKind::Super => ExprKindIR::Super,
            ExprKind::Array(elements) => ExprKindIR::Array(
                elements.iter().map(|e| e.as_ref().map(|e| Box::new(self.lower_expr(e)))).collect(),
            ),
            ExprKind::Object(members) => ExprKindIR::Object(members.iter().map(|m| self.lower_object_member(m)).collect()),
            ExprKind::Function(func) => ExprKindIR::Function(Box::new(self.lower_function(func))),
            ExprKind::Arrow(arrow) => ExprKindIR::Arrow(Box::new(self.lower_arrow(arrow))),
            ExprKind::Unary { op, arg } => ExprKindIR::Unary { op: *op, arg: Box::new(self.lower_expr(arg)) },
            ExprKind::Binary { op, left, right } => {
                ExprKindIR::Binary { op: *op, left: Box::new(self.lower_expr(left)), right: Box::new(self.lower_expr(right)) }
            }
            ExprKind::Logical { op, left, right } => {
                ExprKindIR::Logical { op: *op, left: Box::new(self.lower_expr(left)), right: Box::new(self.lower_expr(right)) }
            }
            ExprKind::Assign { op, left, right } => {
                ExprKindIR::Assign { op: *op, left: Box::new(self.lower_expr(left)), right: Box::new(self.lower_expr(right)) }
            }
            ExprKind::Update { op, prefix, arg } => ExprKindIR::Update { op: *op, prefix: *prefix, arg: Box::new(self.lower_expr(arg)) },
            ExprKind::Conditional { test, consequent, alternate } => ExprKindIR::Conditional {
                test: Box::new(self.lower_expr(test)),
                consequent: Box::new(self.lower_expr(consequent)),
                alternate: Box::new(self.lower_expr(alternate)),
            },
            ExprKind::Sequence(exprs) => ExprKindIR::Sequence(exprs.iter().map(|e| self.lower_expr(e)).collect()),
            ExprKind::Member { object, property, computed, optional } => ExprKindIR::Member {
                object: Box::new(self.lower_expr(object)),
                property: Box::new(self.lower_expr(property)),
                computed: *computed,
                optional: *optional,
            },
            ExprKind::Call { callee, args, optional } => return self.lower_call(callee, args, *optional, span),
            ExprKind::New { callee, args } => {
                ExprKindIR::New { callee: Box::new(self.lower_expr(callee)), args: args.iter().map(|a| self.lower_expr(a)).collect() }
            }
            ExprKind::Spread(inner) => ExprKindIR::Spread(Box::new(self.lower_expr(inner))),
            ExprKind::Yield { arg, delegate } => {
                ExprKindIR::Yield { arg: arg.as_ref().map(|a| Box::new(self.lower_expr(a))), delegate: *delegate }
            }
            ExprKind::Await(inner) => ExprKindIR::Await(Box::new(self.lower_expr(inner))),
            ExprKind::TypeErased { expr, .. } => return self.lower_expr(expr),
            ExprKind::JsxElement(el) => ExprKindIR::Element(Box::new(self.lower_jsx_element(el))),
            ExprKind::JsxFragment(fr) => ExprKindIR::Element(Box::new(self.lower_jsx_fragment(fr))),
        };
        ExprIR::new(kind, span)
    }

    fn lower_call(&mut self, callee: &Expr, args: &[Expr], optional: bool, span: Span) -> ExprIR {
        let callee_ir = self.lower_expr(callee);
        let args_ir: Vec<ExprIR> = args.iter().map(|a| self.lower_expr(a)).collect();

        let callee_name = match &callee.kind {
            ExprKind::Ident(name) => Some(name.as_str()),
            _ => None,
        };

        let is_signal_creation = callee_name.map(|n| self.is_signal_constructor(n) || self.is_memo_constructor(n)).unwrap_or(false);
        let is_effect = callee_name.map(|n| self.is_effect_name(n)).unwrap_or(false);
        let is_signal_getter = args.is_empty()
            && callee_name.map(|n| matches!(self.resolve(n), Some(ScopeBinding::SignalGetter))).unwrap_or(false);

        ExprIR::new(
            ExprKindIR::Call(Box::new(CallExpressionIR {
                callee: callee_ir,
                args: args_ir,
                optional,
                is_signal_creation,
                is_signal_getter,
                is_effect,
            })),
            span,
        )
    }

    fn lower_object_member(&mut self, member: &ObjectMember) -> ObjectMemberIR {
        match member {
            ObjectMember::Property(p) => ObjectMemberIR::Property {
                key: p.key.clone(),
                value: self.lower_expr(&p.value),
                kind: p.kind,
                shorthand: p.shorthand,
                computed: p.computed,
            },
            ObjectMember::Spread(inner) => ObjectMemberIR::Spread(Box::new(self.lower_expr(inner))),
        }
    }

    fn lower_arrow(&mut self, arrow: &ArrowFunction) -> ArrowFunctionIR {
        self.push_scope();
        self.declare_params(&arrow.params);
        let body = match &arrow.body {
            ArrowBody::Expr(e) => ArrowBodyIR::Expr(Box::new(self.lower_expr(e))),
            ArrowBody::Block(stmts) => ArrowBodyIR::Block(stmts.iter().map(|s| self.lower_stmt(s)).collect()),
        };
        self.pop_scope();
        ArrowFunctionIR { params: arrow.params.clone(), body, is_async: arrow.is_async }
    }

    // === JSX ===

    fn lower_jsx_element(&mut self, el: &JsxElement) -> ElementIR {
        let control_flow = control_flow_kind(&el.opening.name);
        let tag_name = if el.opening.name.is_intrinsic() {
            JsxTagIR::Intrinsic(el.opening.name.as_source_text())
        } else {
            JsxTagIR::Component(self.lower_ident_as_expr(&el.opening.name))
        };
        let attributes = el.opening.attributes.iter().map(|a| self.lower_jsx_attribute(a)).collect();
        let children: Vec<ChildIR> = el.children.iter().filter_map(|c| self.lower_jsx_child(c)).collect();
        let is_static = attributes_are_static(&attributes) && children_are_static(&children);
        ElementIR { tag_name: Some(tag_name), attributes, children, is_static, is_fragment: false, control_flow }
    }

    fn lower_jsx_fragment(&mut self, fr: &JsxFragment) -> ElementIR {
        let children: Vec<ChildIR> = fr.children.iter().filter_map(|c| self.lower_jsx_child(c)).collect();
        let is_static = children_are_static(&children);
        ElementIR { tag_name: None, attributes: Vec::new(), children, is_static, is_fragment: true, control_flow: None }
    }

    fn lower_ident_as_expr(&mut self, name: &JsxElementName) -> ExprIR {
        match name {
            JsxElementName::Ident(s) => ExprIR::new(ExprKindIR::Ident(s.clone()), Span::default()),
            JsxElementName::MemberExpr(parts) => {
                let mut expr = ExprIR::new(ExprKindIR::Ident(parts[0].clone()), Span::default());
                for part in &parts[1..] {
                    expr = ExprIR::new(
                        ExprKindIR::Member {
                            object: Box::new(expr),
                            property: Box::new(ExprIR::new(ExprKindIR::Ident(part.clone()), Span::default())),
                            computed: false,
                            optional: false,
                        },
                        Span::default(),
                    );
                }
                expr
            }
        }
    }

    fn lower_jsx_attribute(&mut self, attr: &JsxAttribute) -> AttributeIR {
        match attr {
            JsxAttribute::Attribute { name, value, .. } => {
                let value = match value {
                    None => ExprIR::new(ExprKindIR::Bool(true), Span::default()),
                    Some(JsxAttrValue::String(s)) => ExprIR::new(ExprKindIR::String(s.clone()), Span::default()),
                    Some(JsxAttrValue::Expr(e)) => self.lower_expr(e),
                };
                AttributeIR::KeyValue { key: name.clone(), value }
            }
            JsxAttribute::Spread { argument, .. } => AttributeIR::Spread(self.lower_expr(argument)),
        }
    }

    fn lower_jsx_child(&mut self, child: &JsxChild) -> Option<ChildIR> {
        match child {
            JsxChild::Text(text) => Some(ChildIR::Text(text.clone())),
            JsxChild::Element(el) => {
                let element = self.lower_jsx_element(el);
                Some(ChildIR::Expr(ExprIR::new(ExprKindIR::Element(Box::new(element)), el.span)))
            }
            JsxChild::Fragment(fr) => {
                let element = self.lower_jsx_fragment(fr);
                Some(ChildIR::Expr(ExprIR::new(ExprKindIR::Element(Box::new(element)), fr.span)))
            }
            JsxChild::Expr(expr) => {
                if matches!(expr.kind, ExprKind::JsxElement(_) | ExprKind::JsxFragment(_)) {
                    // unreachable via the parser's grammar, but handled for
                    // completeness rather than panicking on unexpected input
                }
                let lowered = self.lower_expr(expr);
                Some(ChildIR::Expr(lowered))
            }
        }
    }
}

fn is_known_core_import(imported_name: &str, names: &[&str]) -> bool {
    names.contains(&imported_name)
}

fn ident_name(binding: &Binding) -> Option<String> {
    match &binding.kind {
        BindingKind::Ident { name, .. } => Some(name.clone()),
        _ => None,
    }
}

fn control_flow_kind(name: &JsxElementName) -> Option<ControlFlowKind> {
    let text = name.as_source_text();
    match text.as_str() {
        "Show" | "ShowRegistry" => Some(ControlFlowKind::Show),
        "For" | "ForRegistry" => Some(ControlFlowKind::For),
        "Index" => Some(ControlFlowKind::Index),
        _ => None,
    }
}

fn attributes_are_static(attributes: &[AttributeIR]) -> bool {
    attributes.iter().all(|a| match a {
        AttributeIR::KeyValue { value, .. } => expr_is_static(value),
        AttributeIR::Spread(_) => false,
    })
}

fn children_are_static(children: &[ChildIR]) -> bool {
    children.iter().all(|c| match c {
        ChildIR::Text(_) => true,
        ChildIR::Expr(e) => expr_is_static(e),
    })
}

/// Conservative: only literals and static elements/arrays of statics count.
/// Anything involving a call (signal getters foremost) is dynamic.
fn expr_is_static(expr: &ExprIR) -> bool {
    match &expr.kind {
        ExprKindIR::Null | ExprKindIR::Bool(_) | ExprKindIR::Number(_) | ExprKindIR::String(_) | ExprKindIR::TemplateNoSub(_) => true,
        ExprKindIR::Element(el) => el.is_static,
        _ => false,
    }
}

/// Whether any statement in a component body contains a signal-getter call,
/// used only to populate `ComponentIR::usesSignals` (a descriptive flag; no
/// pass currently branches on it).
fn body_uses_signal_getter(body: &[StmtIR]) -> bool {
    body.iter().any(stmt_uses_signal_getter)
}

fn stmt_uses_signal_getter(stmt: &StmtIR) -> bool {
    match &stmt.kind {
        StmtKindIR::Var(decl) => decl.decls.iter().any(|d| d.init.as_ref().map(expr_uses_signal_getter).unwrap_or(false) || d.destructuring_names.is_some()),
        StmtKindIR::Expr(e) => expr_uses_signal_getter(e),
        StmtKindIR::Return(Some(e)) => expr_uses_signal_getter(e),
        StmtKindIR::Block(stmts) => body_uses_signal_getter(stmts),
        StmtKindIR::If { consequent, alternate, .. } => {
            stmt_uses_signal_getter(consequent) || alternate.as_ref().map(|a| stmt_uses_signal_getter(a)).unwrap_or(false)
        }
        _ => false,
    }
}

fn expr_uses_signal_getter(expr: &ExprIR) -> bool {
    match &expr.kind {
        ExprKindIR::Call(call) => call.is_signal_getter || call.args.iter().any(expr_uses_signal_getter),
        ExprKindIR::Element(el) => el.children.iter().any(|c| matches!(c, ChildIR::Expr(e) if expr_uses_signal_getter(e))),
        ExprKindIR::Binary { left, right, .. } | ExprKindIR::Logical { left, right, .. } => {
            expr_uses_signal_getter(left) || expr_uses_signal_getter(right)
        }
        ExprKindIR::Member { object, .. } => expr_uses_signal_getter(object),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn analyze_ok(source: &str) -> ModuleIR {
        let (program, parse_diags) = parse(source);
        assert!(parse_diags.is_empty(), "unexpected parse diagnostics: {parse_diags:?}");
        let (module, diags) = analyze(source, &program, false);
        for d in &diags {
            assert_ne!(d.severity, crate::diagnostics::Severity::Error, "{d:?}");
        }
        module
    }

    #[test]
    fn classifies_array_destructured_signal_as_getter() {
        let module = analyze_ok("component C() { const [count, setCount] = signal(0); return count(); }");
        let ItemIR::Component(c) = &module.items[0] else { panic!("expected a component") };
        let StmtKindIR::Var(decl) = &c.body[0].kind else { panic!("expected a var decl") };
        assert_eq!(decl.decls[0].destructuring_names, Some(("count".into(), "setCount".into())));

        let StmtKindIR::Return(Some(ret)) = &c.body[1].kind else { panic!("expected a return") };
        let ExprKindIR::Call(call) = &ret.kind else { panic!("expected a call") };
        assert!(call.is_signal_getter);
    }

    #[test]
    fn classifies_memo_single_ident_as_getter() {
        let module = analyze_ok("component C() { const doubled = computed(() => 2); return doubled(); }");
        let ItemIR::Component(c) = &module.items[0] else { panic!("expected a component") };
        let StmtKindIR::Return(Some(ret)) = &c.body[1].kind else { panic!("expected a return") };
        let ExprKindIR::Call(call) = &ret.kind else { panic!("expected a call") };
        assert!(call.is_signal_getter);
    }

    #[test]
    fn tags_control_flow_jsx_tags() {
        let module = analyze_ok("const el = <Show when={true}><p/></Show>;");
        let ItemIR::Var(decl) = &module.items[0] else { panic!("expected a var decl") };
        let init = decl.decls[0].init.as_ref().unwrap();
        let ExprKindIR::Element(el) = &init.kind else { panic!("expected an element") };
        assert_eq!(el.control_flow, Some(ControlFlowKind::Show));
    }

    #[test]
    fn undeclared_signal_call_is_not_tagged_a_getter() {
        let module = analyze_ok("component C() { return mystery(); }");
        let ItemIR::Component(c) = &module.items[0] else { panic!("expected a component") };
        let StmtKindIR::Return(Some(ret)) = &c.body[0].kind else { panic!("expected a return") };
        let ExprKindIR::Call(call) = &ret.kind else { panic!("expected a call") };
        assert!(!call.is_signal_getter);
    }
}
