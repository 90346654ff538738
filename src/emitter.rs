//! Walks the final IR and prints ECMAScript text with a deterministic
//! import preamble: an output buffer, an indent level/string, and one
//! `emit_*` method per node shape, covering the narrower set of IR node
//! kinds this crate ever has to print since minification and source maps
//! are out of scope.
//!
//! Pure with respect to its input: two calls on equal IR produce
//! byte-identical output.

use crate::ast::{
    AssignOp, Binding, BindingKind, BinaryOp, EnumDecl, ExportSpecifier, LogicalOp, Param, PropertyKey, PropertyKind, UnaryOp, UpdateOp,
    VarKind,
};
use crate::import_tracker::normalize_source;
use crate::ir::*;
use crate::options::EmitterOptions;

pub struct Emitter<'a> {
    options: &'a EmitterOptions,
    output: String,
    indent_level: usize,
}

pub fn emit(module: &ModuleIR, imports: &[(String, Vec<ImportSpecifierIR>)], options: &EmitterOptions) -> String {
    let mut emitter = Emitter { options, output: String::new(), indent_level: 0 };
    emitter.emit_preamble(imports);
    for import_item in &module.imports {
        if let ImportItemIR::Import(i) = import_item {
            emitter.emit_import_line(&i.source, &i.specifiers);
        }
    }
    // Declarations reachable only through `export ...` live in `module.imports`
    // (see `ImportItemIR::Export`), not `module.items` — printed here, ahead
    // of non-exported items, since the two lists no longer carry their
    // original relative source order once split apart by the analyzer.
    for import_item in &module.imports {
        if let ImportItemIR::Export(export) = import_item {
            emitter.emit_export(export);
        }
    }
    for item in &module.items {
        emitter.emit_item(item);
        emitter.output.push('\n');
    }
    emitter.output
}

impl<'a> Emitter<'a> {
    fn indent_str(&self) -> String {
        self.options.indent.as_str().repeat(self.indent_level)
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(&self.indent_str());
        self.output.push_str(text);
        self.output.push('\n');
    }

    // === Preamble ===

    fn emit_preamble(&mut self, imports: &[(String, Vec<ImportSpecifierIR>)]) {
        for (source, specifiers) in imports {
            self.emit_import_line(source, specifiers);
        }
        if !imports.is_empty() {
            self.output.push('\n');
        }
    }

    fn emit_import_line(&mut self, source: &str, specifiers: &[ImportSpecifierIR]) {
        let mut default_part = None;
        let mut namespace_part = None;
        let mut named_parts = Vec::new();
        for spec in specifiers {
            match spec {
                ImportSpecifierIR::Default { local } => default_part = Some(local.clone()),
                ImportSpecifierIR::Namespace { local } => namespace_part = Some(format!("* as {local}")),
                ImportSpecifierIR::Named { imported, local } => {
                    named_parts.push(if imported == local { imported.clone() } else { format!("{imported} as {local}") });
                }
                ImportSpecifierIR::TypeOnly { .. } => {}
            }
        }

        let mut clauses = Vec::new();
        if let Some(d) = default_part {
            clauses.push(d);
        }
        if let Some(n) = namespace_part {
            clauses.push(n);
        }
        if !named_parts.is_empty() {
            clauses.push(format!("{{ {} }}", named_parts.join(", ")));
        }
        if clauses.is_empty() {
            return;
        }
        self.line(&format!("import {} from {};", clauses.join(", "), self.quote_string(source)));
    }

    // === Exports ===

    fn emit_export(&mut self, export: &ExportIR) {
        match export {
            ExportIR::Named { specifiers, source } => {
                let list = render_export_specifiers(specifiers);
                match source {
                    Some(src) => self.line(&format!("export {{ {list} }} from {};", self.quote_string(src))),
                    None => self.line(&format!("export {{ {list} }};")),
                }
            }
            ExportIR::All { exported, source } => {
                let src = self.quote_string(source);
                match exported {
                    Some(name) => self.line(&format!("export * as {name} from {src};")),
                    None => self.line(&format!("export * from {src};")),
                }
            }
            ExportIR::Default(expr) => self.line(&format!("export default {};", self.render_expr(expr))),
            ExportIR::Item(item) => {
                // Top-level only (the `export` grammar never nests), so
                // emitting "export " at indent 0 and letting `emit_item` print
                // the declaration right after it is always correct.
                self.output.push_str("export ");
                self.emit_item(item);
            }
        }
        self.output.push('\n');
    }

    // === Items ===

    fn emit_item(&mut self, item: &ItemIR) {
        match item {
            ItemIR::Component(c) => self.emit_component(c),
            ItemIR::Function(f) => self.emit_function(f, true),
            ItemIR::Var(decl) => {
                let text = self.render_var_decl(decl);
                self.line(&format!("{text};"));
            }
            ItemIR::Stmt(s) => self.emit_stmt(s),
            ItemIR::Enum(e) => self.emit_enum(e),
        }
    }

    fn emit_component(&mut self, c: &ComponentIR) {
        let params = self.render_params(&c.params);
        self.line(&format!("function {}({}) {{", c.name, params));
        self.indent_level += 1;
        for stmt in &c.body {
            self.emit_stmt(stmt);
        }
        self.indent_level -= 1;
        self.line("}");
    }

    fn emit_function(&mut self, f: &FunctionIR, top_level: bool) {
        let name = f.name.as_deref().unwrap_or("");
        let prefix = if f.is_async { "async function" } else { "function" };
        let star = if f.is_generator { "*" } else { "" };
        let params = self.render_params(&f.params);
        let _ = top_level;
        self.line(&format!("{prefix}{star} {name}({params}) {{"));
        self.indent_level += 1;
        for stmt in &f.body {
            self.emit_stmt(stmt);
        }
        self.indent_level -= 1;
        self.line("}");
    }

    fn emit_enum(&mut self, e: &EnumDecl) {
        self.line(&format!("const {} = {{", e.name));
        self.indent_level += 1;
        for (i, member) in e.members.iter().enumerate() {
            let value = match &member.init {
                Some(expr) => self.render_expr_from_ast(expr),
                None => i.to_string(),
            };
            self.line(&format!("{}: {},", member.name, value));
        }
        self.indent_level -= 1;
        self.line("};");
    }

    // === Statements ===

    fn emit_stmt(&mut self, stmt: &StmtIR) {
        match &stmt.kind {
            StmtKindIR::Var(decl) => self.line(&format!("{};", self.render_var_decl(decl))),
            StmtKindIR::Function(f) => self.emit_function(f, false),
            StmtKindIR::NestedComponent(f) => self.emit_function(f, false),
            StmtKindIR::Block(stmts) => {
                self.line("{");
                self.indent_level += 1;
                for s in stmts {
                    self.emit_stmt(s);
                }
                self.indent_level -= 1;
                self.line("}");
            }
            StmtKindIR::If { test, consequent, alternate } => {
                self.line(&format!("if ({}) {{", self.render_expr(test)));
                self.indent_level += 1;
                self.emit_stmt(consequent);
                self.indent_level -= 1;
                if let Some(alt) = alternate {
                    self.line("} else {");
                    self.indent_level += 1;
                    self.emit_stmt(alt);
                    self.indent_level -= 1;
                }
                self.line("}");
            }
            StmtKindIR::Switch { discriminant, cases } => {
                self.line(&format!("switch ({}) {{", self.render_expr(discriminant)));
                self.indent_level += 1;
                for case in cases {
                    match &case.test {
                        Some(t) => self.line(&format!("case {}:", self.render_expr(t))),
                        None => self.line("default:"),
                    }
                    self.indent_level += 1;
                    for s in &case.consequent {
                        self.emit_stmt(s);
                    }
                    self.indent_level -= 1;
                }
                self.indent_level -= 1;
                self.line("}");
            }
            StmtKindIR::For { init, test, update, body } => {
                let init_s = init.as_ref().map(|i| self.render_for_init(i)).unwrap_or_default();
                let test_s = test.as_ref().map(|t| self.render_expr(t)).unwrap_or_default();
                let update_s = update.as_ref().map(|u| self.render_expr(u)).unwrap_or_default();
                self.line(&format!("for ({init_s}; {test_s}; {update_s}) {{"));
                self.indent_level += 1;
                self.emit_stmt(body);
                self.indent_level -= 1;
                self.line("}");
            }
            StmtKindIR::ForIn { left, right, body } => {
                self.line(&format!("for ({} in {}) {{", self.render_for_init(left), self.render_expr(right)));
                self.indent_level += 1;
                self.emit_stmt(body);
                self.indent_level -= 1;
                self.line("}");
            }
            StmtKindIR::ForOf { left, right, body, is_await } => {
                let await_kw = if *is_await { " await" } else { "" };
                self.line(&format!("for{await_kw} ({} of {}) {{", self.render_for_init(left), self.render_expr(right)));
                self.indent_level += 1;
                self.emit_stmt(body);
                self.indent_level -= 1;
                self.line("}");
            }
            StmtKindIR::While { test, body } => {
                self.line(&format!("while ({}) {{", self.render_expr(test)));
                self.indent_level += 1;
                self.emit_stmt(body);
                self.indent_level -= 1;
                self.line("}");
            }
            StmtKindIR::DoWhile { body, test } => {
                self.line("do {");
                self.indent_level += 1;
                self.emit_stmt(body);
                self.indent_level -= 1;
                self.line(&format!("}} while ({});", self.render_expr(test)));
            }
            StmtKindIR::Break(label) => self.line(&format!("break{};", label.as_ref().map(|l| format!(" {l}")).unwrap_or_default())),
            StmtKindIR::Continue(label) => self.line(&format!("continue{};", label.as_ref().map(|l| format!(" {l}")).unwrap_or_default())),
            StmtKindIR::Return(expr) => match expr {
                Some(e) => self.line(&format!("return {};", self.render_expr(e))),
                None => self.line("return;"),
            },
            StmtKindIR::Throw(e) => self.line(&format!("throw {};", self.render_expr(e))),
            StmtKindIR::Try { block, handler, finalizer } => {
                self.line("try {");
                self.indent_level += 1;
                for s in block {
                    self.emit_stmt(s);
                }
                self.indent_level -= 1;
                if let Some(h) = handler {
                    let param = h.param.as_ref().map(|p| format!("({})", self.render_binding(p))).unwrap_or_default();
                    self.line(&format!("}} catch {param} {{"));
                    self.indent_level += 1;
                    for s in &h.body {
                        self.emit_stmt(s);
                    }
                    self.indent_level -= 1;
                }
                if let Some(fin) = finalizer {
                    self.line("} finally {");
                    self.indent_level += 1;
                    for s in fin {
                        self.emit_stmt(s);
                    }
                    self.indent_level -= 1;
                }
                self.line("}");
            }
            StmtKindIR::Labeled { label, body } => {
                self.line(&format!("{label}:"));
                self.emit_stmt(body);
            }
            StmtKindIR::Expr(e) => self.line(&format!("{};", self.render_expr(e))),
            StmtKindIR::Empty => {}
            StmtKindIR::Enum(e) => self.emit_enum(e),
        }
    }

    fn render_for_init(&self, init: &ForInitIR) -> String {
        match init {
            ForInitIR::Var(decl) => self.render_var_decl(decl),
            ForInitIR::Expr(e) => self.render_expr(e),
        }
    }

    fn render_var_decl(&self, decl: &VarDeclIR) -> String {
        let kw = match decl.kind {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        };
        let decls = decl.decls.iter().map(|d| self.render_declarator(d)).collect::<Vec<_>>().join(", ");
        format!("{kw} {decls}")
    }

    fn render_declarator(&self, d: &VarDeclaratorIR) -> String {
        let lhs = if let Some((getter, setter)) = &d.destructuring_names {
            format!("[{getter}, {setter}]")
        } else {
            self.render_binding(&d.binding)
        };
        match &d.init {
            Some(init) => format!("{lhs} = {}", self.render_expr(init)),
            None => lhs,
        }
    }

    fn render_binding(&self, binding: &Binding) -> String {
        match &binding.kind {
            BindingKind::Ident { name, .. } => name.clone(),
            BindingKind::Array { elements, .. } => {
                let parts = elements
                    .iter()
                    .map(|el| match el {
                        None => String::new(),
                        Some(e) => {
                            let prefix = if e.rest { "..." } else { "" };
                            let base = self.render_binding(&e.binding);
                            match &e.default {
                                Some(d) => format!("{prefix}{base} = {}", self.render_expr_from_ast(d)),
                                None => format!("{prefix}{base}"),
                            }
                        }
                    })
                    .collect::<Vec<_>>();
                format!("[{}]", parts.join(", "))
            }
            BindingKind::Object { properties, .. } => {
                let parts = properties
                    .iter()
                    .map(|p| {
                        let prefix = if p.rest { "..." } else { "" };
                        let key = self.render_property_key(&p.key);
                        let value = self.render_binding(&p.value);
                        let base = if p.shorthand { key.clone() } else { format!("{key}: {value}") };
                        match &p.default {
                            Some(d) => format!("{prefix}{base} = {}", self.render_expr_from_ast(d)),
                            None => format!("{prefix}{base}"),
                        }
                    })
                    .collect::<Vec<_>>();
                format!("{{ {} }}", parts.join(", "))
            }
        }
    }

    fn render_property_key(&self, key: &PropertyKey) -> String {
        match key {
            PropertyKey::Ident(s) => s.clone(),
            PropertyKey::String(s) => self.quote_string(s),
            PropertyKey::Number(n) => format_number(*n),
            PropertyKey::Computed(e) => format!("[{}]", self.render_expr_from_ast(e)),
        }
    }

    fn render_params(&self, params: &[Param]) -> String {
        params
            .iter()
            .map(|p| {
                let prefix = if p.rest { "..." } else { "" };
                let base = self.render_binding(&p.binding);
                match &p.default {
                    Some(d) => format!("{prefix}{base} = {}", self.render_expr_from_ast(d)),
                    None => format!("{prefix}{base}"),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Default-value expressions in bindings/params stay as plain AST (the
    /// analyzer never lowers them, since a default value can't itself be
    /// JSX or a signal reference worth tagging — see `ast::Param`).
    fn render_expr_from_ast(&self, expr: &crate::ast::Expr) -> String {
        use crate::ast::ExprKind;
        match &expr.kind {
            ExprKind::Null => "null".to_string(),
            ExprKind::Bool(b) => b.to_string(),
            ExprKind::Number(n) => format_number(*n),
            ExprKind::String(s) => self.quote_string(s),
            ExprKind::Ident(s) => s.clone(),
            ExprKind::TemplateNoSub(s) => format!("`{s}`"),
            ExprKind::Array(_) | ExprKind::Object(_) => "/* unsupported default */ undefined".to_string(),
            _ => "/* unsupported default */ undefined".to_string(),
        }
    }

    // === Expressions ===

    fn render_expr(&self, expr: &ExprIR) -> String {
        match &expr.kind {
            ExprKindIR::Null => "null".to_string(),
            ExprKindIR::Bool(b) => b.to_string(),
            ExprKindIR::Number(n) => format_number(*n),
            ExprKindIR::BigInt(s) => format!("{s}n"),
            ExprKindIR::String(s) => self.quote_string(s),
            ExprKindIR::Regex { pattern, flags } => format!("/{pattern}/{flags}"),
            ExprKindIR::TemplateNoSub(s) => format!("`{s}`"),
            ExprKindIR::Template { quasis, exprs } => self.render_template(quasis, exprs),
            ExprKindIR::TaggedTemplate { tag, quasis, exprs } => format!("{}{}", self.render_sub(tag), self.render_template(quasis, exprs)),
            ExprKindIR::Ident(name) => name.clone(),
            ExprKindIR::This => "this".to_string(),
            ExprKindIR::Super => "super".to_string(),
            ExprKindIR::Array(elements) => {
                let parts = elements.iter().map(|e| e.as_ref().map(|e| self.render_expr(e)).unwrap_or_default()).collect::<Vec<_>>();
                format!("[{}]", parts.join(", "))
            }
            ExprKindIR::Object(members) => self.render_object(members),
            ExprKindIR::Function(f) => self.render_function_expr(f),
            ExprKindIR::Arrow(a) => self.render_arrow(a),
            ExprKindIR::Unary { op, arg } => format!("{}{}", unary_op_str(*op), self.render_sub(arg)),
            ExprKindIR::Binary { op, left, right } => format!("{} {} {}", self.render_sub(left), binary_op_str(*op), self.render_sub(right)),
            ExprKindIR::Logical { op, left, right } => format!("{} {} {}", self.render_sub(left), logical_op_str(*op), self.render_sub(right)),
            ExprKindIR::Assign { op, left, right } => format!("{} {} {}", self.render_expr(left), assign_op_str(*op), self.render_expr(right)),
            ExprKindIR::Update { op, prefix, arg } => {
                let sym = if *op == UpdateOp::Increment { "++" } else { "--" };
                if *prefix { format!("{sym}{}", self.render_sub(arg)) } else { format!("{}{sym}", self.render_sub(arg)) }
            }
            ExprKindIR::Conditional { test, consequent, alternate } => {
                format!("{} ? {} : {}", self.render_sub(test), self.render_expr(consequent), self.render_expr(alternate))
            }
            ExprKindIR::Sequence(exprs) => exprs.iter().map(|e| self.render_expr(e)).collect::<Vec<_>>().join(", "),
            ExprKindIR::Member { object, property, computed, optional } => {
                let opt = if *optional { "?." } else { "" };
                if *computed {
                    format!("{}{opt}[{}]", self.render_sub(object), self.render_expr(property))
                } else {
                    let dot = if *optional { "?." } else { "." };
                    format!("{}{dot}{}", self.render_sub(object), self.render_expr(property))
                }
            }
            ExprKindIR::Call(c) => {
                let opt = if c.optional { "?." } else { "" };
                let args = c.args.iter().map(|a| self.render_expr(a)).collect::<Vec<_>>().join(", ");
                format!("{}{opt}({args})", self.render_sub(&c.callee))
            }
            ExprKindIR::New { callee, args } => {
                let args = args.iter().map(|a| self.render_expr(a)).collect::<Vec<_>>().join(", ");
                format!("new {}({args})", self.render_sub(callee))
            }
            ExprKindIR::Spread(e) => format!("...{}", self.render_expr(e)),
            ExprKindIR::Yield { arg, delegate } => {
                let star = if *delegate { "*" } else { "" };
                match arg {
                    Some(a) => format!("yield{star} {}", self.render_expr(a)),
                    None => format!("yield{star}"),
                }
            }
            ExprKindIR::Await(e) => format!("await {}", self.render_sub(e)),
            ExprKindIR::Element(_) => "/* unsupported: unlowered element reached the emitter */ undefined".to_string(),
            ExprKindIR::WiredText { var_name, getter } => self.render_wired_text(var_name, getter),
        }
    }

    /// Render `expr` wrapped in parens if its own precedence is lower than
    /// the tight call/member/unary context it's about to sit in. Not a
    /// fully precedence-correct pretty-printer — a conservative rule is
    /// enough for IR produced by this crate's own passes.
    fn render_sub(&self, expr: &ExprIR) -> String {
        let needs_parens = matches!(
            expr.kind,
            ExprKindIR::Binary { .. }
                | ExprKindIR::Logical { .. }
                | ExprKindIR::Conditional { .. }
                | ExprKindIR::Assign { .. }
                | ExprKindIR::Sequence(_)
                | ExprKindIR::Arrow(_)
                | ExprKindIR::Yield { .. }
        );
        if needs_parens {
            format!("({})", self.render_expr(expr))
        } else {
            self.render_expr(expr)
        }
    }

    fn render_template(&self, quasis: &[String], exprs: &[Box<ExprIR>]) -> String {
        let mut out = String::from("`");
        for (i, quasi) in quasis.iter().enumerate() {
            out.push_str(quasi);
            if let Some(e) = exprs.get(i) {
                out.push_str("${");
                out.push_str(&self.render_expr(e));
                out.push('}');
            }
        }
        out.push('`');
        out
    }

    fn render_object(&self, members: &[ObjectMemberIR]) -> String {
        if members.is_empty() {
            return "{}".to_string();
        }
        let parts = members
            .iter()
            .map(|m| match m {
                ObjectMemberIR::Property { key, value, kind, shorthand, .. } => {
                    // `render_property_key` already brackets a `Computed` key.
                    let key_str = self.render_property_key(key);
                    match kind {
                        PropertyKind::Get => format!("get {key_str}() {{ return {}; }}", self.render_expr(value)),
                        PropertyKind::Set => format!("set {key_str}(v) {{ {} = v; }}", self.render_expr(value)),
                        _ if *shorthand => key_str,
                        _ => format!("{key_str}: {}", self.render_expr(value)),
                    }
                }
                ObjectMemberIR::Spread(e) => format!("...{}", self.render_expr(e)),
            })
            .collect::<Vec<_>>();
        format!("{{ {} }}", parts.join(", "))
    }

    fn render_function_expr(&self, f: &FunctionIR) -> String {
        let name = f.name.as_deref().unwrap_or("");
        let prefix = if f.is_async { "async function" } else { "function" };
        let star = if f.is_generator { "*" } else { "" };
        let params = self.render_params(&f.params);
        let body = self.render_block(&f.body);
        format!("{prefix}{star} {name}({params}) {body}")
    }

    fn render_arrow(&self, a: &ArrowFunctionIR) -> String {
        let async_kw = if a.is_async { "async " } else { "" };
        let params = self.render_params(&a.params);
        match &a.body {
            ArrowBodyIR::Expr(e) => {
                let inner = self.render_expr(e);
                let inner = if matches!(e.kind, ExprKindIR::Object(_)) { format!("({inner})") } else { inner };
                format!("{async_kw}({params}) => {inner}")
            }
            ArrowBodyIR::Block(stmts) => format!("{async_kw}({params}) => {}", self.render_block(stmts)),
        }
    }

    fn render_block(&self, stmts: &[StmtIR]) -> String {
        let mut sub = Emitter { options: self.options, output: String::new(), indent_level: self.indent_level };
        sub.output.push_str("{\n");
        sub.indent_level += 1;
        for s in stmts {
            sub.emit_stmt(s);
        }
        sub.indent_level -= 1;
        sub.output.push_str(&sub.indent_str());
        sub.output.push('}');
        sub.output
    }

    /// `(() => { const t0 = document.createTextNode(''); $REGISTRY.wire(t0,
    /// 'textContent', () => getter()); return t0; })()`.
    fn render_wired_text(&self, var_name: &str, getter: &ExprIR) -> String {
        format!(
            "(() => {{ const {var_name} = document.createTextNode(''); $REGISTRY.wire({var_name}, 'textContent', () => {}); return {var_name}; }})()",
            self.render_expr(getter)
        )
    }

    // === Strings ===

    fn quote_string(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for ch in s.chars() {
            match ch {
                '\'' => out.push_str("\\'"),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if self.options.ascii_safe_strings && !c.is_ascii() => {
                    let code = c as u32;
                    if code <= 0xFFFF {
                        out.push_str(&format!("\\u{code:04x}"));
                    } else {
                        out.push_str(&format!("\\u{{{code:x}}}"));
                    }
                }
                c if self.options.ascii_safe_strings && c.is_control() => {
                    out.push_str(&format!("\\x{:02x}", ch as u32));
                }
                c => out.push(c),
            }
        }
        out.push('\'');
        out
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn unary_op_str(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Minus => "-",
        UnaryOp::Plus => "+",
        UnaryOp::Not => "!",
        UnaryOp::BitNot => "~",
        UnaryOp::Typeof => "typeof ",
        UnaryOp::Void => "void ",
        UnaryOp::Delete => "delete ",
    }
}

fn binary_op_str(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Pow => "**",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::StrictEq => "===",
        BinaryOp::StrictNotEq => "!==",
        BinaryOp::Lt => "<",
        BinaryOp::LtEq => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::GtEq => ">=",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::BitAnd => "&",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
        BinaryOp::UShr => ">>>",
        BinaryOp::In => "in",
        BinaryOp::Instanceof => "instanceof",
    }
}

fn logical_op_str(op: LogicalOp) -> &'static str {
    match op {
        LogicalOp::And => "&&",
        LogicalOp::Or => "||",
        LogicalOp::NullishCoalesce => "??",
    }
}

fn assign_op_str(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
        AssignOp::ModAssign => "%=",
        AssignOp::PowAssign => "**=",
        AssignOp::ShlAssign => "<<=",
        AssignOp::ShrAssign => ">>=",
        AssignOp::UShrAssign => ">>>=",
        AssignOp::BitOrAssign => "|=",
        AssignOp::BitXorAssign => "^=",
        AssignOp::BitAndAssign => "&=",
        AssignOp::AndAssign => "&&=",
        AssignOp::OrAssign => "||=",
        AssignOp::NullishAssign => "??=",
    }
}

// Re-exported so callers don't need to depend on `ExportDecl`/`ExportSpecifier`
// directly just to print an export clause.
pub(crate) fn render_export_specifiers(specifiers: &[ExportSpecifier]) -> String {
    specifiers
        .iter()
        .map(|s| if s.local == s.exported { s.local.clone() } else { format!("{} as {}", s.local, s.exported) })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::options::TransformOptions;
    use crate::parser::parse;
    use crate::passes;
    use crate::pipeline::PipelineContext;

    fn transform_to_text(source: &str) -> String {
        let (program, _) = parse(source);
        let (module, _) = analyze(source, &program, false);
        let options = TransformOptions::default();
        let mut ctx = PipelineContext::new(&options);
        let module = passes::run_all(module, &mut ctx).unwrap();
        emit(&module, &ctx.imports.preamble(), &options.emitter)
    }

    #[test]
    fn counter_scenario_contains_expected_shapes() {
        let source = "component Counter() { const [c, setC] = signal(0); return <button onClick={() => setC(c()+1)}>{c()}</button>; }";
        let text = transform_to_text(source);
        assert!(text.contains("$REGISTRY.execute('component:Counter'"));
        assert!(text.contains("createSignal(0)"));
        assert!(text.contains("const [c, setC] = createSignal(0)"));
        assert!(text.contains("t_element('button'"));
        assert!(text.contains("$REGISTRY.wire("));
        assert!(text.contains("import { createSignal"));
    }

    #[test]
    fn emission_is_deterministic() {
        let source = "component Counter() { const [c, setC] = signal(0); return <div>{c()}</div>; }";
        assert_eq!(transform_to_text(source), transform_to_text(source));
    }

    #[test]
    fn quote_string_escapes_and_reuotes() {
        let options = EmitterOptions::default();
        let emitter = Emitter { options: &options, output: String::new(), indent_level: 0 };
        assert_eq!(emitter.quote_string("it's"), "'it\\'s'");
    }
}
