//! Recursive-descent parser.
//!
//! The parser pulls tokens from a `Lexer` on demand and never backtracks
//! except where the grammar is genuinely ambiguous with bounded lookahead:
//!
//! | at `<` in expression position | resolved by |
//! |---|---|
//! | `<Name ...>` / `<>` | JSX element/fragment (the default) |
//! | `<T>(x) => x` | speculative generic-arrow parse; rolls back to JSX on failure |
//! | `a < b` | never reached here — `<` only starts a primary expression |
//!
//! Diagnostics are collected into one buffer rather than raised: a malformed
//! statement produces an error and the parser synchronizes to the next
//! statement boundary (`;`, `}`, or a statement-starting keyword) instead of
//! aborting, so one mistake doesn't hide the rest of the file's problems.

mod jsx;
mod types;

use crate::ast::*;
use crate::diagnostics::{Diagnostic, Phase};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous_end: u32,
    diagnostics: Vec<Diagnostic>,
    /// Suppresses treating `in` as a binary operator while parsing a
    /// classic `for (...)` head, so `for (x in y)` parses as a for-in loop
    /// rather than `x in y` greedily consuming the `in`.
    no_in_depth: u32,
}

/// Parse a full compilation unit from source text.
pub fn parse(source: &str) -> (Program, Vec<Diagnostic>) {
    Parser::new(source).parse_program()
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let mut diagnostics = Vec::new();
        let current = lexer.next_token(&mut diagnostics);
        Self {
            lexer,
            current,
            previous_end: 0,
            diagnostics,
            no_in_depth: 0,
        }
    }

    pub fn parse_program(mut self) -> (Program, Vec<Diagnostic>) {
        let start = self.current.span.start;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::Eof) {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        let span = Span::new(start, self.current.span.end);
        (Program { stmts, span }, self.diagnostics)
    }

    // === Token-stream primitives ===

    fn lexer_mut(&mut self) -> &mut Lexer<'a> {
        &mut self.lexer
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token(&mut self.diagnostics);
        self.previous_end = self.current.span.end;
        std::mem::replace(&mut self.current, next)
    }

    fn at(&self, kind: TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(&kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", what));
            false
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(Phase::Parser, message).with_span(self.current.span));
    }

    /// Whether the token right after `current` matches `kind`, without
    /// consuming anything.
    fn peek_is(&self, kind: TokenKind) -> bool {
        let mut scratch = Vec::new();
        std::mem::discriminant(&self.lexer.peek_n(0, &mut scratch).kind) == std::mem::discriminant(&kind)
    }

    fn is_at_of(&self) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(s) if s == "of")
    }

    /// Attempt a speculative parse; rolls back all lexer/parser state if `f`
    /// returns `None`, so the caller can try a different production.
    fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let lexer_snapshot = self.lexer.clone();
        let current_snapshot = self.current.clone();
        let previous_end_snapshot = self.previous_end;
        let diag_len = self.diagnostics.len();
        let result = f(self);
        if result.is_none() {
            self.lexer = lexer_snapshot;
            self.current = current_snapshot;
            self.previous_end = previous_end_snapshot;
            self.diagnostics.truncate(diag_len);
        }
        result
    }

    fn contextual_keyword_text_opt(&self) -> Option<String> {
        let text = match &self.current.kind {
            TokenKind::Async => "async",
            TokenKind::Get => "get",
            TokenKind::Set => "set",
            TokenKind::Static => "static",
            TokenKind::As => "as",
            TokenKind::From => "from",
            TokenKind::Type => "type",
            TokenKind::Interface => "interface",
            TokenKind::Enum => "enum",
            TokenKind::Default => "default",
            _ => return None,
        };
        Some(text.to_string())
    }

    /// Parses a name: a plain identifier, or one of the contextual keywords
    /// (`type`, `as`, `get`, ...) that are only reserved in specific
    /// grammatical positions and are otherwise ordinary identifiers.
    fn parse_ident_name(&mut self) -> String {
        if let Some(name) = self.contextual_keyword_text_opt() {
            self.advance();
            return name;
        }
        if let TokenKind::Identifier(name) = self.current.kind.clone() {
            self.advance();
            name
        } else {
            self.error("expected an identifier");
            String::new()
        }
    }

    fn consume_semicolon(&mut self) {
        if self.eat(TokenKind::Semicolon) {
            return;
        }
        if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) || self.current.preceded_by_newline {
            return; // automatic semicolon insertion
        }
        self.error("expected ';'");
    }

    fn synchronize(&mut self) {
        loop {
            match &self.current.kind {
                TokenKind::Eof | TokenKind::RBrace => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Var
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Component
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::Import
                | TokenKind::Export => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // === Statements ===

    fn parse_stmt(&mut self) -> Option<Stmt> {
        let start = self.current.span.start;
        let kind = match &self.current.kind {
            TokenKind::Const if self.peek_is(TokenKind::Enum) => {
                self.advance();
                self.parse_enum_decl(true)
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => self.parse_var_stmt(),
            TokenKind::Async if self.peek_is(TokenKind::Function) => self.parse_function_stmt(true),
            TokenKind::Function => self.parse_function_stmt(false),
            TokenKind::Component => self.parse_component_stmt(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::Switch => self.parse_switch_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Do => self.parse_do_while_stmt(),
            TokenKind::Break => {
                self.advance();
                let label = self.parse_optional_label();
                self.consume_semicolon();
                StmtKind::Break { label }
            }
            TokenKind::Continue => {
                self.advance();
                let label = self.parse_optional_label();
                self.consume_semicolon();
                StmtKind::Continue { label }
            }
            TokenKind::Return => {
                self.advance();
                let arg = if self.can_end_expr_here() { None } else { Some(self.parse_expr()) };
                self.consume_semicolon();
                StmtKind::Return { arg }
            }
            TokenKind::Throw => {
                self.advance();
                let arg = self.parse_expr();
                self.consume_semicolon();
                StmtKind::Throw { arg }
            }
            TokenKind::Try => self.parse_try_stmt(),
            TokenKind::Import => self.parse_import_stmt(),
            TokenKind::Export => self.parse_export_stmt(),
            TokenKind::Interface => self.parse_interface_decl(),
            TokenKind::Type => self.parse_type_alias_decl(),
            TokenKind::Enum => self.parse_enum_decl(false),
            TokenKind::Semicolon => {
                self.advance();
                StmtKind::Empty
            }
            TokenKind::Identifier(_) if self.peek_is(TokenKind::Colon) => self.parse_labeled_stmt(),
            _ => {
                let expr = self.parse_expr();
                self.consume_semicolon();
                StmtKind::Expr(expr)
            }
        };
        let span = Span::new(start, self.previous_end);
        Some(Stmt::new(kind, span))
    }

    fn parse_stmt_or_error(&mut self) -> Stmt {
        self.parse_stmt().unwrap_or_else(|| Stmt::new(StmtKind::Empty, Span::empty(self.current.span.start)))
    }

    fn parse_block(&mut self) -> StmtKind {
        StmtKind::Block(self.parse_block_stmts())
    }

    fn parse_block_stmts(&mut self) -> Vec<Stmt> {
        self.expect(TokenKind::LBrace, "'{'");
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        self.expect(TokenKind::RBrace, "'}'");
        stmts
    }

    fn parse_var_stmt(&mut self) -> StmtKind {
        let kind = match self.current.kind {
            TokenKind::Var => VarKind::Var,
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => unreachable!("parse_var_stmt called off a var/let/const token"),
        };
        self.advance();
        let mut decls = Vec::new();
        loop {
            let d_start = self.current.span.start;
            let binding = self.parse_binding();
            let init = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
            decls.push(VarDeclarator { binding, init, span: Span::new(d_start, self.previous_end) });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume_semicolon();
        StmtKind::Var { kind, decls }
    }

    fn parse_function_stmt(&mut self, is_async: bool) -> StmtKind {
        let expr = self.parse_function_expr(is_async);
        match expr.kind {
            ExprKind::Function(f) => StmtKind::Function(f),
            _ => unreachable!("parse_function_expr always returns a Function"),
        }
    }

    fn parse_component_stmt(&mut self) -> StmtKind {
        let start = self.current.span.start;
        self.advance(); // 'component'
        let name = self.parse_ident_name();
        let type_params = types::parse_generic_params_opaque(self);
        let params = self.parse_params();
        let return_type = types::parse_type_annotation(self);
        let body = self.parse_block_stmts();
        let span = Span::new(start, self.previous_end);
        StmtKind::Component(Box::new(ComponentDecl { name, type_params, params, body, return_type, span }))
    }

    fn parse_if_stmt(&mut self) -> StmtKind {
        self.advance();
        self.expect(TokenKind::LParen, "'('");
        let test = self.parse_expr();
        self.expect(TokenKind::RParen, "')'");
        let consequent = Box::new(self.parse_stmt_or_error());
        let alternate = if self.eat(TokenKind::Else) { Some(Box::new(self.parse_stmt_or_error())) } else { None };
        StmtKind::If { test, consequent, alternate }
    }

    fn parse_switch_stmt(&mut self) -> StmtKind {
        self.advance();
        self.expect(TokenKind::LParen, "'('");
        let discriminant = self.parse_expr();
        self.expect(TokenKind::RParen, "')'");
        self.expect(TokenKind::LBrace, "'{'");
        let mut cases = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            let case_start = self.current.span.start;
            let test = if self.eat(TokenKind::Case) {
                let e = self.parse_expr();
                self.expect(TokenKind::Colon, "':'");
                Some(e)
            } else {
                self.expect(TokenKind::Default, "'default'");
                self.expect(TokenKind::Colon, "':'");
                None
            };
            let mut consequent = Vec::new();
            while !self.at(TokenKind::Case) && !self.at(TokenKind::Default) && !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
                match self.parse_stmt() {
                    Some(stmt) => consequent.push(stmt),
                    None => self.synchronize(),
                }
            }
            cases.push(SwitchCase { test, consequent, span: Span::new(case_start, self.previous_end) });
        }
        self.expect(TokenKind::RBrace, "'}'");
        StmtKind::Switch { discriminant, cases }
    }

    fn parse_for_stmt(&mut self) -> StmtKind {
        self.advance();
        let is_await = self.eat(TokenKind::Await);
        self.expect(TokenKind::LParen, "'('");

        if self.eat(TokenKind::Semicolon) {
            return self.parse_for_rest(None);
        }

        let var_kind = match self.current.kind {
            TokenKind::Var => Some(VarKind::Var),
            TokenKind::Let => Some(VarKind::Let),
            TokenKind::Const => Some(VarKind::Const),
            _ => None,
        };

        if let Some(vk) = var_kind {
            self.advance();
            self.no_in_depth += 1;
            let binding = self.parse_binding();
            self.no_in_depth -= 1;

            if self.at(TokenKind::In) || self.is_at_of() {
                let left = ForInit::Var { kind: vk, decls: vec![VarDeclarator { binding, init: None, span: Span::empty(self.previous_end) }] };
                return self.parse_for_in_of(left, is_await);
            }

            self.no_in_depth += 1;
            let init = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
            let mut decls = vec![VarDeclarator { binding, init, span: Span::empty(self.previous_end) }];
            while self.eat(TokenKind::Comma) {
                let b2 = self.parse_binding();
                let i2 = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
                decls.push(VarDeclarator { binding: b2, init: i2, span: Span::empty(self.previous_end) });
            }
            self.no_in_depth -= 1;
            self.expect(TokenKind::Semicolon, "';'");
            return self.parse_for_rest(Some(ForInit::Var { kind: vk, decls }));
        }

        self.no_in_depth += 1;
        let expr = self.parse_expr();
        self.no_in_depth -= 1;

        if self.at(TokenKind::In) || self.is_at_of() {
            return self.parse_for_in_of(ForInit::Expr(expr), is_await);
        }
        self.expect(TokenKind::Semicolon, "';'");
        self.parse_for_rest(Some(ForInit::Expr(expr)))
    }

    fn parse_for_in_of(&mut self, left: ForInit, is_await: bool) -> StmtKind {
        let is_of = self.is_at_of();
        self.advance(); // 'in' or 'of'
        let right = self.parse_assign_expr();
        self.expect(TokenKind::RParen, "')'");
        let body = Box::new(self.parse_stmt_or_error());
        if is_of {
            StmtKind::ForOf { left, right, body, is_await }
        } else {
            StmtKind::ForIn { left, right, body }
        }
    }

    fn parse_for_rest(&mut self, init: Option<ForInit>) -> StmtKind {
        let test = if !self.at(TokenKind::Semicolon) { Some(self.parse_expr()) } else { None };
        self.expect(TokenKind::Semicolon, "';'");
        let update = if !self.at(TokenKind::RParen) { Some(self.parse_expr()) } else { None };
        self.expect(TokenKind::RParen, "')'");
        let body = Box::new(self.parse_stmt_or_error());
        StmtKind::For { init, test, update, body }
    }

    fn parse_while_stmt(&mut self) -> StmtKind {
        self.advance();
        self.expect(TokenKind::LParen, "'('");
        let test = self.parse_expr();
        self.expect(TokenKind::RParen, "')'");
        let body = Box::new(self.parse_stmt_or_error());
        StmtKind::While { test, body }
    }

    fn parse_do_while_stmt(&mut self) -> StmtKind {
        self.advance();
        let body = Box::new(self.parse_stmt_or_error());
        self.expect(TokenKind::While, "'while'");
        self.expect(TokenKind::LParen, "'('");
        let test = self.parse_expr();
        self.expect(TokenKind::RParen, "')'");
        self.consume_semicolon();
        StmtKind::DoWhile { body, test }
    }

    fn parse_try_stmt(&mut self) -> StmtKind {
        self.advance();
        let block = self.parse_block_stmts();
        let handler = if self.eat(TokenKind::Catch) {
            let param = if self.eat(TokenKind::LParen) {
                let binding = self.parse_binding();
                self.expect(TokenKind::RParen, "')'");
                Some(binding)
            } else {
                None
            };
            let body = self.parse_block_stmts();
            Some(CatchClause { param, body, span: Span::empty(self.previous_end) })
        } else {
            None
        };
        let finalizer = if self.eat(TokenKind::Finally) { Some(self.parse_block_stmts()) } else { None };
        StmtKind::Try { block, handler, finalizer }
    }

    fn parse_optional_label(&mut self) -> Option<String> {
        if !self.current.preceded_by_newline {
            if let TokenKind::Identifier(name) = self.current.kind.clone() {
                self.advance();
                return Some(name);
            }
        }
        None
    }

    fn parse_labeled_stmt(&mut self) -> StmtKind {
        let label = self.parse_ident_name();
        self.expect(TokenKind::Colon, "':'");
        let body = Box::new(self.parse_stmt_or_error());
        StmtKind::Labeled { label, body }
    }

    // === Modules ===

    fn parse_import_stmt(&mut self) -> StmtKind {
        let start = self.current.span.start;
        self.advance(); // 'import'

        if let TokenKind::String(source) = self.current.kind.clone() {
            self.advance();
            self.consume_semicolon();
            return StmtKind::Import(Box::new(ImportDecl {
                specifiers: Vec::new(),
                source,
                is_type_only: false,
                span: Span::new(start, self.previous_end),
            }));
        }

        let is_type_only = self.at(TokenKind::Type) && !self.peek_is(TokenKind::Comma) && !self.peek_is(TokenKind::From);
        if is_type_only {
            self.advance();
        }

        let mut specifiers = Vec::new();
        if let TokenKind::Identifier(_) = self.current.kind {
            let d_start = self.current.span.start;
            let local = self.parse_ident_name();
            specifiers.push(ImportSpecifier::Default { local, span: Span::new(d_start, self.previous_end) });
            if self.eat(TokenKind::Comma) {
                self.parse_import_named_or_namespace(&mut specifiers);
            }
        } else {
            self.parse_import_named_or_namespace(&mut specifiers);
        }

        self.expect(TokenKind::From, "'from'");
        let source = self.parse_string_literal();
        self.consume_semicolon();
        StmtKind::Import(Box::new(ImportDecl { specifiers, source, is_type_only, span: Span::new(start, self.previous_end) }))
    }

    fn parse_import_named_or_namespace(&mut self, specifiers: &mut Vec<ImportSpecifier>) {
        if self.at(TokenKind::Star) {
            let start = self.current.span.start;
            self.advance();
            self.expect(TokenKind::As, "'as'");
            let local = self.parse_ident_name();
            specifiers.push(ImportSpecifier::Namespace { local, span: Span::new(start, self.previous_end) });
            return;
        }
        self.expect(TokenKind::LBrace, "'{'");
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            let start = self.current.span.start;
            let is_type = self.at(TokenKind::Type) && !self.peek_is(TokenKind::Comma) && !self.peek_is(TokenKind::As) && !self.peek_is(TokenKind::RBrace);
            if is_type {
                self.advance();
            }
            let imported = self.parse_ident_name();
            let local = if self.eat(TokenKind::As) { self.parse_ident_name() } else { imported.clone() };
            specifiers.push(ImportSpecifier::Named { imported, local, is_type, span: Span::new(start, self.previous_end) });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "'}'");
    }

    fn parse_string_literal(&mut self) -> String {
        if let TokenKind::String(s) = self.current.kind.clone() {
            self.advance();
            s
        } else {
            self.error("expected a string literal");
            String::new()
        }
    }

    fn parse_export_stmt(&mut self) -> StmtKind {
        let start = self.current.span.start;
        self.advance(); // 'export'

        if self.eat(TokenKind::Default) {
            let decl_kind = match &self.current.kind {
                TokenKind::Function => Some(self.parse_function_stmt(false)),
                TokenKind::Async if self.peek_is(TokenKind::Function) => Some(self.parse_function_stmt(true)),
                TokenKind::Component => Some(self.parse_component_stmt()),
                _ => None,
            };
            return match decl_kind {
                Some(kind) => {
                    let decl_span = Span::new(start, self.previous_end);
                    StmtKind::Export(Box::new(ExportDecl::Decl { decl: Box::new(Stmt::new(kind, decl_span)), span: decl_span }))
                }
                None => {
                    let expr = self.parse_assign_expr();
                    self.consume_semicolon();
                    StmtKind::Export(Box::new(ExportDecl::Default { expr, span: Span::new(start, self.previous_end) }))
                }
            };
        }

        if self.eat(TokenKind::Star) {
            let exported = if self.eat(TokenKind::As) { Some(self.parse_ident_name()) } else { None };
            self.expect(TokenKind::From, "'from'");
            let source = self.parse_string_literal();
            self.consume_semicolon();
            return StmtKind::Export(Box::new(ExportDecl::All { exported, source, span: Span::new(start, self.previous_end) }));
        }

        let is_type_only_named = self.at(TokenKind::Type) && self.peek_is(TokenKind::LBrace);
        if is_type_only_named {
            self.advance();
        }
        if self.at(TokenKind::LBrace) {
            let specifiers = self.parse_export_specifier_list();
            let source = if self.eat(TokenKind::From) { Some(self.parse_string_literal()) } else { None };
            self.consume_semicolon();
            return StmtKind::Export(Box::new(ExportDecl::Named {
                specifiers,
                source,
                is_type_only: is_type_only_named,
                span: Span::new(start, self.previous_end),
            }));
        }

        let decl_kind = self.parse_stmt().map(|s| s.kind).unwrap_or(StmtKind::Empty);
        let decl_span = Span::new(start, self.previous_end);
        StmtKind::Export(Box::new(ExportDecl::Decl { decl: Box::new(Stmt::new(decl_kind, decl_span)), span: decl_span }))
    }

    fn parse_export_specifier_list(&mut self) -> Vec<ExportSpecifier> {
        self.expect(TokenKind::LBrace, "'{'");
        let mut specifiers = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            let start = self.current.span.start;
            let is_type = self.at(TokenKind::Type) && !self.peek_is(TokenKind::Comma) && !self.peek_is(TokenKind::As) && !self.peek_is(TokenKind::RBrace);
            if is_type {
                self.advance();
            }
            let local = self.parse_ident_name();
            let exported = if self.eat(TokenKind::As) { self.parse_ident_name() } else { local.clone() };
            specifiers.push(ExportSpecifier { local, exported, is_type, span: Span::new(start, self.previous_end) });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "'}'");
        specifiers
    }

    // === Type-level declarations (erased) ===

    fn parse_interface_decl(&mut self) -> StmtKind {
        let start = self.current.span.start;
        self.advance(); // 'interface'
        let name = self.parse_ident_name();
        let _type_params = types::parse_generic_params_opaque(self);
        if self.eat(TokenKind::Extends) {
            types::consume_type_expr(self);
            while self.eat(TokenKind::Comma) {
                types::consume_type_expr(self);
            }
        }
        if self.at(TokenKind::LBrace) {
            types::skip_balanced_braces(self);
        }
        StmtKind::Interface(Box::new(InterfaceDecl { name, span: Span::new(start, self.previous_end) }))
    }

    fn parse_type_alias_decl(&mut self) -> StmtKind {
        let start = self.current.span.start;
        self.advance(); // 'type'
        let name = self.parse_ident_name();
        let _type_params = types::parse_generic_params_opaque(self);
        self.expect(TokenKind::Eq, "'='");
        types::consume_type_expr(self);
        self.consume_semicolon();
        StmtKind::TypeAlias(Box::new(TypeAliasDecl { name, span: Span::new(start, self.previous_end) }))
    }

    fn parse_enum_decl(&mut self, is_const: bool) -> StmtKind {
        let start = self.current.span.start;
        self.advance(); // 'enum'
        let name = self.parse_ident_name();
        self.expect(TokenKind::LBrace, "'{'");
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            let m_start = self.current.span.start;
            let member_name = self.parse_ident_name();
            let init = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
            members.push(EnumMember { name: member_name, init, span: Span::new(m_start, self.previous_end) });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "'}'");
        StmtKind::Enum(Box::new(EnumDecl { name, is_const, members, span: Span::new(start, self.previous_end) }))
    }

    // === Bindings / parameters ===

    fn parse_params(&mut self) -> Vec<Param> {
        self.expect(TokenKind::LParen, "'('");
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
            params.push(self.parse_param());
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'");
        params
    }

    fn parse_param(&mut self) -> Param {
        let start = self.current.span.start;
        let rest = self.eat(TokenKind::Spread);
        let binding = self.parse_binding();
        let default = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
        Param { binding, default, rest, span: Span::new(start, self.previous_end) }
    }

    fn parse_binding(&mut self) -> Binding {
        let start = self.current.span.start;
        let kind = match &self.current.kind {
            TokenKind::LBrace => self.parse_object_binding(),
            TokenKind::LBracket => self.parse_array_binding(),
            _ => {
                let name = self.parse_ident_name();
                self.eat(TokenKind::Question);
                BindingKind::Ident { name, type_ann: None }
            }
        };
        let mut binding = Binding::new(kind, Span::new(start, self.previous_end));
        if let Some(ann) = types::parse_type_annotation(self) {
            match &mut binding.kind {
                BindingKind::Ident { type_ann, .. } | BindingKind::Array { type_ann, .. } | BindingKind::Object { type_ann, .. } => {
                    *type_ann = Some(ann);
                }
            }
            binding.span = Span::new(start, self.previous_end);
        }
        binding
    }

    fn parse_array_binding(&mut self) -> BindingKind {
        self.advance(); // '['
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket) && !self.at(TokenKind::Eof) {
            if self.at(TokenKind::Comma) {
                elements.push(None);
                self.advance();
                continue;
            }
            let rest = self.eat(TokenKind::Spread);
            let binding = self.parse_binding();
            let default = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
            elements.push(Some(ArrayPatternElement { binding, default, rest }));
            if !self.at(TokenKind::RBracket) && !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "']'");
        BindingKind::Array { elements, type_ann: None }
    }

    fn parse_object_binding(&mut self) -> BindingKind {
        self.advance(); // '{'
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            if self.at(TokenKind::Spread) {
                self.advance();
                let name = self.parse_ident_name();
                let span = Span::empty(self.previous_end);
                properties.push(ObjectPatternProperty {
                    key: PropertyKey::Ident(name.clone()),
                    value: Binding::new(BindingKind::Ident { name, type_ann: None }, span),
                    default: None,
                    shorthand: true,
                    rest: true,
                });
            } else {
                let (key, _computed) = self.parse_property_key();
                if self.eat(TokenKind::Colon) {
                    let value = self.parse_binding();
                    let default = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
                    properties.push(ObjectPatternProperty { key, value, default, shorthand: false, rest: false });
                } else {
                    let name = match &key {
                        PropertyKey::Ident(n) => n.clone(),
                        _ => {
                            self.error("expected a binding name");
                            String::new()
                        }
                    };
                    let span = Span::empty(self.previous_end);
                    let default = if self.eat(TokenKind::Eq) { Some(self.parse_assign_expr()) } else { None };
                    properties.push(ObjectPatternProperty {
                        key,
                        value: Binding::new(BindingKind::Ident { name, type_ann: None }, span),
                        default,
                        shorthand: true,
                        rest: false,
                    });
                }
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "'}'");
        BindingKind::Object { properties, type_ann: None }
    }

    // === Expressions ===

    fn parse_expr(&mut self) -> Expr {
        let first = self.parse_assign_expr();
        if !self.at(TokenKind::Comma) {
            return first;
        }
        let start = first.span.start;
        let mut exprs = vec![first];
        while self.eat(TokenKind::Comma) {
            exprs.push(self.parse_assign_expr());
        }
        let span = Span::new(start, self.previous_end);
        Expr::new(ExprKind::Sequence(exprs), span)
    }

    fn parse_assign_expr(&mut self) -> Expr {
        if self.at(TokenKind::Yield) {
            return self.parse_yield_expr();
        }
        if let Some(arrow) = self.try_parse(Self::try_simple_arrow) {
            return arrow;
        }

        let left = self.parse_conditional_expr();
        if self.current.kind.is_assignment() {
            let op = to_assign_op(&self.current.kind);
            self.advance();
            let right = self.parse_assign_expr();
            let span = left.span.merge(right.span);
            return Expr::new(ExprKind::Assign { op, left: Box::new(left), right: Box::new(right) }, span);
        }
        left
    }

    /// `x => ...`, `async x => ...`, `(a, b) => ...`, `async (a, b) => ...`.
    /// The `<T>(x) => ...` generic-arrow form is handled separately in
    /// `parse_lt_prefixed_expr`, since it starts with the same token JSX does.
    fn try_simple_arrow(&mut self) -> Option<Expr> {
        let start = self.current.span.start;
        let is_async = self.at(TokenKind::Async) && (self.peek_is(TokenKind::LParen) || self.is_async_ident_arrow_ahead());
        if is_async {
            self.advance();
        }

        if let TokenKind::Identifier(name) = self.current.kind.clone() {
            if self.peek_is(TokenKind::Arrow) {
                let p_span = self.current.span;
                self.advance();
                self.expect(TokenKind::Arrow, "'=>'");
                let param = Param { binding: Binding::new(BindingKind::Ident { name, type_ann: None }, p_span), default: None, rest: false, span: p_span };
                let body = self.parse_arrow_body();
                let span = Span::new(start, self.previous_end);
                return Some(Expr::new(ExprKind::Arrow(Box::new(ArrowFunction { params: vec![param], body, is_async, return_type: None, span })), span));
            }
            return None;
        }

        if self.at(TokenKind::LParen) {
            let params = self.parse_params();
            let return_type = types::parse_type_annotation(self);
            if !self.eat(TokenKind::Arrow) {
                return None;
            }
            let body = self.parse_arrow_body();
            let span = Span::new(start, self.previous_end);
            return Some(Expr::new(ExprKind::Arrow(Box::new(ArrowFunction { params, body, is_async, return_type, span })), span));
        }
        None
    }

    fn is_async_ident_arrow_ahead(&self) -> bool {
        // `async x => ...`: next token is an identifier, and the one after
        // that is `=>`. `peek_n` only looks at a single offset at a time, so
        // this checks the identifier case conservatively; the parenthesized
        // case (`async (x) => ...`) is covered by `peek_is(LParen)` already.
        let mut scratch = Vec::new();
        matches!(self.lexer.peek_n(0, &mut scratch).kind, TokenKind::Identifier(_))
    }

    fn parse_arrow_body(&mut self) -> ArrowBody {
        if self.at(TokenKind::LBrace) {
            ArrowBody::Block(self.parse_block_stmts())
        } else {
            ArrowBody::Expr(Box::new(self.parse_assign_expr()))
        }
    }

    fn parse_yield_expr(&mut self) -> Expr {
        let start = self.current.span.start;
        self.advance();
        let delegate = self.eat(TokenKind::Star);
        let arg = if self.can_end_expr_here() { None } else { Some(Box::new(self.parse_assign_expr())) };
        Expr::new(ExprKind::Yield { arg, delegate }, Span::new(start, self.previous_end))
    }

    fn can_end_expr_here(&self) -> bool {
        self.current.preceded_by_newline
            || matches!(
                self.current.kind,
                TokenKind::Semicolon | TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket | TokenKind::Comma | TokenKind::Colon | TokenKind::Eof
            )
    }

    fn parse_conditional_expr(&mut self) -> Expr {
        let test = self.parse_binary_expr(1);
        if self.eat(TokenKind::Question) {
            let consequent = self.parse_assign_expr();
            self.expect(TokenKind::Colon, "':' in conditional expression");
            let alternate = self.parse_assign_expr();
            let span = test.span.merge(alternate.span);
            return Expr::new(ExprKind::Conditional { test: Box::new(test), consequent: Box::new(consequent), alternate: Box::new(alternate) }, span);
        }
        test
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Expr {
        let mut left = self.parse_unary_expr();
        loop {
            if matches!(self.current.kind, TokenKind::In) && self.no_in_depth > 0 {
                break;
            }
            let prec = match self.current.kind.binary_precedence() {
                Some(p) if p >= min_prec => p,
                _ => break,
            };
            let op_token = self.current.kind.clone();
            let right_assoc = self.current.kind.is_right_associative();
            self.advance();
            let next_min = if right_assoc { prec } else { prec + 1 };
            let right = self.parse_binary_expr(next_min);
            let span = left.span.merge(right.span);
            left = match to_logical_op(&op_token) {
                Some(op) => Expr::new(ExprKind::Logical { op, left: Box::new(left), right: Box::new(right) }, span),
                None => Expr::new(ExprKind::Binary { op: to_binary_op(&op_token), left: Box::new(left), right: Box::new(right) }, span),
            };
        }
        left
    }

    fn parse_unary_expr(&mut self) -> Expr {
        let start = self.current.span.start;
        let unary_op = match &self.current.kind {
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(op) = unary_op {
            self.advance();
            let arg = self.parse_unary_expr();
            return Expr::new(ExprKind::Unary { op, arg: Box::new(arg) }, Span::new(start, self.previous_end));
        }

        if matches!(self.current.kind, TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = if matches!(self.current.kind, TokenKind::PlusPlus) { UpdateOp::Increment } else { UpdateOp::Decrement };
            self.advance();
            let arg = self.parse_unary_expr();
            return Expr::new(ExprKind::Update { op, prefix: true, arg: Box::new(arg) }, Span::new(start, self.previous_end));
        }

        if self.at(TokenKind::Await) {
            self.advance();
            let arg = self.parse_unary_expr();
            return Expr::new(ExprKind::Await(Box::new(arg)), Span::new(start, self.previous_end));
        }

        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> Expr {
        let mut expr = self.parse_lhs_expr();
        if !self.current.preceded_by_newline && matches!(self.current.kind, TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = if matches!(self.current.kind, TokenKind::PlusPlus) { UpdateOp::Increment } else { UpdateOp::Decrement };
            self.advance();
            let span = Span::new(expr.span.start, self.previous_end);
            expr = Expr::new(ExprKind::Update { op, prefix: false, arg: Box::new(expr) }, span);
        }

        loop {
            if self.at(TokenKind::As) {
                self.advance();
                let ann_start = self.current.span.start;
                types::consume_type_expr(self);
                let span = Span::new(expr.span.start, self.previous_end);
                expr = Expr::new(ExprKind::TypeErased { expr: Box::new(expr), annotation: Some(TypeSpan(Span::new(ann_start, self.previous_end))) }, span);
                continue;
            }
            if matches!(&self.current.kind, TokenKind::Identifier(s) if s == "satisfies") {
                self.advance();
                let ann_start = self.current.span.start;
                types::consume_type_expr(self);
                let span = Span::new(expr.span.start, self.previous_end);
                expr = Expr::new(ExprKind::TypeErased { expr: Box::new(expr), annotation: Some(TypeSpan(Span::new(ann_start, self.previous_end))) }, span);
                continue;
            }
            break;
        }
        expr
    }

    fn parse_lhs_expr(&mut self) -> Expr {
        let mut expr = if self.at(TokenKind::New) {
            self.parse_new_expr()
        } else {
            self.parse_primary_expr()
        };
        loop {
            expr = match &self.current.kind {
                TokenKind::Dot => self.parse_member_dot(expr, false),
                TokenKind::QuestionDot => self.parse_optional_chain(expr),
                TokenKind::LBracket => self.parse_member_computed(expr, false),
                TokenKind::LParen => self.parse_call(expr),
                TokenKind::TemplateNoSub(_) | TokenKind::TemplateHead(_) => self.parse_tagged_template(expr),
                TokenKind::Bang if !self.current.preceded_by_newline => {
                    let span = Span::new(expr.span.start, self.current.span.end);
                    self.advance();
                    Expr::new(ExprKind::TypeErased { expr: Box::new(expr), annotation: None }, span)
                }
                _ => break,
            };
        }
        expr
    }

    fn parse_new_expr(&mut self) -> Expr {
        let start = self.current.span.start;
        self.advance(); // 'new'
        if self.eat(TokenKind::Dot) {
            let _ = self.parse_ident_name(); // 'target'
            return Expr::new(ExprKind::Ident("new.target".to_string()), Span::new(start, self.previous_end));
        }
        let callee = if self.at(TokenKind::New) { self.parse_new_expr() } else { self.parse_member_only_expr() };
        let args = if self.at(TokenKind::LParen) { self.parse_arguments() } else { Vec::new() };
        Expr::new(ExprKind::New { callee: Box::new(callee), args }, Span::new(start, self.previous_end))
    }

    fn parse_member_only_expr(&mut self) -> Expr {
        let mut expr = self.parse_primary_expr();
        loop {
            expr = match &self.current.kind {
                TokenKind::Dot => self.parse_member_dot(expr, false),
                TokenKind::LBracket => self.parse_member_computed(expr, false),
                _ => break,
            };
        }
        expr
    }

    fn parse_member_dot(&mut self, object: Expr, optional: bool) -> Expr {
        self.advance(); // '.'
        self.parse_member_dot_tail(object, optional)
    }

    fn parse_member_dot_tail(&mut self, object: Expr, optional: bool) -> Expr {
        let prop_start = self.current.span.start;
        let name = self.parse_ident_name();
        let prop_span = Span::new(prop_start, self.previous_end);
        let property = Expr::new(ExprKind::Ident(name), prop_span);
        let span = object.span.merge(prop_span);
        Expr::new(ExprKind::Member { object: Box::new(object), property: Box::new(property), computed: false, optional }, span)
    }

    fn parse_optional_chain(&mut self, object: Expr) -> Expr {
        self.advance(); // '?.'
        if self.at(TokenKind::LParen) {
            return self.parse_call_optional(object);
        }
        if self.at(TokenKind::LBracket) {
            return self.parse_member_computed(object, true);
        }
        self.parse_member_dot_tail(object, true)
    }

    fn parse_member_computed(&mut self, object: Expr, optional: bool) -> Expr {
        self.advance(); // '['
        let property = self.parse_expr();
        self.expect(TokenKind::RBracket, "']'");
        let span = Span::new(object.span.start, self.previous_end);
        Expr::new(ExprKind::Member { object: Box::new(object), property: Box::new(property), computed: true, optional }, span)
    }

    fn parse_call(&mut self, callee: Expr) -> Expr {
        let args = self.parse_arguments();
        let span = Span::new(callee.span.start, self.previous_end);
        Expr::new(ExprKind::Call { callee: Box::new(callee), args, optional: false }, span)
    }

    fn parse_call_optional(&mut self, callee: Expr) -> Expr {
        let args = self.parse_arguments();
        let span = Span::new(callee.span.start, self.previous_end);
        Expr::new(ExprKind::Call { callee: Box::new(callee), args, optional: true }, span)
    }

    fn parse_arguments(&mut self) -> Vec<Expr> {
        self.expect(TokenKind::LParen, "'('");
        let mut args = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
            if self.at(TokenKind::Spread) {
                let start = self.current.span.start;
                self.advance();
                let arg = self.parse_assign_expr();
                args.push(Expr::new(ExprKind::Spread(Box::new(arg)), Span::new(start, self.previous_end)));
            } else {
                args.push(self.parse_assign_expr());
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'");
        args
    }

    fn parse_tagged_template(&mut self, tag: Expr) -> Expr {
        let span = tag.span;
        let (quasis, exprs) = self.parse_template_parts();
        Expr::new(ExprKind::TaggedTemplate { tag: Box::new(tag), quasis, exprs }, Span::new(span.start, self.previous_end))
    }

    fn parse_template_parts(&mut self) -> (Vec<String>, Vec<Box<Expr>>) {
        match self.current.kind.clone() {
            TokenKind::TemplateNoSub(s) => {
                self.advance();
                (vec![s], Vec::new())
            }
            TokenKind::TemplateHead(head) => {
                let mut quasis = vec![head];
                let mut exprs = Vec::new();
                self.advance(); // move onto the first token of the first hole
                loop {
                    exprs.push(Box::new(self.parse_expr()));
                    let cont = self.lexer.scan_template_continuation(&mut self.diagnostics);
                    self.previous_end = self.current.span.end;
                    self.current = cont;
                    match self.current.kind.clone() {
                        TokenKind::TemplateMiddle(s) => {
                            quasis.push(s);
                            self.advance();
                        }
                        TokenKind::TemplateTail(s) => {
                            quasis.push(s);
                            self.advance();
                            break;
                        }
                        _ => break,
                    }
                }
                (quasis, exprs)
            }
            _ => {
                self.error("expected a template literal");
                (vec![String::new()], Vec::new())
            }
        }
    }

    fn parse_primary_expr(&mut self) -> Expr {
        let start = self.current.span.start;
        match self.current.kind.clone() {
            TokenKind::Number(n) => {
                self.advance();
                Expr::new(ExprKind::Number(n), Span::new(start, self.previous_end))
            }
            TokenKind::BigInt(s) => {
                self.advance();
                Expr::new(ExprKind::BigInt(s), Span::new(start, self.previous_end))
            }
            TokenKind::String(s) => {
                self.advance();
                Expr::new(ExprKind::String(s), Span::new(start, self.previous_end))
            }
            TokenKind::Regex { pattern, flags } => {
                self.advance();
                Expr::new(ExprKind::Regex { pattern, flags }, Span::new(start, self.previous_end))
            }
            TokenKind::True => {
                self.advance();
                Expr::new(ExprKind::Bool(true), Span::new(start, self.previous_end))
            }
            TokenKind::False => {
                self.advance();
                Expr::new(ExprKind::Bool(false), Span::new(start, self.previous_end))
            }
            TokenKind::Null => {
                self.advance();
                Expr::new(ExprKind::Null, Span::new(start, self.previous_end))
            }
            TokenKind::This => {
                self.advance();
                Expr::new(ExprKind::This, Span::new(start, self.previous_end))
            }
            TokenKind::Super => {
                self.advance();
                Expr::new(ExprKind::Super, Span::new(start, self.previous_end))
            }
            TokenKind::TemplateNoSub(s) => {
                self.advance();
                Expr::new(ExprKind::TemplateNoSub(s), Span::new(start, self.previous_end))
            }
            TokenKind::TemplateHead(_) => {
                let (quasis, exprs) = self.parse_template_parts();
                Expr::new(ExprKind::Template { quasis, exprs }, Span::new(start, self.previous_end))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Expr::new(ExprKind::Ident(name), Span::new(start, self.previous_end))
            }
            TokenKind::Async if self.is_async_function_ahead() => self.parse_function_expr(true),
            TokenKind::Function => self.parse_function_expr(false),
            TokenKind::LParen => self.parse_parenthesized_expr(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Lt => self.parse_lt_prefixed_expr(),
            TokenKind::Yield => self.parse_yield_expr(),
            TokenKind::Async | TokenKind::Get | TokenKind::Set | TokenKind::Static | TokenKind::As | TokenKind::From | TokenKind::Type | TokenKind::Interface | TokenKind::Enum | TokenKind::Default => {
                let name = self.contextual_keyword_text_opt().unwrap_or_default();
                self.advance();
                Expr::new(ExprKind::Ident(name), Span::new(start, self.previous_end))
            }
            _ => {
                self.error(format!("unexpected token in expression position: {:?}", self.current.kind));
                self.advance();
                Expr::new(ExprKind::Null, Span::new(start, self.previous_end))
            }
        }
    }

    fn is_async_function_ahead(&self) -> bool {
        self.peek_is(TokenKind::Function)
    }

    fn parse_function_expr(&mut self, is_async: bool) -> Expr {
        let start = self.current.span.start;
        if is_async {
            self.advance(); // 'async'
        }
        self.expect(TokenKind::Function, "'function'");
        let is_generator = self.eat(TokenKind::Star);
        let name = if let TokenKind::Identifier(_) = self.current.kind { Some(self.parse_ident_name()) } else { None };
        let _type_params = types::parse_generic_params_opaque(self);
        let params = self.parse_params();
        let return_type = types::parse_type_annotation(self);
        let body = self.parse_block_stmts();
        let span = Span::new(start, self.previous_end);
        Expr::new(ExprKind::Function(Box::new(Function { name, params, body, is_async, is_generator, return_type, span })), span)
    }

    fn parse_parenthesized_expr(&mut self) -> Expr {
        let start = self.current.span.start;
        self.advance(); // '('
        let expr = self.parse_expr();
        self.expect(TokenKind::RParen, "')'");
        Expr::new(expr.kind, Span::new(start, self.previous_end))
    }

    fn parse_array_literal(&mut self) -> Expr {
        let start = self.current.span.start;
        self.advance(); // '['
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket) && !self.at(TokenKind::Eof) {
            if self.at(TokenKind::Comma) {
                elements.push(None);
                self.advance();
                continue;
            }
            if self.at(TokenKind::Spread) {
                let sp_start = self.current.span.start;
                self.advance();
                let arg = self.parse_assign_expr();
                let span = Span::new(sp_start, self.previous_end);
                elements.push(Some(Box::new(Expr::new(ExprKind::Spread(Box::new(arg)), span))));
            } else {
                elements.push(Some(Box::new(self.parse_assign_expr())));
            }
            if !self.at(TokenKind::RBracket) && !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "']'");
        Expr::new(ExprKind::Array(elements), Span::new(start, self.previous_end))
    }

    fn parse_object_literal(&mut self) -> Expr {
        let start = self.current.span.start;
        self.advance(); // '{'
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            properties.push(self.parse_object_member());
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "'}'");
        Expr::new(ExprKind::Object(properties), Span::new(start, self.previous_end))
    }

    fn parse_object_member(&mut self) -> ObjectMember {
        let start = self.current.span.start;

        if self.eat(TokenKind::Spread) {
            let value = self.parse_assign_expr();
            return ObjectMember::Spread(Box::new(value));
        }

        if matches!(self.current.kind, TokenKind::Get | TokenKind::Set)
            && !self.peek_is(TokenKind::Colon)
            && !self.peek_is(TokenKind::Comma)
            && !self.peek_is(TokenKind::RBrace)
            && !self.peek_is(TokenKind::LParen)
        {
            let kind = if matches!(self.current.kind, TokenKind::Get) { PropertyKind::Get } else { PropertyKind::Set };
            self.advance();
            let (key, computed) = self.parse_property_key();
            let params = self.parse_params();
            let _return_type = types::parse_type_annotation(self);
            let body = self.parse_block_stmts();
            let fn_span = Span::new(start, self.previous_end);
            let value = Expr::new(
                ExprKind::Function(Box::new(Function { name: None, params, body, is_async: false, is_generator: false, return_type: None, span: fn_span })),
                fn_span,
            );
            return ObjectMember::Property(Property { key, value, kind, shorthand: false, computed, span: fn_span });
        }

        let is_async = self.eat(TokenKind::Async);
        let is_generator = self.eat(TokenKind::Star);
        let (key, computed) = self.parse_property_key();

        if self.at(TokenKind::LParen) {
            let params = self.parse_params();
            let return_type = types::parse_type_annotation(self);
            let body = self.parse_block_stmts();
            let fn_span = Span::new(start, self.previous_end);
            let value = Expr::new(ExprKind::Function(Box::new(Function { name: None, params, body, is_async, is_generator, return_type, span: fn_span })), fn_span);
            return ObjectMember::Property(Property { key, value, kind: PropertyKind::Method, shorthand: false, computed, span: fn_span });
        }

        if self.eat(TokenKind::Colon) {
            let value = self.parse_assign_expr();
            let span = Span::new(start, self.previous_end);
            return ObjectMember::Property(Property { key, value, kind: PropertyKind::Init, shorthand: false, computed, span });
        }

        // Shorthand `{ name }` (and `{ name = default }`, valid only when this
        // object literal is later re-read as a destructuring target by the
        // analyzer — this parser does not distinguish the two positions).
        let name = match &key {
            PropertyKey::Ident(n) => n.clone(),
            _ => {
                self.error("expected a shorthand property name");
                String::new()
            }
        };
        let ident_span = Span::new(start, self.previous_end);
        let mut value = Expr::new(ExprKind::Ident(name), ident_span);
        if self.eat(TokenKind::Eq) {
            let default = self.parse_assign_expr();
            let span = value.span.merge(default.span);
            value = Expr::new(ExprKind::Assign { op: AssignOp::Assign, left: Box::new(value), right: Box::new(default) }, span);
        }
        let span = Span::new(start, self.previous_end);
        ObjectMember::Property(Property { key, value, kind: PropertyKind::Init, shorthand: true, computed: false, span })
    }

    fn parse_property_key(&mut self) -> (PropertyKey, bool) {
        match self.current.kind.clone() {
            TokenKind::LBracket => {
                self.advance();
                let expr = self.parse_assign_expr();
                self.expect(TokenKind::RBracket, "']'");
                (PropertyKey::Computed(Box::new(expr)), true)
            }
            TokenKind::String(s) => {
                self.advance();
                (PropertyKey::String(s), false)
            }
            TokenKind::Number(n) => {
                self.advance();
                (PropertyKey::Number(n), false)
            }
            _ => (PropertyKey::Ident(self.parse_ident_name()), false),
        }
    }

    /// At a leading `<` in expression position: either a generic-arrow
    /// function (`<T>(x) => x`) or JSX. Tries the generic-arrow parse first
    /// and rolls back to JSX on any failure, per the module's lookahead table.
    fn parse_lt_prefixed_expr(&mut self) -> Expr {
        if let Some(arrow) = self.try_parse(Self::try_generic_arrow) {
            return arrow;
        }
        jsx::parse_jsx_primary(self)
    }

    fn try_generic_arrow(&mut self) -> Option<Expr> {
        let start = self.current.span.start;
        types::parse_generic_params_opaque(self)?;
        if !self.at(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_params();
        let return_type = types::parse_type_annotation(self);
        if !self.eat(TokenKind::Arrow) {
            return None;
        }
        let body = self.parse_arrow_body();
        let span = Span::new(start, self.previous_end);
        Some(Expr::new(ExprKind::Arrow(Box::new(ArrowFunction { params, body, is_async: false, return_type, span })), span))
    }
}

fn to_logical_op(kind: &TokenKind) -> Option<LogicalOp> {
    Some(match kind {
        TokenKind::AmpAmp => LogicalOp::And,
        TokenKind::PipePipe => LogicalOp::Or,
        TokenKind::QuestionQuestion => LogicalOp::NullishCoalesce,
        _ => return None,
    })
}

fn to_binary_op(kind: &TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::StarStar => BinaryOp::Pow,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::NotEq,
        TokenKind::EqEqEq => BinaryOp::StrictEq,
        TokenKind::BangEqEq => BinaryOp::StrictNotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::LtLt => BinaryOp::Shl,
        TokenKind::GtGt => BinaryOp::Shr,
        TokenKind::GtGtGt => BinaryOp::UShr,
        TokenKind::In => BinaryOp::In,
        TokenKind::Instanceof => BinaryOp::Instanceof,
        other => unreachable!("{other:?} is not a binary operator token"),
    }
}

fn to_assign_op(kind: &TokenKind) -> AssignOp {
    match kind {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        TokenKind::PercentEq => AssignOp::ModAssign,
        TokenKind::StarStarEq => AssignOp::PowAssign,
        TokenKind::LtLtEq => AssignOp::ShlAssign,
        TokenKind::GtGtEq => AssignOp::ShrAssign,
        TokenKind::GtGtGtEq => AssignOp::UShrAssign,
        TokenKind::PipeEq => AssignOp::BitOrAssign,
        TokenKind::CaretEq => AssignOp::BitXorAssign,
        TokenKind::AmpEq => AssignOp::BitAndAssign,
        TokenKind::AmpAmpEq => AssignOp::AndAssign,
        TokenKind::PipePipeEq => AssignOp::OrAssign,
        TokenKind::QuestionQuestionEq => AssignOp::NullishAssign,
        other => unreachable!("{other:?} is not an assignment operator token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let (program, diags) = parse(source);
        let errors: Vec<_> = diags.iter().filter(|d| d.severity == crate::diagnostics::Severity::Error).collect();
        assert!(errors.is_empty(), "unexpected parse errors for {source:?}: {errors:?}");
        program
    }

    #[test]
    fn parses_a_component_with_jsx_and_a_signal_call() {
        let program = parse_ok(
            r#"
            component Counter() {
                const [count, setCount] = createSignal(0);
                return <button onClick={() => setCount(count() + 1)}>{count()}</button>;
            }
            "#,
        );
        assert_eq!(program.stmts.len(), 1);
        assert!(matches!(program.stmts[0].kind, StmtKind::Component(_)));
    }

    #[test]
    fn parses_fragment_with_mixed_children() {
        let program = parse_ok("const el = <>Hello {name}!</>;");
        let StmtKind::Var { decls, .. } = &program.stmts[0].kind else { panic!("expected a var decl") };
        let Some(init) = &decls[0].init else { panic!("expected an initializer") };
        assert!(matches!(init.kind, ExprKind::JsxFragment(_)));
    }

    #[test]
    fn distinguishes_generic_arrow_from_jsx() {
        let program = parse_ok("const identity = <T,>(x: T) => x;");
        let StmtKind::Var { decls, .. } = &program.stmts[0].kind else { panic!("expected a var decl") };
        let Some(init) = &decls[0].init else { panic!("expected an initializer") };
        assert!(matches!(init.kind, ExprKind::Arrow(_)));
    }

    #[test]
    fn erases_type_annotations() {
        let program = parse_ok("function add(a: number, b: number): number { return a + b; }");
        let StmtKind::Function(f) = &program.stmts[0].kind else { panic!("expected a function") };
        assert!(f.return_type.is_some());
        assert!(matches!(f.params[0].binding.kind, BindingKind::Ident { type_ann: Some(_), .. }));
    }

    #[test]
    fn for_in_loop_does_not_eat_in_as_a_binary_operator() {
        let program = parse_ok("for (const key in obj) { use(key); }");
        assert!(matches!(program.stmts[0].kind, StmtKind::ForIn { .. }));
    }

    #[test]
    fn parses_destructured_params_with_defaults() {
        let program = parse_ok("component Greeting({ name = \"world\" }) { return <p>{name}</p>; }");
        let StmtKind::Component(c) = &program.stmts[0].kind else { panic!("expected a component") };
        assert!(matches!(c.params[0].binding.kind, BindingKind::Object { .. }));
    }
}
