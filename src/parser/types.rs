//! Type-annotation erasure.
//!
//! Nothing downstream inspects the shape of a type annotation — the
//! transformer and emitter only ever need to know that it existed so it can
//! be dropped. So instead of building a type AST (as a type-checker would),
//! this module only ever finds the *extent* of a type expression and hands
//! back its span. The grammar walked here is permissive on purpose: it is
//! built to find where a type ends, not to validate that it is well-formed.

use crate::ast::TypeSpan;
use crate::span::Span;
use crate::token::TokenKind;

use super::Parser;

/// Parses `: Type` if a colon is present, erasing the type to its span.
pub fn parse_type_annotation(p: &mut Parser) -> Option<TypeSpan> {
    if !p.eat(TokenKind::Colon) {
        return None;
    }
    let start = p.current.span.start;
    consume_type_expr(p);
    Some(TypeSpan(Span::new(start, p.previous_end)))
}

/// Parses `<T, U extends Foo = Bar>` if present (component/function type
/// parameters), erasing it to its span.
pub fn parse_generic_params_opaque(p: &mut Parser) -> Option<TypeSpan> {
    if !p.at(TokenKind::Lt) {
        return None;
    }
    let start = p.current.span.start;
    p.lexer_mut().enter_type_context();
    p.advance();
    if !p.at(TokenKind::Gt) {
        loop {
            consume_type_expr(p);
            if p.eat(TokenKind::Eq) {
                consume_type_expr(p);
            }
            if !p.eat(TokenKind::Comma) {
                break;
            }
            if p.at(TokenKind::Gt) {
                break;
            }
        }
    }
    p.expect(TokenKind::Gt, "'>' to close type parameter list");
    p.lexer_mut().exit_type_context();
    Some(TypeSpan(Span::new(start, p.previous_end)))
}

/// Parses a generic *argument* list `<Foo, Bar<Baz>>` as used after `as`,
/// in a type position, or when disambiguating a generic function call.
/// Returns the span consumed, including the angle brackets.
pub fn consume_generic_args(p: &mut Parser) -> Span {
    let start = p.current.span.start;
    p.lexer_mut().enter_type_context();
    p.advance(); // '<'
    if !p.at(TokenKind::Gt) {
        consume_type_expr(p);
        while p.eat(TokenKind::Comma) {
            if p.at(TokenKind::Gt) {
                break;
            }
            consume_type_expr(p);
        }
    }
    p.expect(TokenKind::Gt, "'>' to close type argument list");
    p.lexer_mut().exit_type_context();
    Span::new(start, p.previous_end)
}

/// One union/intersection chain, plus a trailing `extends ... ? ... : ...`
/// conditional type if present.
pub fn consume_type_expr(p: &mut Parser) {
    consume_type_term(p);
    loop {
        match &p.current.kind {
            TokenKind::Pipe | TokenKind::Amp => {
                p.advance();
                consume_type_term(p);
            }
            TokenKind::Extends => {
                p.advance();
                consume_type_term(p);
                if p.eat(TokenKind::Question) {
                    consume_type_expr(p);
                    p.expect(TokenKind::Colon, "':' in conditional type");
                    consume_type_expr(p);
                }
            }
            _ => break,
        }
    }
}

fn is_type_modifier_keyword(name: &str) -> bool {
    matches!(name, "keyof" | "typeof" | "readonly" | "infer" | "unique" | "asserts" | "is")
}

fn consume_type_term(p: &mut Parser) {
    while matches!(&p.current.kind, TokenKind::Identifier(name) if is_type_modifier_keyword(name)) {
        p.advance();
    }

    match p.current.kind.clone() {
        TokenKind::LParen => consume_balanced(p, TokenKind::LParen, TokenKind::RParen),
        TokenKind::LBrace => consume_balanced(p, TokenKind::LBrace, TokenKind::RBrace),
        TokenKind::LBracket => consume_balanced(p, TokenKind::LBracket, TokenKind::RBracket),
        TokenKind::String(_)
        | TokenKind::Number(_)
        | TokenKind::BigInt(_)
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Null
        | TokenKind::TemplateNoSub(_) => {
            p.advance();
        }
        TokenKind::TemplateHead(_) => {
            p.advance();
            loop {
                consume_type_expr(p);
                match &p.current.kind {
                    TokenKind::TemplateMiddle(_) => {
                        p.advance();
                    }
                    TokenKind::TemplateTail(_) => {
                        p.advance();
                        break;
                    }
                    _ => break,
                }
            }
        }
        TokenKind::Identifier(_) => {
            p.advance();
            while p.eat(TokenKind::Dot) {
                let _ = p.parse_ident_name();
            }
        }
        TokenKind::Minus => {
            // negative numeric literal type, e.g. `-1`
            p.advance();
            if matches!(p.current.kind, TokenKind::Number(_)) {
                p.advance();
            }
        }
        _ => {
            // Permissive: an unrecognized token inside a type position still
            // gets consumed so erasure makes forward progress rather than
            // looping forever.
            if !matches!(p.current.kind, TokenKind::Eof) {
                p.advance();
            }
        }
    }

    if p.at(TokenKind::Lt) {
        consume_generic_args(p);
    }

    loop {
        if p.at(TokenKind::LBracket) {
            p.advance();
            if !p.at(TokenKind::RBracket) {
                consume_type_expr(p);
            }
            p.expect(TokenKind::RBracket, "']'");
        } else {
            break;
        }
    }

    if p.eat(TokenKind::Arrow) {
        consume_type_expr(p);
    }
}

/// Skips a `{ ... }` body wholesale, for declarations (`interface`) whose
/// members are never inspected, only erased.
pub fn skip_balanced_braces(p: &mut Parser) {
    consume_balanced(p, TokenKind::LBrace, TokenKind::RBrace);
}

/// Skips a balanced-bracket run starting at `open`, stopping right after the
/// matching `close`. Other bracket kinds nested inside pass through as
/// ordinary tokens; only `open`/`close` pairs of the same kind are counted,
/// which is sufficient for well-formed input.
fn consume_balanced(p: &mut Parser, open: TokenKind, close: TokenKind) {
    p.advance();
    let mut depth: u32 = 1;
    loop {
        if p.at(open.clone()) {
            depth += 1;
            p.advance();
            continue;
        }
        if p.at(close.clone()) {
            depth -= 1;
            p.advance();
            if depth == 0 {
                break;
            }
            continue;
        }
        if p.at(TokenKind::Eof) {
            p.error("unexpected end of input while erasing a type annotation");
            break;
        }
        p.advance();
    }
}
