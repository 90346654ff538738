//! JSX element, fragment, and attribute parsing.
//!
//! JSX children are scanned in `LexerMode::JsxText`, which changes what
//! `next_token` returns: raw text runs, `<` (a nested element), `</` (a
//! closing tag), and `{` (an expression hole) are the only productions. This
//! module is responsible for pushing/popping that mode at exactly the right
//! points: off while reading a tag's name and attributes (ordinary token
//! dispatch), on while reading children.

use crate::ast::{Expr, ExprKind, JsxAttrValue, JsxAttribute, JsxChild, JsxElement, JsxElementName, JsxFragment};
use crate::lexer::LexerMode;
use crate::span::Span;
use crate::token::TokenKind;

use super::Parser;

/// Entry point: `current` is the `<` that opens an element or fragment.
/// Leaves `current` on the first token after the element/fragment's closing
/// `>`.
pub fn parse_jsx_primary(p: &mut Parser) -> Expr {
    let start = p.current.span.start;
    p.advance(); // consume '<'

    if p.at(TokenKind::Gt) {
        let fragment = parse_fragment_tail(p, start);
        let span = fragment.span;
        return Expr::new(ExprKind::JsxFragment(Box::new(fragment)), span);
    }

    let element = parse_element_tail(p, start);
    let span = element.span;
    Expr::new(ExprKind::JsxElement(Box::new(element)), span)
}

fn parse_element_name(p: &mut Parser) -> JsxElementName {
    let mut parts = vec![p.parse_ident_name()];
    while p.at(TokenKind::Dot) {
        p.advance();
        parts.push(p.parse_ident_name());
    }
    if parts.len() == 1 {
        JsxElementName::Ident(parts.remove(0))
    } else {
        JsxElementName::MemberExpr(parts)
    }
}

fn parse_attributes(p: &mut Parser) -> Vec<JsxAttribute> {
    let mut attributes = Vec::new();
    loop {
        match &p.current.kind {
            TokenKind::Slash | TokenKind::Gt | TokenKind::Eof => break,
            TokenKind::LBrace => {
                let start = p.current.span.start;
                p.advance(); // '{'
                p.expect(TokenKind::Spread, "'...' in attribute spread");
                let argument = p.parse_assign_expr();
                p.lexer_mut().set_allow_regex(false);
                p.expect(TokenKind::RBrace, "'}' to close attribute spread");
                attributes.push(JsxAttribute::Spread {
                    argument,
                    span: Span::new(start, p.previous_end),
                });
            }
            _ => {
                let start = p.current.span.start;
                let name = parse_attribute_name(p);
                let value = if p.eat(TokenKind::Eq) {
                    Some(parse_attribute_value(p))
                } else {
                    None
                };
                p.lexer_mut().set_allow_regex(false);
                attributes.push(JsxAttribute::Attribute {
                    name,
                    value,
                    span: Span::new(start, p.previous_end),
                });
            }
        }
    }
    attributes
}

/// JSX attribute names may contain hyphens (`data-foo`, `aria-label`), which
/// are not valid in plain identifiers, so they are reassembled here from
/// separate identifier/minus tokens.
fn parse_attribute_name(p: &mut Parser) -> String {
    let mut name = p.parse_ident_name();
    while p.at(TokenKind::Minus) {
        p.advance();
        name.push('-');
        name.push_str(&p.parse_ident_name());
    }
    name
}

fn parse_attribute_value(p: &mut Parser) -> JsxAttrValue {
    match p.current.kind.clone() {
        TokenKind::String(s) => {
            p.advance();
            p.lexer_mut().set_allow_regex(false);
            JsxAttrValue::String(s)
        }
        TokenKind::LBrace => {
            p.advance(); // '{'
            let expr = p.parse_assign_expr();
            p.lexer_mut().set_allow_regex(false);
            p.expect(TokenKind::RBrace, "'}' to close attribute expression");
            JsxAttrValue::Expr(Box::new(expr))
        }
        _ => {
            p.error("expected a string or '{...}' attribute value");
            JsxAttrValue::String(String::new())
        }
    }
}

fn parse_fragment_tail(p: &mut Parser, start: u32) -> JsxFragment {
    // Push `JsxText` before consuming the opening `>` so the lexer scans
    // the first child in the right mode: `expect` advances past `>` and
    // lexes the token that follows it, which must already be a JSX text
    // token rather than a Normal-mode one.
    p.lexer_mut().push_mode(LexerMode::JsxText);
    p.expect(TokenKind::Gt, "'>' to open a fragment");
    let children = parse_children(p);
    expect_closing_tag(p, None);
    JsxFragment {
        children,
        span: Span::new(start, p.previous_end),
    }
}

fn parse_element_tail(p: &mut Parser, start: u32) -> JsxElement {
    let name = parse_element_name(p);
    let attributes = parse_attributes(p);

    if p.eat(TokenKind::Slash) {
        p.expect(TokenKind::Gt, "'>' to close a self-closing tag");
        let opening_span = Span::new(start, p.previous_end);
        return JsxElement {
            opening: crate::ast::JsxOpeningElement {
                name,
                attributes,
                self_closing: true,
                span: opening_span,
            },
            children: Vec::new(),
            span: opening_span,
        };
    }

    // Same ordering as the fragment case: push `JsxText` before the `>` is
    // consumed so the token scanned immediately after it is already a JSX
    // text/brace/`<` token, not a Normal-mode one.
    p.lexer_mut().push_mode(LexerMode::JsxText);
    p.expect(TokenKind::Gt, "'>' to close an opening tag");
    let opening_span = Span::new(start, p.previous_end);
    let children = parse_children(p);
    expect_closing_tag(p, Some(&name));

    JsxElement {
        opening: crate::ast::JsxOpeningElement {
            name,
            attributes,
            self_closing: false,
            span: opening_span,
        },
        children,
        span: Span::new(start, p.previous_end),
    }
}

/// Called with `JsxText` mode already pushed (by the caller, before it
/// consumed the opening `>`) and `current` already holding the first child
/// token scanned in that mode — this loop must not advance before reading
/// it, or that first child is silently skipped.
fn parse_children(p: &mut Parser) -> Vec<JsxChild> {
    let mut children = Vec::new();

    loop {
        match p.current.kind.clone() {
            TokenKind::JsxText(text) => {
                if !text.is_empty() {
                    children.push(JsxChild::Text(text));
                }
                p.advance();
            }
            TokenKind::JsxCloseTagStart | TokenKind::Eof => break,
            TokenKind::LBrace => {
                p.lexer_mut().pop_mode();
                p.lexer_mut().push_mode(LexerMode::JsxExpr);
                p.advance(); // '{'
                if p.at(TokenKind::RBrace) {
                    // `{}` — an empty hole, emitted by formatters around
                    // comments; contributes no child.
                } else {
                    let expr = p.parse_expr();
                    children.push(JsxChild::Expr(Box::new(expr)));
                }
                p.lexer_mut().pop_mode();
                p.lexer_mut().set_allow_regex(false);
                p.expect(TokenKind::RBrace, "'}' to close a JSX expression child");
                p.lexer_mut().push_mode(LexerMode::JsxText);
                p.advance();
            }
            TokenKind::Lt => {
                p.lexer_mut().pop_mode();
                let nested = parse_jsx_primary(p);
                let child = match nested.kind {
                    ExprKind::JsxElement(el) => JsxChild::Element(el),
                    ExprKind::JsxFragment(fr) => JsxChild::Fragment(fr),
                    _ => unreachable!("parse_jsx_primary always returns JSX"),
                };
                children.push(child);
                p.lexer_mut().push_mode(LexerMode::JsxText);
                p.advance();
            }
            _ => {
                p.error("unexpected token inside JSX children");
                p.advance();
            }
        }
    }

    p.lexer_mut().pop_mode();
    children
}

fn expect_closing_tag(p: &mut Parser, expected: Option<&JsxElementName>) {
    if !p.eat(TokenKind::JsxCloseTagStart) {
        p.error("expected a closing tag");
        return;
    }
    if p.at(TokenKind::Gt) {
        // `</>` — fragment close, nothing to check.
        p.advance();
        return;
    }
    let closing_name = parse_element_name(p);
    if let Some(expected) = expected {
        if expected.as_source_text() != closing_name.as_source_text() {
            p.error(format!(
                "mismatched closing tag: expected </{}>, found </{}>",
                expected.as_source_text(),
                closing_name.as_source_text()
            ));
        }
    }
    p.expect(TokenKind::Gt, "'>' to close the closing tag");
}
