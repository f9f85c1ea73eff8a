//! Lenient HTML parsing for chapter documents.
//!
//! Source text goes through [`lexer::lex`] and is folded into a [`Document`]
//! by [`TreeBuilder`]. Neither stage fails: unbalanced or unknown markup is
//! recovered from, so decoding degrades field by field instead of aborting.

pub mod cursor;
pub mod lexer;
pub mod tree;

pub use lexer::{Attribute, Token, lex};
pub use tree::{Document, Element, Node, TreeBuilder};

pub fn parse_html(src: &str) -> Document {
    let mut builder = TreeBuilder::new();
    for token in lex(src) {
        builder.push(token);
    }
    builder.finish()
}
