//! Mailstyle HTML
//!
//! Markup lexer, token stream and serializer.

mod lexer;
mod palette;
mod serialize;
mod token;

pub use lexer::{tokenize, Lexer};
pub use palette::{ConsoleColor, Palette, TokenColor};
pub use serialize::{colorize, serialize_with, to_text};
pub use token::{tag_spans, TagSpan, Token, TokenKind};
