//! PlayScript lexer: converts source text into a token stream.

pub mod char_stream;
pub mod lexer;
pub mod token;

pub use char_stream::CharStream;
pub use lexer::{tokenize, LexResult, Tokenizer};
pub use token::{Token, TokenKind, KEYWORDS, SEPARATORS};
