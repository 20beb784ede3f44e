pub mod lexer;
mod reader;

pub use lexer::{tokenize, SpannedToken, Token};
pub use reader::read;
