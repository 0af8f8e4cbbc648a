pub mod fountain_parser;

pub use fountain_parser::FountainParser;
pub use fountain_parser::ParseState;
pub use fountain_parser::{classify_line, clean_content, from_fountain};
