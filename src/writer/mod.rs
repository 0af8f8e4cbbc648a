pub mod fountain;
pub mod fdx;
pub mod rtf;

pub use fountain::{format_element, to_fountain};
pub use fdx::{escape_xml, to_fdx};
pub use rtf::{escape_rtf, to_rtf};
