pub mod liner;

pub use liner::{to_screenplay_text, Liner};
