pub mod element;
pub mod screenplay;
pub mod cast;
pub mod conf;

pub use element::{Alignment, ElementLayout, ElementType, ScreenplayElement};
pub use screenplay::{PartialScreenplay, Screenplay};
pub use cast::{CastMember, CastRole};
pub use conf::{Conf, SimpleConf};
