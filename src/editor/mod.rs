pub mod state;
pub mod controller;

pub use state::{Caret, EditorEvent, EditorKey, EditorState};
pub use controller::{
    cycle_backward, cycle_forward, next_type_on_enter, type_menu_options, EditorController,
    EditorSession, Transition,
};
