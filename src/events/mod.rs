pub mod pointer;
pub mod resize;
pub mod visibility;

pub use pointer::wire_pointer_handlers;
pub use resize::wire_resize;
pub use visibility::observe_visibility;
