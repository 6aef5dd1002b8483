//! Page element contract.
//!
//! The controller never touches a rendering framework; it writes text,
//! visibility and disabled state to named elements through [`Page`].

pub mod element;
pub mod page;

pub use element::ElementId;
pub use page::{ElementState, MemoryPage, Page};
