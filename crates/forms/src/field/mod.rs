//! Form fields and the ordered container that holds them.

mod container;
mod types;

pub use container::FieldContainer;
pub use types::Field;
