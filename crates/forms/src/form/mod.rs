//! Forms, the form registry, and per-request submission dispatch.
//!
//! A form is identified on submission by its hidden `form` field. The
//! [`FormHandler`] checks the request for that parameter, binds submitted
//! values into the matching form, and calls the form's handler.

mod container;
mod handler;
mod types;

pub use container::FormContainer;
pub use handler::FormHandler;
pub use types::{Form, FormCallback, IDENTITY_FIELD};
