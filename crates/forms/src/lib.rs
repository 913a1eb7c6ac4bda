//! Trovato Forms
//!
//! Declarative forms for plugins. A [`Form`] owns an ordered set of
//! [`Field`]s, binds submitted values into them, and hands itself to a
//! registered handler. The [`FormHandler`] is the single per-request entry
//! point that finds the submitted form and processes it.
//!
//! Rendering is direct string building by default ([`DirectRenderer`]);
//! the Tera-backed [`TemplateHandler`] can be injected wherever template
//! overrides are wanted.

pub mod config;
pub mod error;
pub mod factory;
pub mod field;
pub mod form;
pub mod html;
pub mod method;
pub mod render;
pub mod request;
pub mod template;

pub use config::FormsConfig;
pub use error::{FormError, FormResult};
pub use factory::{FieldDefinition, FormDefinition, FormFactory};
pub use field::{Field, FieldContainer};
pub use form::{Form, FormCallback, FormContainer, FormHandler, IDENTITY_FIELD};
pub use method::Method;
pub use render::{DirectRenderer, FormRenderer};
pub use request::{RequestData, RequestParams};
pub use template::{TemplateHandler, TemplateHandlerBuilder};
