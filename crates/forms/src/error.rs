//! Form error types.

use thiserror::Error;

/// Errors raised while building, processing, or rendering forms.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid form method: {0}")]
    InvalidMethod(String),

    #[error("field name \"{0}\" is reserved for the form identity field")]
    ReservedFieldName(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template directory is not valid UTF-8: {}", .0.display())]
    InvalidTemplatePath(std::path::PathBuf),

    #[error("template error")]
    Template(#[from] tera::Error),

    #[error("form handler for \"{form}\" failed")]
    Handler {
        form: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid form definition: {0}")]
    Definition(String),
}

/// Result type alias using FormError.
pub type FormResult<T> = Result<T, FormError>;
