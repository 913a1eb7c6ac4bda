//! Per-request submission dispatch.

use tracing::debug;

use crate::error::FormResult;
use crate::request::RequestData;

use super::container::FormContainer;
use super::types::{Form, IDENTITY_FIELD};

/// Owns the registered forms for one request and processes submissions.
///
/// Build one per request; the form graph holds submitted values and must
/// not be shared between concurrent requests.
#[derive(Debug, Default)]
pub struct FormHandler {
    forms: FormContainer,
}

impl FormHandler {
    /// Create a handler with no forms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a form, replacing any form with the same name.
    pub fn register(&mut self, form: Form) {
        self.forms.add_form(form);
    }

    /// The registered forms.
    pub fn forms(&self) -> &FormContainer {
        &self.forms
    }

    /// Mutable access to the registered forms.
    pub fn forms_mut(&mut self) -> &mut FormContainer {
        &mut self.forms
    }

    /// Process every form the request was submitted by.
    ///
    /// Call once per request before any output is emitted. Does nothing
    /// unless the request carries a `form` parameter. Matching forms are
    /// processed in registration order (typically zero or one); the first
    /// handler error stops the pass. Returns the number of forms processed.
    pub fn maybe_process_forms(&mut self, request: &dyn RequestData) -> FormResult<usize> {
        if !request.has_any(IDENTITY_FIELD) {
            return Ok(0);
        }

        let mut processed = 0;
        for form in self.forms.iter_mut() {
            if form.should_handle(request) {
                form.process(request)?;
                processed += 1;
            }
        }

        if processed == 0 {
            debug!("no registered form matched the submission");
        }

        Ok(processed)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::field::Field;
    use crate::method::Method;
    use crate::request::RequestParams;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_form(name: &str, calls: &Arc<AtomicUsize>) -> Form {
        let calls = Arc::clone(calls);
        Form::new(name, move |_: &Form| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_no_form_parameter_is_noop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut handler = FormHandler::new();
        handler.register(counting_form("contact", &calls));
        handler.register(counting_form("search", &calls));

        let request = RequestParams::new().query_param("email", "a@b.com");
        assert_eq!(handler.maybe_process_forms(&request).unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            handler
                .forms()
                .get_form("contact")
                .unwrap()
                .fields()
                .len(),
            1
        );
    }

    #[test]
    fn test_processes_only_matching_form() {
        let contact_calls = Arc::new(AtomicUsize::new(0));
        let search_calls = Arc::new(AtomicUsize::new(0));

        let mut handler = FormHandler::new();
        handler.register(counting_form("contact", &contact_calls).field(Field::text("q")));
        handler.register(counting_form("search", &search_calls).field(Field::text("q")));

        let request = RequestParams::new()
            .query_param("form", "search")
            .query_param("q", "rust");

        assert_eq!(handler.maybe_process_forms(&request).unwrap(), 1);
        assert_eq!(contact_calls.load(Ordering::SeqCst), 0);
        assert_eq!(search_calls.load(Ordering::SeqCst), 1);

        let forms = handler.forms();
        assert_eq!(forms.get_form("search").unwrap().field_value("q"), Some("rust"));
        assert_eq!(forms.get_form("contact").unwrap().field_value("q"), None);
    }

    #[test]
    fn test_method_selects_source() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut handler = FormHandler::new();
        handler.register(counting_form("contact", &calls).with_method(Method::Post));

        // Present only in the query string; a POST form ignores it.
        let request = RequestParams::new().query_param("form", "contact");
        assert_eq!(handler.maybe_process_forms(&request).unwrap(), 0);

        let request = RequestParams::new().body_param("form", "contact");
        assert_eq!(handler.maybe_process_forms(&request).unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unmatched_submission_is_silent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut handler = FormHandler::new();
        handler.register(counting_form("contact", &calls));

        let request = RequestParams::new().query_param("form", "unknown");
        assert_eq!(handler.maybe_process_forms(&request).unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_error_propagates() {
        let mut handler = FormHandler::new();
        handler.register(Form::new("contact", |_: &Form| anyhow::bail!("boom")));

        let request = RequestParams::new().query_param("form", "contact");
        let err = handler.maybe_process_forms(&request).unwrap_err();
        assert!(matches!(err, FormError::Handler { .. }));
    }
}
