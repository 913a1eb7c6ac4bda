#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Template backend tests.

use trovato_forms::template::FORM_TEMPLATE;
use trovato_forms::{
    DirectRenderer, Field, Form, FormError, FormRenderer, FormsConfig, TemplateHandler,
};
use trovato_test_utils::{assert, rendered_field_names, write_template};

fn signup_form() -> Form {
    Form::new("signup", |_: &Form| Ok(()))
        .attribute("class", "signup")
        .field(Field::email("email"))
        .field(Field::submit("go", "Sign up"))
}

#[test]
fn test_bundled_template_matches_direct_field_order() {
    let handler = TemplateHandler::bundled().unwrap();
    let form = signup_form();

    let templated = form.render_with(&handler).unwrap();
    let direct = form.render_with(&DirectRenderer).unwrap();

    assert::is_form(&templated);
    assert_eq!(rendered_field_names(&templated), rendered_field_names(&direct));
    assert::contains(&templated, "class=\"signup\"");
    assert::contains(&templated, "method=\"GET\"");
}

#[test]
fn test_first_directory_wins() {
    let high = tempfile::tempdir().unwrap();
    let low = tempfile::tempdir().unwrap();
    write_template(high.path(), FORM_TEMPLATE, "<form data-source=\"high\">{{ content | safe }}</form>")
        .unwrap();
    write_template(low.path(), FORM_TEMPLATE, "<form data-source=\"low\">{{ content | safe }}</form>")
        .unwrap();
    write_template(low.path(), "notice.html", "<p>{{ message }}</p>").unwrap();

    let handler = TemplateHandler::builder()
        .path(high.path())
        .path(low.path())
        .build()
        .unwrap();

    let html = signup_form().render_with(&handler).unwrap();
    assert::contains(&html, "data-source=\"high\"");
    assert::not_contains(&html, "data-source=\"low\"");

    // Templates only present in a lower-priority directory are still found.
    let mut context = tera::Context::new();
    context.insert("message", "Thanks");
    assert_eq!(handler.as_string("notice.html", &context).unwrap(), "<p>Thanks</p>");
}

#[test]
fn test_filter_can_prepend_directory() {
    let base = tempfile::tempdir().unwrap();
    let theme = tempfile::tempdir().unwrap();
    write_template(base.path(), FORM_TEMPLATE, "<form data-source=\"base\">{{ content | safe }}</form>")
        .unwrap();
    write_template(theme.path(), FORM_TEMPLATE, "<form data-source=\"theme\">{{ content | safe }}</form>")
        .unwrap();

    let theme_dir = theme.path().to_path_buf();
    let handler = TemplateHandler::builder()
        .path(base.path())
        .filter_paths(move |mut paths| {
            paths.insert(0, theme_dir.clone());
            paths
        })
        .build()
        .unwrap();

    let html = signup_form().render_with(&handler).unwrap();
    assert::contains(&html, "data-source=\"theme\"");
}

#[test]
fn test_debug_mode_reloads_templates() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path(), "status.html", "v1").unwrap();

    let handler = TemplateHandler::builder()
        .path(dir.path())
        .debug(true)
        .build()
        .unwrap();
    assert!(handler.is_debug());
    assert_eq!(handler.as_string("status.html", &tera::Context::new()).unwrap(), "v1");

    write_template(dir.path(), "status.html", "v2").unwrap();
    assert_eq!(handler.as_string("status.html", &tera::Context::new()).unwrap(), "v2");
}

#[test]
fn test_non_debug_mode_keeps_loaded_templates() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path(), "status.html", "v1").unwrap();

    let handler = TemplateHandler::builder().path(dir.path()).build().unwrap();
    write_template(dir.path(), "status.html", "v2").unwrap();
    assert_eq!(handler.as_string("status.html", &tera::Context::new()).unwrap(), "v1");
}

#[test]
fn test_from_config() {
    let dir = tempfile::tempdir().unwrap();
    write_template(dir.path(), "extra.html", "extra").unwrap();

    let config = FormsConfig {
        template_paths: vec![dir.path().to_path_buf()],
        debug: false,
    };
    let handler = TemplateHandler::from_config(&config).unwrap();

    assert_eq!(handler.paths(), &[dir.path().to_path_buf()]);
    assert_eq!(
        handler.template_names(),
        vec!["extra.html".to_string(), FORM_TEMPLATE.to_string()]
    );
}

#[test]
fn test_unknown_template_is_an_error() {
    let handler = TemplateHandler::bundled().unwrap();
    let renderer: &dyn FormRenderer = &handler;
    assert!(renderer.render_form(&Default::default(), "").is_ok());
    assert!(matches!(
        handler.as_string("missing.html", &tera::Context::new()),
        Err(FormError::TemplateNotFound(_))
    ));
}
