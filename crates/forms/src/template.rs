//! Tera-backed template rendering for forms.
//!
//! Templates are looked up across an ordered list of directories; the first
//! directory that provides a template name wins. A bundled `form.html` is
//! used when no directory overrides it.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tera::{Context, Tera};
use tracing::debug;

use crate::config::FormsConfig;
use crate::error::{FormError, FormResult};
use crate::render::FormRenderer;

/// Name of the template used to wrap a form.
pub const FORM_TEMPLATE: &str = "form.html";

const DEFAULT_FORM_TEMPLATE: &str = include_str!("../templates/form.html");

type PathFilter = Box<dyn Fn(Vec<PathBuf>) -> Vec<PathBuf> + Send + Sync>;

/// Template renderer with ordered search directories.
pub struct TemplateHandler {
    tera: RwLock<Tera>,
    paths: Vec<PathBuf>,
    debug: bool,
}

impl TemplateHandler {
    /// Start building a template handler.
    pub fn builder() -> TemplateHandlerBuilder {
        TemplateHandlerBuilder::default()
    }

    /// Create a template handler from configuration.
    pub fn from_config(config: &FormsConfig) -> FormResult<Self> {
        Self::builder()
            .paths(config.template_paths.iter().cloned())
            .debug(config.debug)
            .build()
    }

    /// Create a handler that only knows the bundled templates.
    pub fn bundled() -> FormResult<Self> {
        Self::builder().build()
    }

    /// Template directories, highest priority first.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Whether templates are reloaded on every render.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Names of all loaded templates, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let tera = self.tera.read();
        let mut names: Vec<String> = tera.get_template_names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Render a template to a string.
    pub fn as_string(&self, template: &str, context: &Context) -> FormResult<String> {
        self.reload_if_debug()?;

        let tera = self.tera.read();
        if tera.get_template(template).is_err() {
            return Err(FormError::TemplateNotFound(template.to_string()));
        }

        let output = tera.render(template, context)?;
        if self.debug {
            debug!(template, bytes = output.len(), "rendered template");
        }
        Ok(output)
    }

    /// Render a template into `writer`.
    pub fn render<W: Write>(&self, template: &str, context: &Context, writer: W) -> FormResult<()> {
        self.reload_if_debug()?;

        let tera = self.tera.read();
        if tera.get_template(template).is_err() {
            return Err(FormError::TemplateNotFound(template.to_string()));
        }

        tera.render_to(template, context, writer)?;
        Ok(())
    }

    fn reload_if_debug(&self) -> FormResult<()> {
        if self.debug {
            let fresh = load_templates(&self.paths)?;
            *self.tera.write() = fresh;
        }
        Ok(())
    }
}

impl FormRenderer for TemplateHandler {
    fn render_form(
        &self,
        attributes: &BTreeMap<String, String>,
        content: &str,
    ) -> FormResult<String> {
        let mut context = Context::new();
        context.insert("attributes", attributes);
        context.insert("content", content);
        self.as_string(FORM_TEMPLATE, &context)
    }
}

impl std::fmt::Debug for TemplateHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateHandler")
            .field("paths", &self.paths)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TemplateHandler`].
#[derive(Default)]
pub struct TemplateHandlerBuilder {
    paths: Vec<PathBuf>,
    filters: Vec<PathFilter>,
    debug: bool,
}

impl TemplateHandlerBuilder {
    /// Append a template directory (lower priority than those already added).
    pub fn path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.paths.push(dir.into());
        self
    }

    /// Append several template directories in order.
    pub fn paths(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.paths.extend(dirs);
        self
    }

    /// Register a filter that may reorder, add, or drop directories.
    ///
    /// Filters run in registration order when the handler is built.
    pub fn filter_paths<F>(mut self, filter: F) -> Self
    where
        F: Fn(Vec<PathBuf>) -> Vec<PathBuf> + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Enable or disable debug mode.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Load templates and build the handler.
    pub fn build(self) -> FormResult<TemplateHandler> {
        let paths = self
            .filters
            .iter()
            .fold(self.paths, |paths, filter| filter(paths));

        let tera = load_templates(&paths)?;
        debug!(
            dirs = paths.len(),
            templates = tera.get_template_names().count(),
            debug = self.debug,
            "loaded form templates"
        );

        Ok(TemplateHandler {
            tera: RwLock::new(tera),
            paths,
            debug: self.debug,
        })
    }
}

/// Load templates from `paths`, earlier directories taking precedence.
fn load_templates(paths: &[PathBuf]) -> FormResult<Tera> {
    let mut tera = Tera::default();

    for dir in paths {
        if !dir.is_dir() {
            debug!(path = %dir.display(), "skipping missing template directory");
            continue;
        }
        // extend() never replaces a name that is already loaded
        tera.extend(&load_dir(dir)?)?;
    }

    if tera.get_template(FORM_TEMPLATE).is_err() {
        tera.add_raw_template(FORM_TEMPLATE, DEFAULT_FORM_TEMPLATE)?;
    }

    Ok(tera)
}

fn load_dir(dir: &Path) -> FormResult<Tera> {
    let pattern = dir.join("**/*.html");
    let pattern_str = pattern
        .to_str()
        .ok_or_else(|| FormError::InvalidTemplatePath(dir.to_path_buf()))?;
    Ok(Tera::new(pattern_str)?)
}
