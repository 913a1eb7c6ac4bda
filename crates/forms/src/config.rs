//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Form rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormsConfig {
    /// Template directories, highest priority first (FORMS_TEMPLATE_PATHS,
    /// comma-separated, default: none).
    pub template_paths: Vec<PathBuf>,

    /// Debug mode (FORMS_DEBUG, falling back to DEBUG; default: false).
    pub debug: bool,
}

impl FormsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let template_paths = env::var("FORMS_TEMPLATE_PATHS")
            .map(|v| parse_paths(&v))
            .unwrap_or_default();

        let debug = env::var("FORMS_DEBUG")
            .or_else(|_| env::var("DEBUG"))
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            template_paths,
            debug,
        }
    }
}

fn parse_paths(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_keeps_order() {
        assert_eq!(
            parse_paths(" ./theme/forms , ,./plugins/forms"),
            vec![PathBuf::from("./theme/forms"), PathBuf::from("./plugins/forms")]
        );
        assert!(parse_paths("").is_empty());
    }

    #[test]
    fn test_parse_flag() {
        for v in ["1", "true", "TRUE", "yes", " on "] {
            assert!(parse_flag(v), "{v}");
        }
        for v in ["0", "false", "", "nope"] {
            assert!(!parse_flag(v), "{v}");
        }
    }
}
