//! Template resource: renders `*.template` files from the process environment.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::RenderError;

/// Suffix marking a source file as a template.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Suffix of the rendered sibling written next to a template.
pub const RENDERED_SUFFIX: &str = ".rendered";

/// `$$`, `$NAME` or `${NAME}`; anything else after a `$` is left alone.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|([_A-Za-z][_A-Za-z0-9]*)|\{([_A-Za-z][_A-Za-z0-9]*)\})")
        .expect("placeholder pattern is valid")
});

/// Snapshot of the variables available to template substitution.
///
/// Captured once per invocation so the simulation and commit passes render
/// identical content.
///
/// # Examples
///
/// ```
/// use dot_cli::resources::template::{Environment, substitute};
///
/// let env: Environment = [("USER", "ada")].into_iter().collect();
/// assert_eq!(substitute("hi $USER, ${SHELL}", &env), "hi ada, ${SHELL}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture every UTF-8 variable of the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Replace `$NAME` and `${NAME}` with values from `env`.
///
/// Names missing from `env` are left verbatim and `$$` collapses to a single
/// `$`. Substitution never fails.
#[must_use]
pub fn substitute(text: &str, env: &Environment) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }
            caps.get(2)
                .or_else(|| caps.get(3))
                .and_then(|name| env.get(name.as_str()))
                .map_or_else(
                    || caps.get(0).map_or("", |m| m.as_str()).to_string(),
                    str::to_string,
                )
        })
        .into_owned()
}

/// A template rendered from `source` into `destination`.
#[derive(Debug, Clone)]
pub struct TemplateResource<'a> {
    /// The template file.
    pub source: PathBuf,
    /// The rendered file written next to it.
    pub destination: PathBuf,
    env: &'a Environment,
}

impl<'a> TemplateResource<'a> {
    /// Create a new template resource.
    #[must_use]
    pub const fn new(source: PathBuf, destination: PathBuf, env: &'a Environment) -> Self {
        Self {
            source,
            destination,
            env,
        }
    }

    /// Whether source and destination coincide (nothing to render).
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.source == self.destination
    }

    /// Read the template and return the substituted text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Read`] if the template cannot be read as UTF-8.
    pub fn render(&self) -> Result<String, RenderError> {
        let text = std::fs::read_to_string(&self.source).map_err(|source| RenderError::Read {
            path: self.source.display().to_string(),
            source,
        })?;
        Ok(substitute(&text, self.env))
    }

    /// Render and write the destination file.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the template cannot be read or the
    /// destination cannot be written.
    pub fn write(&self) -> Result<(), RenderError> {
        let content = self.render()?;
        write_rendered(&self.destination, &content)
    }
}

fn write_rendered(path: &Path, content: &str) -> Result<(), RenderError> {
    std::fs::write(path, content).map_err(|source| RenderError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn env() -> Environment {
        [("K", "abc123"), ("HOME_DIR", "/home/ada"), ("EMPTY", "")]
            .into_iter()
            .collect()
    }

    // -----------------------------------------------------------------------
    // substitute
    // -----------------------------------------------------------------------

    #[test]
    fn substitutes_bare_and_braced_names() {
        assert_eq!(substitute("export K=$K", &env()), "export K=abc123");
        assert_eq!(substitute("${HOME_DIR}/bin", &env()), "/home/ada/bin");
    }

    #[test]
    fn unknown_names_are_left_verbatim() {
        assert_eq!(substitute("$MISSING ${MISSING}", &env()), "$MISSING ${MISSING}");
    }

    #[test]
    fn double_dollar_collapses() {
        assert_eq!(substitute("cost: $$5 $$K", &env()), "cost: $5 $K");
    }

    #[test]
    fn bare_name_is_greedy() {
        assert_eq!(substitute("$K_suffix", &env()), "$K_suffix");
        assert_eq!(substitute("${K}_suffix", &env()), "abc123_suffix");
    }

    #[test]
    fn invalid_placeholders_are_kept() {
        assert_eq!(substitute("$1 ${K trailing $", &env()), "$1 ${K trailing $");
    }

    #[test]
    fn empty_value_substitutes_to_nothing() {
        assert_eq!(substitute("[$EMPTY]", &env()), "[]");
    }

    #[test]
    fn environment_from_process_is_not_empty_when_path_set() {
        let env = Environment::from_process();
        if std::env::var("PATH").is_ok() {
            assert!(env.get("PATH").is_some());
            assert!(!env.is_empty());
        }
    }

    // -----------------------------------------------------------------------
    // TemplateResource
    // -----------------------------------------------------------------------

    #[test]
    fn write_creates_rendered_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("env.template");
        let destination = dir.path().join("env.rendered");
        std::fs::write(&source, "export K=$K").unwrap();

        let env = env();
        let resource = TemplateResource::new(source, destination.clone(), &env);
        assert!(!resource.is_identity());
        resource.write().unwrap();
        assert_eq!(
            std::fs::read_to_string(destination).unwrap(),
            "export K=abc123"
        );
    }

    #[test]
    fn plain_file_is_identity() {
        let env = env();
        let source = PathBuf::from("/p/bashrc");
        let resource = TemplateResource::new(source.clone(), source, &env);
        assert!(resource.is_identity());
    }

    #[test]
    fn render_missing_source_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::default();
        let resource = TemplateResource::new(
            dir.path().join("missing.template"),
            dir.path().join("missing.rendered"),
            &env,
        );
        let err = resource.render().unwrap_err();
        assert!(matches!(err, RenderError::Read { .. }));
    }

    #[test]
    fn write_into_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("env.template");
        std::fs::write(&source, "x").unwrap();
        let env = Environment::default();
        let resource =
            TemplateResource::new(source, dir.path().join("nope").join("env.rendered"), &env);
        assert!(matches!(
            resource.write().unwrap_err(),
            RenderError::Write { .. }
        ));
    }
}
