pub mod template;

use crate::utils::AppError;
use std::path::{Path, PathBuf};

const SIGNUP_HTML: &str = include_str!("../../templates/signup.html");
const LOGIN_HTML: &str = include_str!("../../templates/login.html");
const SUCCESS_HTML: &str = include_str!("../../templates/success.html");

/// The three pages the site serves, with the values each one shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    Signup {
        error: Option<&'a str>,
    },
    Login {
        success: Option<&'a str>,
        error: Option<&'a str>,
    },
    Success {
        name: &'a str,
        studies: &'a str,
    },
}

impl<'a> View<'a> {
    pub fn file_name(&self) -> &'static str {
        match self {
            View::Signup { .. } => "signup.html",
            View::Login { .. } => "login.html",
            View::Success { .. } => "success.html",
        }
    }

    fn fields(&self) -> Vec<(&'static str, Option<&'a str>)> {
        match *self {
            View::Signup { error } => vec![("error", error)],
            View::Login { success, error } => vec![("success", success), ("error", error)],
            View::Success { name, studies } => vec![("name", Some(name)), ("studies", Some(studies))],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewRenderer {
    signup: String,
    login: String,
    success: String,
}

impl ViewRenderer {
    /// Renderer using the templates compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            signup: SIGNUP_HTML.to_string(),
            login: LOGIN_HTML.to_string(),
            success: SUCCESS_HTML.to_string(),
        }
    }

    /// Reads each template from `dir`, keeping the embedded copy for any
    /// file that cannot be read.
    pub fn from_dir(dir: &Path) -> Self {
        let load = |file: &str, fallback: &str| match std::fs::read_to_string(dir.join(file)) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("⚠️  Could not read {}/{} ({}), using built-in view", dir.display(), file, e);
                fallback.to_string()
            }
        };

        Self {
            signup: load("signup.html", SIGNUP_HTML),
            login: load("login.html", LOGIN_HTML),
            success: load("success.html", SUCCESS_HTML),
        }
    }

    pub fn render(&self, view: &View<'_>) -> Result<String, AppError> {
        let source = match view {
            View::Signup { .. } => &self.signup,
            View::Login { .. } => &self.login,
            View::Success { .. } => &self.success,
        };

        template::render(source, &view.fields())
            .map_err(|e| match e {
                AppError::RenderError(msg) => AppError::RenderError(format!("{}: {}", view.file_name(), msg)),
                other => other,
            })
    }
}

/// Creates `dir` if needed and writes any default template that is missing.
/// Existing files are left as they are. Returns the paths that were written.
pub fn provision_templates(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (file, contents) in [
        ("signup.html", SIGNUP_HTML),
        ("login.html", LOGIN_HTML),
        ("success.html", SUCCESS_HTML),
    ] {
        let path = dir.join(file);
        if path.exists() {
            continue;
        }
        std::fs::write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_signup_without_error_has_no_banner() {
        let html = ViewRenderer::embedded().render(&View::Signup { error: None }).unwrap();

        assert!(html.contains("<title>Sign Up</title>"));
        assert!(html.contains(r#"action="/signup""#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_signup_with_error() {
        let html = ViewRenderer::embedded()
            .render(&View::Signup { error: Some("User already exists!") })
            .unwrap();

        assert!(html.contains(r#"<p class="error">User already exists!</p>"#));
    }

    #[test]
    fn test_login_banners() {
        let renderer = ViewRenderer::embedded();

        let html = renderer
            .render(&View::Login { success: Some("Welcome"), error: None })
            .unwrap();
        assert!(html.contains(r#"<p class="success">Welcome</p>"#));
        assert!(!html.contains(r#"<p class="error">"#));

        let html = renderer
            .render(&View::Login { success: None, error: Some("Nope") })
            .unwrap();
        assert!(html.contains(r#"<p class="error">Nope</p>"#));
        assert!(!html.contains(r#"<p class="success">"#));
    }

    #[test]
    fn test_success_escapes_user_values() {
        let html = ViewRenderer::embedded()
            .render(&View::Success { name: "<b>alice</b>", studies: "R&D" })
            .unwrap();

        assert!(html.contains("Welcome, &lt;b&gt;alice&lt;/b&gt;!"));
        assert!(html.contains("Your studies: R&amp;D"));
    }

    #[test]
    fn test_provision_writes_only_missing_files() {
        let dir = TempDir::new("views").unwrap();
        let templates = dir.path().join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("login.html"), "custom {{ error }}").unwrap();

        let written = provision_templates(&templates).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(std::fs::read_to_string(templates.join("login.html")).unwrap(), "custom {{ error }}");
        assert_eq!(std::fs::read_to_string(templates.join("signup.html")).unwrap(), SIGNUP_HTML);
        assert!(provision_templates(&templates).unwrap().is_empty());
    }

    #[test]
    fn test_from_dir_uses_customized_and_falls_back() {
        let dir = TempDir::new("views").unwrap();
        std::fs::write(dir.path().join("success.html"), "hello {{ name }} / {{ studies }}").unwrap();

        let renderer = ViewRenderer::from_dir(dir.path());

        let html = renderer.render(&View::Success { name: "alice", studies: "cs" }).unwrap();
        assert_eq!(html, "hello alice / cs");
        let html = renderer.render(&View::Signup { error: None }).unwrap();
        assert!(html.contains("<title>Sign Up</title>"));
    }

    #[test]
    fn test_broken_custom_template_fails_to_render() {
        let dir = TempDir::new("views").unwrap();
        std::fs::write(dir.path().join("signup.html"), "{{ password }}").unwrap();

        let result = ViewRenderer::from_dir(dir.path()).render(&View::Signup { error: None });
        assert!(matches!(result, Err(AppError::RenderError(_))));
    }
}
