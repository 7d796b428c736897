use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Configuration {
    pub google_api_key: Option<String>,
    pub port: u16,
    pub model: String,
    pub api_base: String,
    pub template_dir: PathBuf,
    pub environment: Environment,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            google_api_key: None,
            port: default_port(),
            model: default_model(),
            api_base: default_api_base(),
            template_dir: default_template_dir(),
            environment: Environment::default(),
        }
    }
}

impl Configuration {
    /// Reads the configuration from the process environment.
    ///
    /// Never fails: a missing `GOOGLE_API_KEY` leaves the model unconfigured and
    /// every research call reports it instead.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        tracing::debug!("Loading configuration");

        let google_api_key = lookup("GOOGLE_API_KEY").filter(|key| !key.trim().is_empty());
        if google_api_key.is_none() {
            tracing::warn!("GOOGLE_API_KEY not found - research requests will report a configuration error");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid PORT, falling back to {}", DEFAULT_PORT);
                default_port()
            }),
            None => default_port(),
        };

        let environment = if lookup("RENDER").is_some() {
            Environment::Production
        } else {
            Environment::Development
        };

        Configuration {
            google_api_key,
            port,
            model: lookup("GEMINI_MODEL").unwrap_or_else(default_model),
            api_base: lookup("GEMINI_API_BASE").unwrap_or_else(default_api_base),
            template_dir: lookup("TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_template_dir),
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Configuration {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Configuration::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = load(&[]);
        assert_eq!(config.google_api_key, None);
        assert_eq!(config.port, 5000);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.template_dir, PathBuf::from("templates"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("GOOGLE_API_KEY", "secret"),
            ("PORT", "8080"),
            ("RENDER", "true"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("TEMPLATE_DIR", "/srv/templates"),
        ]);
        assert_eq!(config.google_api_key.as_deref(), Some("secret"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.template_dir, PathBuf::from("/srv/templates"));
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        assert_eq!(load(&[("GOOGLE_API_KEY", "   ")]).google_api_key, None);
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        assert_eq!(load(&[("PORT", "not-a-port")]).port, DEFAULT_PORT);
    }

    #[test]
    fn render_presence_alone_selects_production() {
        assert_eq!(load(&[("RENDER", "")]).environment, Environment::Production);
    }
}
