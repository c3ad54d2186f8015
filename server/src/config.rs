use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cors {
    pub origin: String,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3001".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    pub server: Server,
    pub cors: Cors,
}

impl Settings {
    /// Defaults, then `todo-server.toml` if present, then `TODO_*` variables
    /// (`TODO_SERVER_PORT`, `TODO_CORS_ORIGIN`, ...). A bare `PORT` wins over
    /// everything for the listening port.
    pub fn new() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("cors.origin", defaults.cors.origin)?
            .add_source(
                File::with_name("todo-server.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("TODO")
                    .separator("_")
                    .try_parsing(true),
            );

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_localhost_3000() {
        let settings = Settings::default();
        assert_eq!(settings.server.addr(), "127.0.0.1:3000");
        assert_eq!(settings.cors.origin, "http://localhost:3001");
    }

    #[test]
    fn environment_overrides_defaults() {
        std::env::set_var("TODO_CORS_ORIGIN", "http://example.test");
        let settings = Settings::new().unwrap();
        assert_eq!(settings.cors.origin, "http://example.test");
        assert_eq!(settings.server.host, "127.0.0.1");
        std::env::remove_var("TODO_CORS_ORIGIN");
    }
}
