/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the read API (default: `http://localhost:3000`).
    pub backend_location: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8050`).
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
#[error("{name} must be a valid {expected}, got '{value}'")]
pub struct ConfigError {
    pub name: &'static str,
    pub expected: &'static str,
    pub value: String,
}

impl DashboardConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default                 |
    /// |--------------------|-------------------------|
    /// | `BACKEND_LOCATION` | `http://localhost:3000` |
    /// | `DASHBOARD_HOST`   | `0.0.0.0`               |
    /// | `DASHBOARD_PORT`   | `8050`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_location = lookup("BACKEND_LOCATION")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        if !backend_location.starts_with("http://") && !backend_location.starts_with("https://") {
            return Err(ConfigError {
                name: "BACKEND_LOCATION",
                expected: "http(s) URL",
                value: backend_location,
            });
        }

        let host = lookup("DASHBOARD_HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port_raw = lookup("DASHBOARD_PORT").unwrap_or_else(|| "8050".into());
        let port = port_raw.parse().map_err(|_| ConfigError {
            name: "DASHBOARD_PORT",
            expected: "u16",
            value: port_raw,
        })?;

        Ok(Self {
            backend_location,
            host,
            port,
        })
    }
}
