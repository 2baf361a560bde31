/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Insert demo data on boot when the regions table is empty (default: `true`).
    pub seed_on_boot: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `SEED_ON_BOOT`         | `true`                     |
    ///
    /// Panics on malformed values; misconfiguration should stop startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let seed_on_boot = lookup("SEED_ON_BOOT")
            .map(|raw| parse_flag(&raw).expect("SEED_ON_BOOT must be true/false/1/0"))
            .unwrap_or(true);

        Self {
            host,
            port,
            cors_origins,
            seed_on_boot,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert!(config.seed_on_boot);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = config_from(&[("CORS_ORIGINS", "http://a.test, http://b.test,,")]);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn seed_flag_accepts_common_spellings() {
        assert!(!config_from(&[("SEED_ON_BOOT", "false")]).seed_on_boot);
        assert!(!config_from(&[("SEED_ON_BOOT", "0")]).seed_on_boot);
        assert!(config_from(&[("SEED_ON_BOOT", "TRUE")]).seed_on_boot);
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid u16")]
    fn bad_port_fails_fast() {
        config_from(&[("PORT", "eighty")]);
    }
}
