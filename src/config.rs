use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://va.mite.gov.it";
pub const DEFAULT_PORT: u16 = 3000;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        port: env::var("PORT")
            .map(|raw| parse_port(&raw))
            .unwrap_or(DEFAULT_PORT),
        base_url: get_env_or_default("VIALINK_BASE_URL", DEFAULT_BASE_URL),
        static_dir: get_env_or_default("VIALINK_STATIC_DIR", "dist"),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Origin of the upstream registry; search URLs and relative links are
    /// resolved against it.
    pub base_url: String,
    pub static_dir: String,
}

/// Falls back to the default port, with a warning, when `raw` is not a
/// valid port number.
pub fn parse_port(raw: &str) -> u16 {
    match raw.trim().parse() {
        Ok(port) => port,
        Err(e) => {
            log::warn!("ignoring invalid PORT {raw:?} ({e}), using {DEFAULT_PORT}");
            DEFAULT_PORT
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_port_is_used() {
        assert_eq!(parse_port("8080"), 8080);
        assert_eq!(parse_port(" 4000\n"), 4000);
    }

    #[test]
    fn malformed_port_falls_back_to_default() {
        assert_eq!(parse_port("abc"), DEFAULT_PORT);
        assert_eq!(parse_port("70000"), DEFAULT_PORT);
        assert_eq!(parse_port(""), DEFAULT_PORT);
    }
}
