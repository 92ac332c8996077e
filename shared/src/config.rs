use tracing::warn;

/// Outbound SMTP settings, present only when `ATRIUM_SMTP_HOST` is set.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_secs: u64,
    pub admin_username: String,
    pub admin_password: String,
    pub upload_dir: String,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
    pub cache_max_entry_bytes: usize,
    pub smtp: Option<SmtpConfig>,
    pub contact_recipient: String,
}

impl Config {
    const DEFAULT_ADMIN_USERNAME: &str = "admin";
    const DEFAULT_ADMIN_PASSWORD: &str = "admin1234";
    const DEFAULT_JWT_SECRET: &str = "atrium-dev-secret-change-me";
    const DEFAULT_DATABASE_URL: &str = "sqlite://./data/atrium.db";
    const DEFAULT_UPLOAD_DIR: &str = "./data/uploads";
    const DEFAULT_JWT_TTL_SECS: u64 = 86_400;
    const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
    const DEFAULT_CACHE_MAX_ENTRY_BYTES: usize = 2 * 1024 * 1024;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("ATRIUM_HOST", "0.0.0.0");
        let http_port = parse_or(lookup("ATRIUM_HTTP_PORT"), 8080u16);

        let smtp = lookup("ATRIUM_SMTP_HOST").map(|smtp_host| SmtpConfig {
            host: smtp_host,
            port: parse_or(lookup("ATRIUM_SMTP_PORT"), 587u16),
            username: lookup("ATRIUM_SMTP_USERNAME"),
            password: lookup("ATRIUM_SMTP_PASSWORD"),
            from: var("ATRIUM_SMTP_FROM", "no-reply@atrium.local"),
        });

        Self {
            public_base_url: var("ATRIUM_PUBLIC_BASE_URL", &format!("http://localhost:{}", http_port))
                .trim_end_matches('/')
                .to_string(),
            host,
            http_port,
            database_url: var("ATRIUM_DATABASE_URL", Self::DEFAULT_DATABASE_URL),
            jwt_secret: lookup("ATRIUM_JWT_SECRET").unwrap_or_else(|| {
                warn!("ATRIUM_JWT_SECRET not set, using an insecure development secret");
                Self::DEFAULT_JWT_SECRET.to_string()
            }),
            jwt_ttl_secs: parse_or(lookup("ATRIUM_JWT_TTL_SECS"), Self::DEFAULT_JWT_TTL_SECS),
            admin_username: var("ATRIUM_ADMIN_USERNAME", Self::DEFAULT_ADMIN_USERNAME),
            admin_password: lookup("ATRIUM_ADMIN_PASSWORD").unwrap_or_else(|| {
                warn!("ATRIUM_ADMIN_PASSWORD not set, using default password 'admin1234'");
                warn!("Please change the default admin password immediately!");
                Self::DEFAULT_ADMIN_PASSWORD.to_string()
            }),
            upload_dir: var("ATRIUM_UPLOAD_DIR", Self::DEFAULT_UPLOAD_DIR),
            max_upload_bytes: parse_or(
                lookup("ATRIUM_MAX_UPLOAD_BYTES"),
                Self::DEFAULT_MAX_UPLOAD_BYTES,
            ),
            allowed_origins: var("ATRIUM_ALLOWED_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            cache_max_entry_bytes: parse_or(
                lookup("ATRIUM_CACHE_MAX_ENTRY_BYTES"),
                Self::DEFAULT_CACHE_MAX_ENTRY_BYTES,
            ),
            contact_recipient: var("ATRIUM_CONTACT_RECIPIENT", "info@atrium.local"),
            smtp,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.jwt_ttl_secs, 86_400);
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.public_base_url, "http://localhost:8080");
        assert!(config.smtp.is_none());
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = config_from(&[
            ("ATRIUM_HTTP_PORT", "9000"),
            ("ATRIUM_JWT_TTL_SECS", "not-a-number"),
            ("ATRIUM_ALLOWED_ORIGINS", "https://a.org, https://b.org,"),
            ("ATRIUM_PUBLIC_BASE_URL", "https://cdn.example.org/"),
            ("ATRIUM_SMTP_HOST", "smtp.example.org"),
        ]);

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.jwt_ttl_secs, 86_400);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.org".to_string(), "https://b.org".to_string()]
        );
        assert_eq!(config.public_base_url, "https://cdn.example.org");

        let smtp = config.smtp.expect("smtp configured");
        assert_eq!(smtp.host, "smtp.example.org");
        assert_eq!(smtp.port, 587);
    }
}
