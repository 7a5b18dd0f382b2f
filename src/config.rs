use std::net::{IpAddr, SocketAddr};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    /// Shared secret used to verify identity tokens issued by the identity provider.
    pub identity_token_secret: String,
    /// Expected `iss` claim; unchecked when `None`.
    pub identity_token_issuer: Option<String>,
    /// Identities signing in with one of these emails are provisioned as admins.
    pub admin_emails: Vec<String>,
    pub frontend_url: String,
    /// Load the sample catalogue at startup (development only).
    pub seed_sample_data: bool,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`, `IDENTITY_TOKEN_SECRET`
    /// Optional with defaults: `SERVER_HOST`, `SERVER_PORT`, `ENVIRONMENT`, `LOG_LEVEL`,
    /// `IDENTITY_TOKEN_ISSUER`, `ADMIN_EMAILS`, `FRONTEND_URL`, `SEED_SAMPLE_DATA`
    ///
    /// `PORT` overrides `SERVER_PORT`, and in production the host defaults to `0.0.0.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set, or if `SERVER_HOST` /
    /// `SERVER_PORT` contain invalid values.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let identity_token_secret = std::env::var("IDENTITY_TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("IDENTITY_TOKEN_SECRET must be set"))?;

        let identity_token_issuer = std::env::var("IDENTITY_TOKEN_ISSUER")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let admin_emails =
            parse_email_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default());

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let seed_sample_data = environment != Environment::Production
            && std::env::var("SEED_SAMPLE_DATA").is_ok_and(|v| is_truthy(&v));

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level,
            identity_token_secret,
            identity_token_issuer,
            admin_emails,
            frontend_url,
            seed_sample_data,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }

    /// Whether `email` is on the admin bootstrap list (case-insensitive).
    #[must_use]
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Split a comma-separated list, dropping blanks and normalizing case.
fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: String::new(),
            server_host: IpAddr::from([127, 0, 0, 1]),
            server_port: 3000,
            environment: Environment::Development,
            log_level: "info".to_string(),
            identity_token_secret: "secret".to_string(),
            identity_token_issuer: None,
            admin_emails: parse_email_list(" Root@Example.com, ,ops@example.com"),
            frontend_url: String::new(),
            seed_sample_data: false,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_admin_email_list() {
        let config = config();
        assert_eq!(config.admin_emails, vec!["root@example.com", "ops@example.com"]);
        assert!(config.is_admin_email("ROOT@example.com"));
        assert!(!config.is_admin_email("someone@example.com"));
    }

    #[test]
    fn test_truthy_flags() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
