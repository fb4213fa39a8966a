use std::env;

pub struct Config {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Session validity window in milliseconds.
    pub max_login_time_ms: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            address: env::var("ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a number"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_login_time_ms: env::var("MAX_LOGIN_TIME")
                .unwrap_or_else(|_| "600000".to_string())
                .parse()
                .expect("MAX_LOGIN_TIME must be a number of milliseconds"),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "postgres://test");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.port, 8080);
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.max_login_time_ms, 600_000);

        env::set_var("PORT", "3000");
        env::set_var("ADDRESS", "0.0.0.0");
        env::set_var("MAX_LOGIN_TIME", "1500");

        let config = Config::from_env();

        assert_eq!(config.port, 3000);
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.max_login_time_ms, 1500);
        assert_eq!(config.server_url(), "http://0.0.0.0:3000");
    }
}
