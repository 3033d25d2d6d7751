use core_config::{AppInfo, FromEnv, app_info, env_or_default, env_parse_or, server::ServerConfig};
use std::time::Duration;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Collection used when `ACCOUNTS_COLLECTION` is unset
pub const DEFAULT_ACCOUNTS_COLLECTION: &str = domain_accounts::mongodb::DEFAULT_COLLECTION;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// MongoDB collection holding account documents
    pub accounts_collection: String,
    /// Upper bound for cleanup once a shutdown signal arrives
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app_info!().name);
        }
        let server = ServerConfig::from_env()?;
        let accounts_collection = env_or_default("ACCOUNTS_COLLECTION", DEFAULT_ACCOUNTS_COLLECTION);
        let shutdown_timeout = Duration::from_secs(env_parse_or("SHUTDOWN_TIMEOUT_SECS", 30u64)?);

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            accounts_collection,
            shutdown_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONGO: [(&str, Option<&str>); 2] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017")),
        ("MONGODB_DATABASE", Some("flowx")),
    ];

    #[test]
    fn test_config_defaults() {
        let vars = [
            MONGO[0],
            MONGO[1],
            ("ACCOUNTS_COLLECTION", None),
            ("SHUTDOWN_TIMEOUT_SECS", None),
            ("PORT", None),
            ("APP_ENV", None),
            ("MONGODB_APP_NAME", None),
        ];
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "flowx_api");
            assert_eq!(config.accounts_collection, "users");
            assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.mongodb.app_name.as_deref(), Some("flowx_api"));
            assert!(!config.environment.is_production());
        });
    }

    #[test]
    fn test_config_overrides() {
        let vars = [
            MONGO[0],
            MONGO[1],
            ("ACCOUNTS_COLLECTION", Some("flowx_users")),
            ("SHUTDOWN_TIMEOUT_SECS", Some("5")),
            ("APP_ENV", Some("production")),
        ];
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.accounts_collection, "flowx_users");
            assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
            assert!(config.environment.is_production());
        });
    }

    #[test]
    fn test_config_requires_mongodb() {
        let vars = [
            ("MONGODB_URL", None::<&str>),
            ("MONGO_URL", None),
            ("MONGODB_DATABASE", Some("flowx")),
        ];
        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_config_rejects_bad_shutdown_timeout() {
        let vars = [MONGO[0], MONGO[1], ("SHUTDOWN_TIMEOUT_SECS", Some("soon"))];
        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("SHUTDOWN_TIMEOUT_SECS"));
        });
    }
}
