use core_config::{AppInfo, FromEnv, app_info, env_flag, server::ServerConfig};

// Import database configs from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default on)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL or POSTGRES_* parts
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=3000
        let run_migrations = env_flag("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_with_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://events:secret@db:5432/events")),
                ("PORT", Some("8080")),
                ("RUN_MIGRATIONS", Some("false")),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database.url(), "postgresql://events:secret@db:5432/events");
                assert_eq!(config.server.port, 8080);
                assert!(!config.run_migrations);
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.app.name, "events_api");
            },
        );
    }

    #[test]
    fn test_from_env_requires_database_settings() {
        temp_env::with_vars_unset(["DATABASE_URL", "POSTGRES_USER", "POSTGRES_PASSWORD"], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_from_env_rejects_bad_migration_flag() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/events")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
