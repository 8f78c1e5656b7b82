use config::{Config, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;
use thiserror::Error;

/// Scheme that selects the in-process store instead of PostgreSQL.
pub const MEMORY_DATABASE_SCHEME: &str = "memory:";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("database_url is not defined (set APP__DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("invalid server port: {0}")]
    InvalidPort(u16),
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    auto_migrate: bool,
    allowed_origins: Vec<String>,
    log_file: String,
    /// 服务器配置
    server: RawServerConfig,
}

/// 服务器配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawServerConfig {
    /// 监听地址
    host: String,
    /// 监听端口
    port: u16,
}

impl Default for RawServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "".to_string(),
            auto_migrate: true,
            allowed_origins: vec![
                "https://artistphere.onrender.com".to_string(),
                "http://localhost:3000".to_string(),
            ],
            log_file: "app.log".to_string(),
            server: RawServerConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    database_url: String,
    auto_migrate: bool,
    allowed_origins: Vec<String>,
    log_file: String,
    server: ServerConfig,
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Result<Self, ConfigError> {
        let database_url = data.database_url.trim().to_string();
        if database_url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if data.server.port == 0 {
            return Err(ConfigError::InvalidPort(data.server.port));
        }
        let allowed_origins = data
            .allowed_origins
            .into_iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();
        Ok(AppConfigImpl {
            database_url,
            auto_migrate: data.auto_migrate,
            allowed_origins,
            log_file: data.log_file,
            server: ServerConfig {
                host: data.server.host,
                port: data.server.port,
            },
        })
    }

    /// Reads `config.*` (optional) and `APP__*` environment variables, after
    /// loading a `.env` file when one exists.
    pub fn load() -> Result<AppConfigImpl, ConfigError> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins"),
            )
            .build()?;

        let raw: RawConfig = config.try_deserialize()?; // serde 自动填充默认值
        AppConfigImpl::new(raw)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_DATABASE_SCHEME)
    }

    pub fn auto_migrate(&self) -> bool {
        self.auto_migrate
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins.clone()
    }

    pub fn log_file(&self) -> &str {
        &self.log_file
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(database_url: &str) -> RawConfig {
        RawConfig {
            database_url: database_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        assert!(matches!(
            AppConfigImpl::new(raw("")),
            Err(ConfigError::MissingDatabaseUrl)
        ));
        assert!(matches!(
            AppConfigImpl::new(raw("   ")),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfigImpl::new(raw("postgres://localhost/artists")).unwrap();
        assert_eq!(cfg.database_url(), "postgres://localhost/artists");
        assert!(!cfg.uses_memory_store());
        assert!(cfg.auto_migrate());
        assert_eq!(cfg.server().port, 5000);
        assert_eq!(cfg.server().host, "0.0.0.0");
        assert_eq!(
            cfg.allowed_origins(),
            vec!["https://artistphere.onrender.com", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_origins_are_normalized() {
        let mut data = raw("memory:");
        data.allowed_origins = vec![
            " http://localhost:3000/ ".to_string(),
            "".to_string(),
            "https://example.com".to_string(),
        ];
        let cfg = AppConfigImpl::new(data).unwrap();
        assert!(cfg.uses_memory_store());
        assert_eq!(
            cfg.allowed_origins(),
            vec!["http://localhost:3000", "https://example.com"]
        );
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut data = raw("memory:");
        data.server.port = 0;
        assert!(matches!(
            AppConfigImpl::new(data),
            Err(ConfigError::InvalidPort(0))
        ));
    }

    #[test]
    fn test_deserialize_from_sources() {
        let config = Config::builder()
            .set_override("database_url", "memory:")
            .unwrap()
            .set_override("server.port", 8080)
            .unwrap()
            .build()
            .unwrap();
        let data: RawConfig = config.try_deserialize().unwrap();
        let cfg = AppConfigImpl::new(data).unwrap();
        assert_eq!(cfg.server().port, 8080);
        assert_eq!(cfg.log_file(), "app.log");
    }
}
