use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Ключ подписи HS256. Без него сервер не стартует.
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: default_issuer(),
            audience: default_audience(),
            expiration_minutes: default_expiration_minutes(),
        }
    }
}

/// Начальный администратор, создаётся при пустой таблице пользователей
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapConfig {
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            admin_email: default_admin_email(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_issuer() -> String {
    "PackhouseApi".to_string()
}

fn default_audience() -> String {
    "PackhouseClient".to_string()
}

fn default_expiration_minutes() -> i64 {
    60
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_admin_email() -> String {
    "admin@localhost".to_string()
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[database]
path = "data/packhouse.db"

[server]
host = "0.0.0.0"
port = 5000

[jwt]
issuer = "PackhouseApi"
audience = "PackhouseClient"
expiration_minutes = 60
"#;

/// Загрузка конфигурации из config.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом (production)
/// 2. Встроенная конфигурация по умолчанию
///
/// `JWT_SECRET` и `DATABASE_PATH` из окружения перекрывают файл.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(secret) = lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()) {
        config.jwt.secret = Some(secret);
    }
    if let Some(path) = lookup("DATABASE_PATH").filter(|p| !p.trim().is_empty()) {
        config.database.path = path;
    }
}

/// Путь к файлу БД из конфигурации
/// Относительные пути считаются от каталога исполняемого файла
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}
