use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Medibook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP bind address when `MEDIBOOK_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default chat-completions endpoint. Overridable for compatible
/// gateways via `OPENAI_BASE_URL`.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default completion model when `OPENAI_MODEL` is unset.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Completion request timeout in seconds. One attempt, no retries.
pub const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 30;

/// Session token lifetime: eight hours.
pub const SESSION_TTL_SECS: u64 = 8 * 60 * 60;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    /// Origins allowed by the CORS layer. Empty list disables CORS
    /// entirely (same-origin / non-browser clients only).
    pub allowed_origins: Vec<String>,
    pub openai: OpenAiConfig,
}

/// Settings for the completion-API recommendation path.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Absent key disables the AI path; tag matching still works.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_OPENAI_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Read configuration from the environment. Every setting has a
    /// default; blank values count as unset.
    pub fn from_env() -> Self {
        let bind_addr = env_var("MEDIBOOK_ADDR")
            .and_then(|v| match v.parse() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    tracing::warn!(addr = %v, "ignoring unparsable MEDIBOOK_ADDR");
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let db_path = env_var("MEDIBOOK_DB")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let allowed_origins = env_var("MEDIBOOK_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let openai = OpenAiConfig {
            api_key: env_var("OPENAI_API_KEY"),
            model: env_var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            base_url: env_var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            timeout_secs: DEFAULT_OPENAI_TIMEOUT_SECS,
        };

        Self {
            bind_addr,
            db_path,
            allowed_origins,
            openai,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_bind_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR.parse().expect("static default address")
}

/// Get the application data directory
/// ~/Medibook/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Medibook")
}

fn default_db_path() -> PathBuf {
    app_data_dir().join("medibook.db")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
