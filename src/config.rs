use std::env;
use std::path::PathBuf;

/// Which leaderboard store the service should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardBackend {
    /// Hosted PostgREST database (unconfigured when URL or key is missing)
    Remote,
    /// Local redb table in the same file as the users
    Embedded,
    /// No store; reads return placeholders and writes fail
    None,
}

impl std::str::FromStr for LeaderboardBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" | "supabase" => Ok(Self::Remote),
            "embedded" | "local" => Ok(Self::Embedded),
            "none" | "off" => Ok(Self::None),
            other => Err(format!("Invalid LEADERBOARD_BACKEND: {other}")),
        }
    }
}

/// A built-in account checked before the user store on login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinAccount {
    pub username: String,
    pub password: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub secret_key: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub leaderboard_backend: LeaderboardBackend,
    pub leaderboard_table: String,
    pub builtin_accounts: Vec<BuiltinAccount>,
    pub admin_identity: String,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| "Invalid PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/portal.db".to_string());

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| {
            if environment != "development" {
                tracing::warn!("SECRET_KEY not set, sessions are signed with the default key");
            }
            "dev-secret-key".to_string()
        });

        let supabase_url = non_empty_var("SUPABASE_URL");
        let supabase_key = non_empty_var("SUPABASE_ANON_KEY");

        let leaderboard_backend: LeaderboardBackend = env::var("LEADERBOARD_BACKEND")
            .unwrap_or_else(|_| "remote".to_string())
            .parse()?;

        let leaderboard_table =
            env::var("LEADERBOARD_TABLE").unwrap_or_else(|_| "high_scores".to_string());

        let builtin_accounts = parse_builtin_accounts(
            &env::var("BUILTIN_ACCOUNTS").unwrap_or_else(|_| "admin:admin".to_string()),
        )?;

        let admin_identity = env::var("ADMIN_IDENTITY").unwrap_or_else(|_| "admin".to_string());

        let templates_dir: PathBuf = env::var("TEMPLATES_DIR")
            .unwrap_or_else(|_| "templates".to_string())
            .into();
        let static_dir: PathBuf = env::var("STATIC_DIR")
            .unwrap_or_else(|_| "static".to_string())
            .into();

        Ok(Config {
            server_host,
            server_port,
            database_path,
            secret_key,
            supabase_url,
            supabase_key,
            leaderboard_backend,
            leaderboard_table,
            builtin_accounts,
            admin_identity,
            templates_dir,
            static_dir,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `user:password` pairs separated by commas
pub fn parse_builtin_accounts(raw: &str) -> Result<Vec<BuiltinAccount>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (username, password) = entry
                .split_once(':')
                .ok_or_else(|| format!("Invalid BUILTIN_ACCOUNTS entry: {entry}"))?;
            if username.is_empty() || password.is_empty() {
                return Err(format!("Invalid BUILTIN_ACCOUNTS entry: {entry}"));
            }
            Ok(BuiltinAccount {
                username: username.to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}
