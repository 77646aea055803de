use crate::auth::jwt::JwtConfig;

/// Which backend answers recipient lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Cloud Firestore `users` collection.
    Firestore,
    /// PostgreSQL `users` table.
    Postgres { database_url: String },
    /// Process-local map, optionally seeded from a JSON file. Development only.
    Memory { seed_path: Option<String> },
}

impl StoreBackend {
    /// Short name for logs. Never includes connection strings.
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Firestore => "firestore",
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::Memory { .. } => "memory",
        }
    }
}

/// Google Cloud settings for Firestore and FCM.
#[derive(Debug, Clone, Default)]
pub struct GoogleConfig {
    /// Path to a service-account JSON key.
    pub credentials_path: Option<String>,
    /// Overrides the key's `project_id`.
    pub project_id: Option<String>,
    /// Firestore database id (default: `(default)`).
    pub firestore_database: String,
    /// `host:port` of a Firestore emulator, if one should be used.
    pub firestore_emulator_host: Option<String>,
    /// Send FCM requests with `validate_only` set.
    pub fcm_validate_only: bool,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Profile store backend (default: Firestore).
    pub store: StoreBackend,
    /// Google credentials and endpoints.
    pub google: GoogleConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `3000`                  |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    /// | `PROFILE_STORE`                  | `firestore`             |
    /// | `DATABASE_URL`                   | -- (postgres only)      |
    /// | `PROFILE_SEED_FILE`              | -- (memory only)        |
    /// | `GOOGLE_APPLICATION_CREDENTIALS` | --                      |
    /// | `FIREBASE_PROJECT_ID`            | key's `project_id`      |
    /// | `FIRESTORE_DATABASE`             | `(default)`             |
    /// | `FIRESTORE_EMULATOR_HOST`        | --                      |
    /// | `FCM_VALIDATE_ONLY`              | `false`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store = match std::env::var("PROFILE_STORE")
            .unwrap_or_else(|_| "firestore".into())
            .as_str()
        {
            "firestore" => StoreBackend::Firestore,
            "postgres" => StoreBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when PROFILE_STORE=postgres"),
            },
            "memory" => StoreBackend::Memory {
                seed_path: non_empty_var("PROFILE_SEED_FILE"),
            },
            other => panic!("PROFILE_STORE must be firestore, postgres, or memory (got '{other}')"),
        };

        let google = GoogleConfig {
            credentials_path: non_empty_var("GOOGLE_APPLICATION_CREDENTIALS"),
            project_id: non_empty_var("FIREBASE_PROJECT_ID"),
            firestore_database: std::env::var("FIRESTORE_DATABASE")
                .unwrap_or_else(|_| beacon_google::firestore::DEFAULT_DATABASE.into()),
            firestore_emulator_host: non_empty_var("FIRESTORE_EMULATOR_HOST"),
            fcm_validate_only: std::env::var("FCM_VALIDATE_ONLY")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            store,
            google,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
