use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3002`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root of the statically served files (default: `public`).
    pub static_dir: PathBuf,
    /// Subdirectory of `static_dir` holding models, textures and uploads
    /// (default: `Ogrodzenie`).
    pub asset_dir: String,
    /// Upper bound on a multipart upload body (default: 50 MiB).
    pub max_upload_bytes: usize,
    /// Optional JSON file replacing the built-in product catalog.
    pub catalog_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3002`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STATIC_DIR`           | `public`                   |
    /// | `ASSET_DIR`            | `Ogrodzenie`               |
    /// | `MAX_UPLOAD_BYTES`     | `52428800`                 |
    /// | `CATALOG_PATH`         | unset (built-in catalog)   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3002".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()));

        let asset_dir = std::env::var("ASSET_DIR")
            .unwrap_or_else(|_| "Ogrodzenie".into())
            .trim_matches('/')
            .to_string();

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "52428800".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            asset_dir,
            max_upload_bytes,
            catalog_path,
        }
    }

    /// Filesystem directory holding product assets and uploads.
    pub fn asset_path(&self) -> PathBuf {
        self.static_dir.join(&self.asset_dir)
    }

    /// Public URL prefix of [`ServerConfig::asset_path`], e.g. `/Ogrodzenie`.
    pub fn asset_url_prefix(&self) -> String {
        format!("/{}", self.asset_dir)
    }
}
