use anyhow::{Context, Result};
use clap::Parser;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub identity_api_url: String,
    pub identity_api_key: Option<String>,
    pub identity_timeout: Duration,
    /// Header carrying the authenticated viewer id from the upstream auth layer.
    pub viewer_header: String,
    /// Base for canonical page URLs.
    pub app_url: Url,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Photorio gallery page-data API")]
pub struct Args {
    /// Host to bind to (overrides PHOTORIO_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PHOTORIO_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides PHOTORIO_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Identity service base URL (overrides PHOTORIO_IDENTITY_API_URL)
    #[arg(long)]
    pub identity_api_url: Option<String>,

    /// Identity service request timeout in seconds (overrides PHOTORIO_IDENTITY_TIMEOUT_SECS)
    #[arg(long)]
    pub identity_timeout_secs: Option<u64>,

    /// Viewer id header name (overrides PHOTORIO_VIEWER_HEADER)
    #[arg(long)]
    pub viewer_header: Option<String>,

    /// Public base URL used for canonical links (overrides PHOTORIO_APP_URL)
    #[arg(long)]
    pub app_url: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("identity_api_url", &self.identity_api_url)
            .field(
                "identity_api_key",
                &self.identity_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("identity_timeout", &self.identity_timeout)
            .field("viewer_header", &self.viewer_header)
            .field("app_url", &self.app_url.as_str())
            .finish()
    }
}

/// Read and parse an env var, treating "not set" as `None`.
fn parse_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(key) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("parsing {} value `{}`", key, value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", key)),
    }
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::resolve(args, |key| env::var(key))?;
        Ok((cfg, migrate))
    }

    /// Merge CLI args over values from `lookup` (normally the process env).
    pub fn resolve<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        // --- Environment fallback ---
        let env_host = lookup("PHOTORIO_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = parse_env::<u16, _>(&lookup, "PHOTORIO_PORT")?.unwrap_or(3000);
        let env_db = lookup("PHOTORIO_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/photorio.db".into());
        let env_identity_url = lookup("PHOTORIO_IDENTITY_API_URL")
            .unwrap_or_else(|_| "https://api.clerk.com/v1".into());
        let env_timeout =
            parse_env::<u64, _>(&lookup, "PHOTORIO_IDENTITY_TIMEOUT_SECS")?.unwrap_or(10);
        let env_viewer_header =
            lookup("PHOTORIO_VIEWER_HEADER").unwrap_or_else(|_| "x-photorio-user-id".into());
        let identity_api_key = lookup("PHOTORIO_IDENTITY_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        // --- Merge ---
        let port = args.port.unwrap_or(env_port);
        let app_url_raw = match args.app_url {
            Some(url) => url,
            None => match (lookup("PHOTORIO_APP_URL"), lookup("VERCEL_URL")) {
                (Ok(url), _) => url,
                (_, Ok(host)) => format!("https://{}", host),
                _ => format!("http://localhost:{}", port),
            },
        };
        let app_url = Url::parse(&app_url_raw)
            .with_context(|| format!("parsing app URL `{}`", app_url_raw))?;

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port,
            database_url: args.database_url.unwrap_or(env_db),
            identity_api_url: args.identity_api_url.unwrap_or(env_identity_url),
            identity_api_key,
            identity_timeout: Duration::from_secs(args.identity_timeout_secs.unwrap_or(env_timeout)),
            viewer_header: args
                .viewer_header
                .unwrap_or(env_viewer_header)
                .to_ascii_lowercase(),
            app_url,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
