use axum::{routing::get, Router};
use std::{
    cmp::Ordering,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Clone)]
struct SiteConfig {
    port: u16,
    site_dir: PathBuf,
    log_level: LogLevel,
}

impl SiteConfig {
    fn from_env() -> Self {
        let port = parse_env_u16_with_bounds("PORT", DEFAULT_PORT, PORT_BOUNDS);
        let site_dir = std::env::var("SITE_DIR")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR));
        let log_level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            port,
            site_dir,
            log_level,
        }
    }
}

fn parse_env_u16_with_bounds(name: &str, default: u16, bounds: (u16, u16)) -> u16 {
    let Some(raw) = std::env::var(name).ok() else {
        return default;
    };

    let Ok(parsed) = raw.trim().parse::<u16>() else {
        return default;
    };

    parsed.clamp(bounds.0, bounds.1)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn should_log(config: &SiteConfig, level: LogLevel) -> bool {
    level >= config.log_level
}

fn log_event(config: &SiteConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if !should_log(config, level) {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}

async fn healthz() -> &'static str {
    "ok"
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SiteConfig::from_env();
    log_event(
        &config,
        LogLevel::Debug,
        "config_loaded",
        serde_json::json!({
            "port": config.port,
            "site_dir": config.site_dir.display().to_string(),
            "log_level": config.log_level.as_str(),
        }),
    );
    let bind_address = format!("0.0.0.0:{}", config.port);

    let index_path = config.site_dir.join("index.html");
    let static_service =
        ServeDir::new(&config.site_dir).not_found_service(ServeFile::new(index_path));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(static_service);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &config,
        LogLevel::Info,
        "server_started",
        serde_json::json!({
            "port": config.port,
            "site_dir": config.site_dir.display().to_string(),
        }),
    );
    axum::serve(listener, app).await?;
    Ok(())
}
