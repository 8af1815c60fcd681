use serde::Deserialize;
use std::net::IpAddr;
use std::path::PathBuf;

const DEFAULT_MODEL_PATH: &str = "model/model.onnx";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_BODY_LIMIT_KB: &str = "64";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub model_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub body_limit_kb: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            body_limit_kb: 64,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            model_path: lookup("MODEL_PATH")
                .map(|path| path.trim().to_string())
                .map_or(Ok(PathBuf::from(DEFAULT_MODEL_PATH)), |path| {
                    if path.is_empty() {
                        anyhow::bail!("MODEL_PATH cannot be empty");
                    }
                    Ok(PathBuf::from(path))
                })?,
            host: lookup("HOST")
                .unwrap_or_else(|| DEFAULT_HOST.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("HOST must be a valid IP address"))?,
            port: lookup("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            body_limit_kb: lookup("BODY_LIMIT_KB")
                .unwrap_or_else(|| DEFAULT_BODY_LIMIT_KB.to_string())
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("BODY_LIMIT_KB must be a positive integer"))
                .and_then(|kb| {
                    if kb == 0 {
                        anyhow::bail!("BODY_LIMIT_KB must be a positive integer");
                    }
                    Ok(kb)
                })?,
        };

        tracing::debug!("Model path: {}", config.model_path.display());
        tracing::debug!("Bind address: {}:{}", config.host, config.port);
        tracing::debug!("Body limit: {} KiB", config.body_limit_kb);

        Ok(config)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_kb * 1024
    }
}
