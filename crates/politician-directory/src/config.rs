use std::path::{Path, PathBuf};

use crate::error::AppError;

const DEFAULT_HTTP_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    Http,
    Mcp,
}

impl std::str::FromStr for ServeMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "http" => Ok(Self::Http),
            "mcp" => Ok(Self::Mcp),
            other => Err(AppError::Config(format!(
                "SERVE_MODE must be \"http\" or \"mcp\", got {other:?}"
            ))),
        }
    }
}

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV dataset, re-read on every query.
    pub csv_path: PathBuf,
    pub mode: ServeMode,
    pub http_listen_addr: String,
    /// When set in MCP mode, serve MCP over TCP instead of stdio.
    pub mcp_tcp_listen_addr: Option<String>,
}

impl Config {
    /// Required:
    /// - `POLITICIANS_CSV_PATH`: path to the politicians CSV
    ///
    /// Optional:
    /// - `SERVE_MODE`: "http" (default) or "mcp"
    /// - `HTTP_LISTEN_ADDR` (default: "0.0.0.0:3000")
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let csv_path = lookup("POLITICIANS_CSV_PATH")
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("POLITICIANS_CSV_PATH environment variable is required".to_string())
            })?;

        let mode = lookup("SERVE_MODE")
            .map(|m| m.parse::<ServeMode>())
            .transpose()?
            .unwrap_or(ServeMode::Http);

        let http_listen_addr =
            lookup("HTTP_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_HTTP_LISTEN_ADDR.to_string());

        Ok(Self {
            csv_path: PathBuf::from(csv_path),
            mode,
            http_listen_addr,
            mcp_tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR"),
        })
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn csv_path_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("POLITICIANS_CSV_PATH"));
    }

    #[test]
    fn defaults_to_http() {
        let config = load(&[("POLITICIANS_CSV_PATH", "data/politicians.csv")]).unwrap();
        assert_eq!(config.mode, ServeMode::Http);
        assert_eq!(config.http_listen_addr, DEFAULT_HTTP_LISTEN_ADDR);
        assert_eq!(config.csv_path(), Path::new("data/politicians.csv"));
        assert!(config.mcp_tcp_listen_addr.is_none());
    }

    #[test]
    fn mcp_mode_and_bad_mode() {
        let config = load(&[("POLITICIANS_CSV_PATH", "x.csv"), ("SERVE_MODE", "MCP")]).unwrap();
        assert_eq!(config.mode, ServeMode::Mcp);

        let err = load(&[("POLITICIANS_CSV_PATH", "x.csv"), ("SERVE_MODE", "grpc")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
