//! Server connection profiles
//!
//! Servers are declared in `~/.dbtui/config.toml`, one `[servers.<name>]`
//! table per entry:
//!
//! ```toml
//! [servers.db1]
//! type = "postgres"
//! host = "localhost"
//! user = "app"
//! pass = "secret"
//! ```
//!
//! A missing or unparseable file is fatal at startup. A malformed individual
//! entry is skipped with a warning, never fatal to the whole load.

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Database engine type. Closed set; anything else in config is a
/// [`ConfigError::UnknownEngine`], never an adapter error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Postgres,
    Mssql,
    Mysql,
    Sqlite,
}

impl Engine {
    /// Parse the `type` field of a server entry. Accepts the `psql`
    /// shorthand for PostgreSQL.
    pub fn from_name(name: &str) -> ConfigResult<Self> {
        match name {
            "postgres" | "psql" => Ok(Engine::Postgres),
            "mssql" => Ok(Engine::Mssql),
            "mysql" => Ok(Engine::Mysql),
            "sqlite" => Ok(Engine::Sqlite),
            other => Err(ConfigError::UnknownEngine(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Postgres => "postgres",
            Engine::Mssql => "mssql",
            Engine::Mysql => "mysql",
            Engine::Sqlite => "sqlite",
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured server. The name doubles as the unique identifier and is
/// immutable for the session.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: String,
    pub engine: Engine,
    pub host: String,
    pub user: String,
    pub pass: String,
}

/// Raw shape of one `[servers.<name>]` table, before engine validation.
#[derive(Debug, Deserialize)]
struct RawServer {
    #[serde(rename = "type")]
    engine: String,
    host: String,
    user: String,
    pass: String,
}

/// The default config file path (`~/.dbtui/config.toml`)
pub fn default_config_path() -> ConfigResult<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".dbtui").join("config.toml"))
}

/// Load all server profiles from a config file, sorted by name.
///
/// The server list doubles as the Server-level catalog, so it comes back in
/// the same deterministic order the adapters use: lexicographic by name.
pub fn load_servers(path: &Path) -> ConfigResult<Vec<ServerConfig>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;
    let value: toml::Value = toml::from_str(&content)?;
    parse_servers(&value)
}

/// Extract server entries from a parsed TOML document, skipping malformed
/// entries individually.
fn parse_servers(value: &toml::Value) -> ConfigResult<Vec<ServerConfig>> {
    let mut servers = Vec::new();
    let Some(table) = value.get("servers").and_then(|v| v.as_table()) else {
        return Ok(servers);
    };

    for (name, entry) in table {
        let raw: RawServer = match entry.clone().try_into() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(server = %name, error = %e, "skipping malformed server entry");
                continue;
            }
        };
        let engine = match Engine::from_name(&raw.engine) {
            Ok(engine) => engine,
            Err(e) => {
                warn!(server = %name, error = %e, "skipping server entry");
                continue;
            }
        };
        servers.push(ServerConfig {
            name: name.clone(),
            engine,
            host: raw.host,
            user: raw.user,
            pass: raw.pass,
        });
    }

    servers.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(servers)
}
