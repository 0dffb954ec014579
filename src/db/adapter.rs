//! Database adapter trait
//!
//! Defines the capability set every database backend implements:
//! catalog discovery plus query execution. This abstraction allows for:
//! - Multiple database support (PostgreSQL, MSSQL, MySQL, SQLite)
//! - Easy testing with mock implementations
//! - Consistent error handling
//!
//! Exactly one adapter instance is bound per session, chosen by the
//! selected server's engine type.

use crate::config::{Engine, ServerConfig};
use crate::db::postgres::PostgresAdapter;
use crate::db::types::{ColumnRecord, QueryResult};
use crate::error::{AdapterError, AdapterResult};
use async_trait::async_trait;

/// The capability set implemented once per database engine.
///
/// An adapter holds two connection handles: a server-level handle used to
/// enumerate databases, and a database-level handle used for everything
/// else. [`Adapter::connect`] replaces the database-level handle on success
/// and leaves the previous one untouched on failure. No operation partially
/// mutates state when it errors.
///
/// Catalog lists come back sorted lexicographically by name, so the row
/// index is stable between a refresh and the select that follows it.
#[async_trait]
pub trait Adapter: Send {
    /// Enumerate databases visible to the configured user
    async fn list_databases(&mut self) -> AdapterResult<Vec<String>>;

    /// Open (or replace) the database-level connection.
    ///
    /// # Errors
    /// Returns `AdapterError::ConnectionFailed` on failure; an existing
    /// database-level handle stays valid in that case.
    async fn connect(&mut self, database: &str) -> AdapterResult<()>;

    /// Enumerate schemas in the connected database
    async fn list_schemas(&mut self) -> AdapterResult<Vec<String>>;

    /// Enumerate tables and views in a schema
    async fn list_tables(&mut self, schema: &str) -> AdapterResult<Vec<String>>;

    /// Load the column records for one table
    async fn list_columns(&mut self, schema: &str, table: &str)
    -> AdapterResult<Vec<ColumnRecord>>;

    /// Execute arbitrary SQL. Every cell in the result is stringified at
    /// this boundary regardless of its underlying type.
    async fn execute_query(&mut self, sql: &str) -> AdapterResult<QueryResult>;
}

impl std::fmt::Debug for dyn Adapter + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Adapter")
    }
}

/// Connects an adapter for a server. A trait rather than a plain function so
/// the navigation layer can be tested without a real database behind it.
#[async_trait]
pub trait Connector: Send {
    async fn connect_server(&self, server: &ServerConfig) -> AdapterResult<Box<dyn Adapter>>;
}

/// Production connector: picks the adapter implementation by engine type
/// and opens its server-level handle.
pub struct EngineConnector;

#[async_trait]
impl Connector for EngineConnector {
    async fn connect_server(&self, server: &ServerConfig) -> AdapterResult<Box<dyn Adapter>> {
        connect_adapter(server).await
    }
}

/// Factory keyed on the engine variant. The engine set is closed; variants
/// without a wired adapter yield `AdapterError::Unsupported` (an unknown
/// engine string never gets this far — config rejects it at load time).
pub async fn connect_adapter(server: &ServerConfig) -> AdapterResult<Box<dyn Adapter>> {
    match server.engine {
        Engine::Postgres => Ok(Box::new(PostgresAdapter::connect_server(server).await?)),
        Engine::Mssql => Err(AdapterError::Unsupported("mssql")),
        Engine::Mysql => Err(AdapterError::Unsupported("mysql")),
        Engine::Sqlite => Err(AdapterError::Unsupported("sqlite")),
    }
}
