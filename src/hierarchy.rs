//! Hierarchy registry and navigation controller
//!
//! Five ordered levels (Server → Database → Schema → Table → Column), each
//! holding a catalog list and at most one current selection. Selecting at a
//! level cascades a refresh into its child level; a failed or not-found
//! selection clears the current pointers at that level and everything
//! deeper, leaving child lists stale but logically disconnected.
//!
//! Every operation returns a structured outcome instead of mutating display
//! state; the display boundary consumes the registry afterwards.

use crate::config::ServerConfig;
use crate::db::adapter::{Adapter, Connector};
use crate::db::types::ColumnRecord;
use crate::error::{AdapterError, AdapterResult};
use tracing::debug;

/// One of the five hierarchy stages, ordered parent to child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Server,
    Database,
    Schema,
    Table,
    Column,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Server,
        Level::Database,
        Level::Schema,
        Level::Table,
        Level::Column,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The child level, or None for the Column leaf
    pub fn child(self) -> Option<Level> {
        match self {
            Level::Server => Some(Level::Database),
            Level::Database => Some(Level::Schema),
            Level::Schema => Some(Level::Table),
            Level::Table => Some(Level::Column),
            Level::Column => None,
        }
    }

    /// The parent level, or None for Server
    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Server => None,
            Level::Database => Some(Level::Server),
            Level::Schema => Some(Level::Database),
            Level::Table => Some(Level::Schema),
            Level::Column => Some(Level::Table),
        }
    }

    /// Prompt label shown when entering the select mode for this level
    pub fn prompt(self) -> &'static str {
        match self {
            Level::Server => "Server: ",
            Level::Database => "Database: ",
            Level::Schema => "Schema: ",
            Level::Table => "Table/View: ",
            Level::Column => "Column: ",
        }
    }

    /// Pane title for this level
    pub fn title(self) -> &'static str {
        match self {
            Level::Server => "Servers",
            Level::Database => "Databases",
            Level::Schema => "Schemas",
            Level::Table => "Tables/Views",
            Level::Column => "Columns",
        }
    }
}

/// Outcome of a `select` call. Not-found is an outcome, not an error:
/// it clears the current pointer at that level and is reported to the user
/// without touching anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    NotFound,
}

/// The hierarchy registry plus the navigation controller operating on it.
///
/// Owns the per-level catalog lists, the current selections, and the bound
/// adapter. The adapter is (re)bound when a server is selected, via the
/// injected [`Connector`].
pub struct Navigator {
    servers: Vec<ServerConfig>,
    connector: Box<dyn Connector>,
    adapter: Option<Box<dyn Adapter>>,

    server_names: Vec<String>,
    databases: Vec<String>,
    schemas: Vec<String>,
    tables: Vec<String>,
    columns: Vec<ColumnRecord>,

    /// Current selection per level, indexed by `Level::index`
    current: [Option<String>; 5],
}

impl Navigator {
    pub fn new(servers: Vec<ServerConfig>, connector: Box<dyn Connector>) -> Self {
        Self {
            servers,
            connector,
            adapter: None,
            server_names: Vec::new(),
            databases: Vec::new(),
            schemas: Vec::new(),
            tables: Vec::new(),
            columns: Vec::new(),
            current: [const { None }; 5],
        }
    }

    /// Configured servers, in catalog order
    pub fn servers(&self) -> &[ServerConfig] {
        &self.servers
    }

    /// The current selection at a level, if any
    pub fn current(&self, level: Level) -> Option<&str> {
        self.current[level.index()].as_deref()
    }

    /// Name list for a level. Column names are derived from the records;
    /// see [`Navigator::columns`] for the full metadata.
    pub fn names(&self, level: Level) -> Vec<&str> {
        match level {
            Level::Server => self.server_names.iter().map(String::as_str).collect(),
            Level::Database => self.databases.iter().map(String::as_str).collect(),
            Level::Schema => self.schemas.iter().map(String::as_str).collect(),
            Level::Table => self.tables.iter().map(String::as_str).collect(),
            Level::Column => self.columns.iter().map(|c| c.name.as_str()).collect(),
        }
    }

    /// Column records for the currently selected table
    pub fn columns(&self) -> &[ColumnRecord] {
        &self.columns
    }

    /// The bound adapter, for query execution
    pub fn adapter_mut(&mut self) -> AdapterResult<&mut dyn Adapter> {
        match self.adapter.as_mut() {
            Some(adapter) => Ok(adapter.as_mut()),
            None => Err(AdapterError::NotConnected("no server selected")),
        }
    }

    /// Null out the current pointers at `level` and every deeper level.
    /// Lists are left alone: stale entries below a cleared parent are
    /// orphaned, not erased.
    fn clear_current_from(&mut self, level: Level) {
        for slot in &mut self.current[level.index()..] {
            *slot = None;
        }
    }

    /// Reload the catalog list at one level from its source (config for
    /// Server, the adapter otherwise), replacing the list wholesale.
    ///
    /// On success the replaced entries cannot remain selected, so current
    /// pointers at this level and deeper are cleared. On failure nothing
    /// changes and the error is returned for the caller to surface.
    pub async fn refresh(&mut self, level: Level) -> AdapterResult<()> {
        match level {
            Level::Server => {
                self.server_names = self.servers.iter().map(|s| s.name.clone()).collect();
            }
            Level::Database => {
                self.require_current(Level::Server)?;
                self.databases = self.adapter_mut()?.list_databases().await?;
            }
            Level::Schema => {
                self.require_current(Level::Database)?;
                self.schemas = self.adapter_mut()?.list_schemas().await?;
            }
            Level::Table => {
                let schema = self.require_current(Level::Schema)?;
                self.tables = self.adapter_mut()?.list_tables(&schema).await?;
            }
            Level::Column => {
                let schema = self.require_current(Level::Schema)?;
                let table = self.require_current(Level::Table)?;
                self.columns = self.adapter_mut()?.list_columns(&schema, &table).await?;
            }
        }
        debug!(?level, count = self.names(level).len(), "level refreshed");
        self.clear_current_from(level);
        Ok(())
    }

    /// Select an entry by case-sensitive exact name match against the
    /// level's current list.
    ///
    /// A match marks the entry current and synchronously cascades a refresh
    /// into the child level (Database additionally reconnects the adapter
    /// first). Re-selecting the already-current entry re-runs the cascade
    /// unconditionally. No match clears the current pointers at this level
    /// and deeper and returns [`SelectOutcome::NotFound`].
    pub async fn select(&mut self, level: Level, name: &str) -> AdapterResult<SelectOutcome> {
        if let Some(parent) = level.parent() {
            self.require_current(parent)?;
        }

        if !self.names(level).contains(&name) {
            debug!(?level, name, "selection target not in list");
            self.clear_current_from(level);
            return Ok(SelectOutcome::NotFound);
        }

        match level {
            Level::Server => {
                // Bind the engine adapter before committing the selection;
                // a failed server connect must leave the session unchanged.
                let Some(server) = self.servers.iter().find(|s| s.name == name) else {
                    self.clear_current_from(level);
                    return Ok(SelectOutcome::NotFound);
                };
                match self.connector.connect_server(server).await {
                    Ok(adapter) => self.adapter = Some(adapter),
                    Err(e) => {
                        self.clear_current_from(level);
                        return Err(e);
                    }
                }
            }
            Level::Database => {
                // Connect before cascading. On failure the selection at this
                // level fails, so its pointer (and deeper ones) are cleared;
                // the adapter keeps its previous database handle.
                if let Err(e) = self.adapter_mut()?.connect(name).await {
                    self.clear_current_from(level);
                    return Err(e);
                }
            }
            _ => {}
        }

        self.current[level.index()] = Some(name.to_string());
        if let Some(child) = level.child() {
            self.clear_current_from(child);
            self.refresh(child).await?;
        }
        Ok(SelectOutcome::Selected)
    }

    fn require_current(&self, level: Level) -> AdapterResult<String> {
        self.current(level)
            .map(str::to_string)
            .ok_or(match level {
                Level::Server => AdapterError::NotConnected("no server selected"),
                Level::Database => AdapterError::NotConnected("no database selected"),
                Level::Schema => AdapterError::NotConnected("no schema selected"),
                Level::Table => AdapterError::NotConnected("no table selected"),
                Level::Column => AdapterError::NotConnected("no column selected"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order_and_links() {
        assert_eq!(Level::Server.child(), Some(Level::Database));
        assert_eq!(Level::Column.child(), None);
        assert_eq!(Level::Server.parent(), None);
        assert_eq!(Level::Column.parent(), Some(Level::Table));
        for pair in Level::ALL.windows(2) {
            assert_eq!(pair[0].child(), Some(pair[1]));
            assert_eq!(pair[1].parent(), Some(pair[0]));
        }
    }

    #[test]
    fn test_level_prompts() {
        assert_eq!(Level::Server.prompt(), "Server: ");
        assert_eq!(Level::Table.prompt(), "Table/View: ");
    }

    #[test]
    fn test_select_without_parent_is_rejected() {
        let mut nav = Navigator::new(Vec::new(), Box::new(NoConnector));
        let err = tokio_test::block_on(nav.select(Level::Schema, "public")).unwrap_err();
        assert!(matches!(err, AdapterError::NotConnected(_)));
    }

    #[test]
    fn test_refresh_server_level_comes_from_config() {
        let servers = vec![server("alpha"), server("beta")];
        let mut nav = Navigator::new(servers, Box::new(NoConnector));
        tokio_test::block_on(nav.refresh(Level::Server)).unwrap();
        assert_eq!(nav.names(Level::Server), vec!["alpha", "beta"]);
        assert_eq!(nav.current(Level::Server), None);
    }

    fn server(name: &str) -> ServerConfig {
        ServerConfig {
            name: name.to_string(),
            engine: crate::config::Engine::Postgres,
            host: "localhost".to_string(),
            user: "u".to_string(),
            pass: "p".to_string(),
        }
    }

    /// Connector for tests that never reach a server connect
    struct NoConnector;

    #[async_trait::async_trait]
    impl Connector for NoConnector {
        async fn connect_server(
            &self,
            _server: &ServerConfig,
        ) -> AdapterResult<Box<dyn Adapter>> {
            Err(AdapterError::ConnectionFailed("unreachable in test".into()))
        }
    }
}
