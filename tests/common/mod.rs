//! Common test utilities and helpers
//!
//! A scripted in-memory adapter plus a connector that hands it out, with a
//! shared call log so tests can assert on the exact adapter traffic a
//! navigation step produced.

use async_trait::async_trait;
use dbtui::config::{Engine, ServerConfig};
use dbtui::db::Adapter;
use dbtui::db::adapter::Connector;
use dbtui::db::types::{ColumnRecord, QueryResult};
use dbtui::error::{AdapterError, AdapterResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared record of adapter calls, in order
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// Scripted server catalog backing the mock adapter
#[derive(Clone, Default)]
pub struct Catalog {
    pub databases: Vec<String>,
    /// database name -> schemas
    pub schemas: HashMap<String, Vec<String>>,
    /// schema name -> tables
    pub tables: HashMap<String, Vec<String>>,
    /// (schema, table) -> columns
    pub columns: HashMap<(String, String), Vec<ColumnRecord>>,
}

/// A server with two databases, one of which has two schemas.
pub fn two_db_catalog() -> Catalog {
    let mut catalog = Catalog {
        databases: vec!["db1".to_string(), "db2".to_string()],
        ..Catalog::default()
    };
    catalog.schemas.insert(
        "db1".to_string(),
        vec!["audit".to_string(), "public".to_string()],
    );
    catalog
        .schemas
        .insert("db2".to_string(), vec!["public".to_string()]);
    catalog.tables.insert(
        "public".to_string(),
        vec!["orders".to_string(), "users".to_string()],
    );
    catalog
        .tables
        .insert("audit".to_string(), vec!["log".to_string()]);
    catalog.columns.insert(
        ("public".to_string(), "users".to_string()),
        vec![
            ColumnRecord {
                name: "id".to_string(),
                ordinal: 1,
                nullable: false,
                data_type: "int4".to_string(),
                max_length: None,
                is_identity: true,
            },
            ColumnRecord {
                name: "email".to_string(),
                ordinal: 2,
                nullable: false,
                data_type: "varchar".to_string(),
                max_length: Some(255),
                is_identity: false,
            },
            ColumnRecord {
                name: "bio".to_string(),
                ordinal: 3,
                nullable: true,
                data_type: "text".to_string(),
                max_length: None,
                is_identity: false,
            },
        ],
    );
    catalog
}

pub fn sample_result() -> QueryResult {
    QueryResult {
        columns: vec!["id".to_string(), "email".to_string()],
        rows: vec![
            vec!["1".to_string(), "a@example.com".to_string()],
            vec!["2".to_string(), "b@example.com".to_string()],
        ],
    }
}

pub fn server(name: &str) -> ServerConfig {
    ServerConfig {
        name: name.to_string(),
        engine: Engine::Postgres,
        host: "localhost".to_string(),
        user: "tester".to_string(),
        pass: "secret".to_string(),
    }
}

/// Scripted adapter: serves the catalog, records every call.
pub struct MockAdapter {
    catalog: Catalog,
    connected_db: Option<String>,
    fail_connect_db: Option<String>,
    query_result: Result<QueryResult, String>,
    log: CallLog,
}

#[async_trait]
impl Adapter for MockAdapter {
    async fn list_databases(&mut self) -> AdapterResult<Vec<String>> {
        self.log.record("list_databases");
        Ok(self.catalog.databases.clone())
    }

    async fn connect(&mut self, database: &str) -> AdapterResult<()> {
        self.log.record(format!("connect:{database}"));
        if self.fail_connect_db.as_deref() == Some(database) {
            return Err(AdapterError::ConnectionFailed(format!(
                "refused for {database}"
            )));
        }
        self.connected_db = Some(database.to_string());
        Ok(())
    }

    async fn list_schemas(&mut self) -> AdapterResult<Vec<String>> {
        self.log.record("list_schemas");
        let db = self
            .connected_db
            .as_ref()
            .ok_or(AdapterError::NotConnected("no database connected"))?;
        Ok(self.catalog.schemas.get(db).cloned().unwrap_or_default())
    }

    async fn list_tables(&mut self, schema: &str) -> AdapterResult<Vec<String>> {
        self.log.record(format!("list_tables:{schema}"));
        Ok(self.catalog.tables.get(schema).cloned().unwrap_or_default())
    }

    async fn list_columns(
        &mut self,
        schema: &str,
        table: &str,
    ) -> AdapterResult<Vec<ColumnRecord>> {
        self.log.record(format!("list_columns:{schema}.{table}"));
        Ok(self
            .catalog
            .columns
            .get(&(schema.to_string(), table.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn execute_query(&mut self, sql: &str) -> AdapterResult<QueryResult> {
        self.log.record(format!("execute:{sql}"));
        self.query_result
            .clone()
            .map_err(AdapterError::QueryFailed)
    }
}

/// Connector handing out [`MockAdapter`]s that share one call log.
pub struct MockConnector {
    pub catalog: Catalog,
    pub log: CallLog,
    pub fail_connect_server: bool,
    /// Database name whose `connect` should fail
    pub fail_connect_db: Option<String>,
    pub query_result: Result<QueryResult, String>,
}

impl MockConnector {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            log: CallLog::default(),
            fail_connect_server: false,
            fail_connect_db: None,
            query_result: Ok(sample_result()),
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect_server(&self, server: &ServerConfig) -> AdapterResult<Box<dyn Adapter>> {
        self.log.record(format!("connect_server:{}", server.name));
        if self.fail_connect_server {
            return Err(AdapterError::ConnectionFailed(format!(
                "refused for {}",
                server.name
            )));
        }
        Ok(Box::new(MockAdapter {
            catalog: self.catalog.clone(),
            connected_db: None,
            fail_connect_db: self.fail_connect_db.clone(),
            query_result: self.query_result.clone(),
            log: self.log.clone(),
        }))
    }
}
