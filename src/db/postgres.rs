//! PostgreSQL database adapter
//!
//! Concrete implementation using tokio-postgres. Holds the two connection
//! handles the session needs: a server-level client against the `postgres`
//! maintenance database (used only to enumerate databases) and a
//! database-level client opened by [`Adapter::connect`] and replaced on
//! every successful reconnect.

use crate::config::ServerConfig;
use crate::db::adapter::Adapter;
use crate::db::types::{ColumnRecord, QueryResult};
use crate::error::{AdapterError, AdapterResult};
use async_trait::async_trait;
use tokio_postgres::{Client, SimpleQueryMessage};
use tracing::{debug, warn};

/// PostgreSQL adapter
pub struct PostgresAdapter {
    /// Connection to the maintenance database, for `list_databases`
    server_client: Client,
    /// Connection to the currently selected database, for everything else
    db_client: Option<Client>,
    host: String,
    user: String,
    pass: String,
}

impl PostgresAdapter {
    /// Open the server-level handle for a configured server.
    pub async fn connect_server(server: &ServerConfig) -> AdapterResult<Self> {
        let server_client = open_client(&server.host, &server.user, &server.pass, "postgres")
            .await
            .map_err(AdapterError::ConnectionFailed)?;
        Ok(Self {
            server_client,
            db_client: None,
            host: server.host.clone(),
            user: server.user.clone(),
            pass: server.pass.clone(),
        })
    }

    fn db(&self) -> AdapterResult<&Client> {
        self.db_client
            .as_ref()
            .ok_or(AdapterError::NotConnected("no database selected"))
    }
}

#[async_trait]
impl Adapter for PostgresAdapter {
    async fn list_databases(&mut self) -> AdapterResult<Vec<String>> {
        let rows = self
            .server_client
            .query(
                "SELECT datname FROM pg_database \
                 WHERE NOT datistemplate AND datdba IN \
                 (SELECT usesysid FROM pg_user WHERE usename = current_user) \
                 ORDER BY datname",
                &[],
            )
            .await
            .map_err(|e| AdapterError::CatalogFailed(e.to_string()))?;
        Ok(rows.iter().map(|r| r.get(0)).collect())
    }

    async fn connect(&mut self, database: &str) -> AdapterResult<()> {
        // Open the new handle before touching the old one: a failed connect
        // must leave the previous database-level connection usable.
        let client = open_client(&self.host, &self.user, &self.pass, database)
            .await
            .map_err(AdapterError::ConnectionFailed)?;
        debug!(database, "database handle replaced");
        self.db_client = Some(client);
        Ok(())
    }

    async fn list_schemas(&mut self) -> AdapterResult<Vec<String>> {
        let rows = self
            .db()?
            .query(
                "SELECT schema_name FROM information_schema.schemata \
                 WHERE schema_owner = current_user OR schema_name = 'public' \
                 ORDER BY schema_name",
                &[],
            )
            .await
            .map_err(|e| AdapterError::CatalogFailed(e.to_string()))?;
        Ok(rows.iter().map(|r| r.get(0)).collect())
    }

    async fn list_tables(&mut self, schema: &str) -> AdapterResult<Vec<String>> {
        let rows = self
            .db()?
            .query(
                "SELECT tablename FROM pg_catalog.pg_tables \
                 WHERE tableowner = current_user AND schemaname = $1 \
                 ORDER BY tablename",
                &[&schema],
            )
            .await
            .map_err(|e| AdapterError::CatalogFailed(e.to_string()))?;
        Ok(rows.iter().map(|r| r.get(0)).collect())
    }

    async fn list_columns(
        &mut self,
        schema: &str,
        table: &str,
    ) -> AdapterResult<Vec<ColumnRecord>> {
        let rows = self
            .db()?
            .query(
                "SELECT column_name, ordinal_position::int4, is_nullable, udt_name, \
                        character_maximum_length::int4, is_identity \
                 FROM information_schema.columns \
                 WHERE table_schema = $1 AND table_name = $2 \
                 ORDER BY ordinal_position",
                &[&schema, &table],
            )
            .await
            .map_err(|e| AdapterError::CatalogFailed(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|r| ColumnRecord {
                name: r.get(0),
                ordinal: r.get(1),
                nullable: yes(r.get(2)),
                data_type: r.get(3),
                max_length: r.get(4),
                is_identity: yes(r.get(5)),
            })
            .collect())
    }

    async fn execute_query(&mut self, sql: &str) -> AdapterResult<QueryResult> {
        // simple_query keeps the wire format textual, so every cell arrives
        // already stringified regardless of its column type.
        let messages = self
            .db()?
            .simple_query(sql)
            .await
            .map_err(|e| AdapterError::QueryFailed(e.to_string()))?;

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for message in messages {
            match message {
                SimpleQueryMessage::RowDescription(desc) => {
                    columns = desc.iter().map(|c| c.name().to_string()).collect();
                }
                SimpleQueryMessage::Row(row) => {
                    if columns.is_empty() {
                        columns = row
                            .columns()
                            .iter()
                            .map(|c| c.name().to_string())
                            .collect();
                    }
                    rows.push(
                        (0..row.len())
                            .map(|i| row.get(i).unwrap_or("").to_string())
                            .collect(),
                    );
                }
                SimpleQueryMessage::CommandComplete(n) => {
                    debug!(affected = n, "command complete");
                }
                _ => {}
            }
        }

        let result = QueryResult { columns, rows };
        result.validate()?;
        Ok(result)
    }
}

/// `is_nullable` / `is_identity` arrive as "YES"/"NO" strings
fn yes(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

/// Open one tokio-postgres client and drive its connection in the
/// background. The driver task ends when the client is dropped; a lost
/// connection is logged and surfaces as a failed operation on next use.
async fn open_client(
    host: &str,
    user: &str,
    pass: &str,
    database: &str,
) -> Result<Client, String> {
    let conn_string = format!(
        "host={} user={} password={} dbname={}",
        host, user, pass, database
    );
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(make_tls_config());
    let (client, connection) = tokio_postgres::connect(&conn_string, tls)
        .await
        .map_err(|e| e.to_string())?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!(error = %e, "connection lost");
        }
    });
    Ok(client)
}

/// Build a rustls ClientConfig that trusts OS certificates (with Mozilla roots as fallback)
fn make_tls_config() -> rustls::ClientConfig {
    let mut root_store = rustls::RootCertStore::empty();

    let native_certs = rustls_native_certs::load_native_certs();
    let mut loaded = 0;
    for cert in native_certs.certs {
        if root_store.add(cert).is_ok() {
            loaded += 1;
        }
    }
    if loaded == 0 {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_mapping() {
        assert!(yes("YES"));
        assert!(yes("yes"));
        assert!(!yes("NO"));
        assert!(!yes(""));
    }
}
