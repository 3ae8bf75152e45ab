//! Deterministic MongoDB operations that bypass the model.
//!
//! The interactive shell uses these for catalog commands where a model
//! round-trip would be waste: listing databases, listing collections,
//! describing a collection schema. Each maps onto exactly one MCP tool
//! call with a well-known payload shape.

use askmongo_core::session::ToolSession;
use askmongo_core::{Error, Result, SessionError};
use serde_json::{Map, Value};
use tracing::debug;

/// Result cap for `find` when the caller does not give one.
pub const DEFAULT_FIND_LIMIT: u64 = 10;

/// Direct tool invocations against an MCP session, no model involved.
pub struct DirectOps<'a> {
    session: &'a dyn ToolSession,
}

impl<'a> DirectOps<'a> {
    pub fn new(session: &'a dyn ToolSession) -> Self {
        Self { session }
    }

    /// Count documents in a collection, optionally matching a filter.
    ///
    /// The filter key travels as `query` on the wire; it is omitted
    /// entirely when absent rather than sent as an empty object.
    pub async fn count(
        &self,
        database: &str,
        collection: &str,
        query: Option<Value>,
    ) -> Result<String> {
        let mut payload = namespace(database, collection)?;
        if let Some(query) = query {
            payload.insert("query".into(), query);
        }
        self.call("count", payload).await
    }

    /// Find documents. `filter`, `projection`, and `sort` are sent only
    /// when given; `limit` always travels, defaulting to
    /// [`DEFAULT_FIND_LIMIT`].
    pub async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: Option<Value>,
        projection: Option<Value>,
        sort: Option<Value>,
        limit: Option<u64>,
    ) -> Result<String> {
        let mut payload = namespace(database, collection)?;
        if let Some(filter) = filter {
            payload.insert("filter".into(), filter);
        }
        if let Some(projection) = projection {
            payload.insert("projection".into(), projection);
        }
        if let Some(sort) = sort {
            payload.insert("sort".into(), sort);
        }
        payload.insert(
            "limit".into(),
            Value::from(limit.unwrap_or(DEFAULT_FIND_LIMIT)),
        );
        self.call("find", payload).await
    }

    /// Run an aggregation pipeline.
    pub async fn aggregate(
        &self,
        database: &str,
        collection: &str,
        pipeline: Vec<Value>,
    ) -> Result<String> {
        let mut payload = namespace(database, collection)?;
        payload.insert("pipeline".into(), Value::Array(pipeline));
        self.call("aggregate", payload).await
    }

    /// List all databases on the deployment.
    pub async fn list_databases(&self) -> Result<String> {
        self.call("list-databases", Map::new()).await
    }

    /// List collections in a database.
    pub async fn list_collections(&self, database: &str) -> Result<String> {
        require(database, "database")?;
        let mut payload = Map::new();
        payload.insert("database".into(), Value::from(database));
        self.call("list-collections", payload).await
    }

    /// Describe the inferred schema of a collection.
    pub async fn collection_schema(&self, database: &str, collection: &str) -> Result<String> {
        let payload = namespace(database, collection)?;
        self.call("collection-schema", payload).await
    }

    async fn call(&self, tool: &str, payload: Map<String, Value>) -> Result<String> {
        debug!(tool, "Direct tool call");
        let reply = self.session.invoke(tool, Value::Object(payload)).await?;
        Ok(reply.text())
    }
}

/// Reject blank identifiers before they reach the server.
fn require(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Session(SessionError::InvalidArgument(format!(
            "{name} must not be empty"
        ))));
    }
    Ok(())
}

fn namespace(database: &str, collection: &str) -> Result<Map<String, Value>> {
    require(database, "database")?;
    require(collection, "collection")?;
    let mut payload = Map::new();
    payload.insert("database".into(), Value::from(database));
    payload.insert("collection".into(), Value::from(collection));
    Ok(payload)
}
