//! Document store access for the slug remediation check
//!
//! The workflow only needs one query: documents of a collection where a field
//! is missing or null, projected to `{id, title}`. [`DocumentStore`] is that
//! query; adapters decide where documents come from.
//!
//! [`MongoStore`] queries a live database; [`JsonFileStore`] reads collection
//! exports from disk.

use crate::error::{AutomationError, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Client;
use mongodb::bson::{Bson, Document, doc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// A document lacking the field, reduced to what the mapping needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: String,
    pub title: String,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents of `collection` where `field` is absent or null
    async fn find_missing_field(&self, collection: &str, field: &str) -> Result<Vec<StoreRecord>>;
}

/// Collections held in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, name: impl Into<String>, documents: Vec<Value>) -> Self {
        self.collections.insert(name.into(), documents);
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_missing_field(&self, collection: &str, field: &str) -> Result<Vec<StoreRecord>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| select_missing(docs, field))
            .unwrap_or_default())
    }
}

/// A directory of collection exports, one `<collection>.json` array each
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn find_missing_field(&self, collection: &str, field: &str) -> Result<Vec<StoreRecord>> {
        let path = self.dir.join(format!("{}.json", collection));
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AutomationError::ExternalStore(format!("cannot read {}: {}", path.display(), e))
        })?;

        let documents: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            AutomationError::ExternalStore(format!("{} is not a JSON array: {}", path.display(), e))
        })?;

        Ok(select_missing(&documents, field))
    }
}

/// The default database of a MongoDB deployment
pub struct MongoStore {
    database: mongodb::Database,
}

impl MongoStore {
    /// Connect using `uri`, which must name a database
    /// (`mongodb://host/<database>`).
    ///
    /// The driver connects lazily; an unreachable server only shows up as an
    /// error from the first query.
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AutomationError::ExternalStore(format!("invalid MongoDB URI: {}", e)))?;
        let database = client.default_database().ok_or_else(|| {
            AutomationError::ExternalStore("MongoDB URI names no default database".to_string())
        })?;
        Ok(Self { database })
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_missing_field(&self, collection: &str, field: &str) -> Result<Vec<StoreRecord>> {
        let query_error = |e: mongodb::error::Error| {
            AutomationError::ExternalStore(format!("query on {} failed: {}", collection, e))
        };

        let documents: Vec<Document> = self
            .database
            .collection::<Document>(collection)
            .find(missing_field_filter(field))
            .projection(doc! { "_id": 1, "title": 1 })
            .await
            .map_err(query_error)?
            .try_collect()
            .await
            .map_err(query_error)?;

        Ok(documents.iter().map(record_from_bson).collect())
    }
}

/// `{"$or": [{field: {"$exists": false}}, {field: null}]}`
fn missing_field_filter(field: &str) -> Document {
    let mut absent = Document::new();
    absent.insert(field, doc! { "$exists": false });
    let mut null = Document::new();
    null.insert(field, Bson::Null);
    doc! { "$or": [absent, null] }
}

fn record_from_bson(document: &Document) -> StoreRecord {
    let id = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(Bson::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    StoreRecord {
        id,
        title: document.get_str("title").unwrap_or_default().to_string(),
    }
}

/// Open the store named by a connection string.
///
/// `mongodb://` and `mongodb+srv://` URIs open a [`MongoStore`] on the
/// database they name; `file://<dir>` and bare paths open a [`JsonFileStore`].
pub async fn open_store(uri: &str) -> Result<Box<dyn DocumentStore>> {
    let uri = uri.trim();

    if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
        return Ok(Box::new(MongoStore::connect(uri).await?));
    }

    let path = uri.strip_prefix("file://").unwrap_or(uri);
    if path.is_empty() || path.contains("://") {
        return Err(AutomationError::ExternalStore(format!(
            "unsupported store URI: {}",
            uri
        )));
    }

    Ok(Box::new(JsonFileStore::new(path)))
}

fn select_missing(documents: &[Value], field: &str) -> Vec<StoreRecord> {
    documents
        .iter()
        .filter(|doc| doc.get(field).is_none_or(Value::is_null))
        .map(|doc| StoreRecord {
            id: document_id(doc),
            title: doc
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

/// `_id` (or `id`) as a string; extended-JSON `{"$oid": ...}` is unwrapped
fn document_id(doc: &Value) -> String {
    let id = doc.get("_id").or_else(|| doc.get("id"));
    match id {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => match map.get("$oid") {
            Some(Value::String(oid)) => oid.clone(),
            _ => Value::Object(map.clone()).to_string(),
        },
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
