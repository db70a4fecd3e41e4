//! MongoDB-backed document store.
//!
//! Identifiers are stored as their string rendering in `_id`, so documents
//! round-trip between backends unchanged.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document as BsonDocument, doc};
use mongodb::{Client, Collection, Database};

use filmoteca_core::{Document, DocumentId, ID_FIELD, document};

use crate::store::query::{Filter, FindQuery};
use crate::store::r#trait::{
    DeleteResult, DocumentStore, InsertOneResult, StoreError, StoreResult, UpdateResult,
};

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::backend(err)
    }
}

/// Process-wide MongoDB handle.
///
/// Connect once at startup with [`MongoDocumentStore::connect`] and call
/// [`MongoDocumentStore::shutdown`] before the process exits.
#[derive(Debug, Clone)]
pub struct MongoDocumentStore {
    client: Client,
    db: Database,
}

impl MongoDocumentStore {
    /// Connect and verify the deployment answers a `ping`.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database, "connected to MongoDB");
        Ok(Self { client, db })
    }

    /// Close pooled connections and wait for in-flight operations.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.db.collection(name)
    }
}

fn id_filter(id: DocumentId) -> BsonDocument {
    doc! { ID_FIELD: id.to_string() }
}

fn to_bson_filter(filter: &Filter) -> StoreResult<BsonDocument> {
    Ok(match filter {
        Filter::All => BsonDocument::new(),
        Filter::Id(id) => id_filter(*id),
        Filter::FieldEq { field, value } => {
            let value = bson::to_bson(value).map_err(StoreError::conversion)?;
            doc! { field.as_str(): value }
        }
        Filter::Contains { field, needle } => doc! {
            field.as_str(): { "$regex": regex::escape(needle), "$options": "i" }
        },
    })
}

fn to_bson_document(doc: &Document) -> StoreResult<BsonDocument> {
    bson::to_document(doc).map_err(StoreError::conversion)
}

fn from_bson_document(doc: BsonDocument) -> StoreResult<Document> {
    document::from_value(Bson::Document(doc).into_relaxed_extjson())
        .map_err(|e| StoreError::corrupt(e.to_string()))
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>> {
        let coll = self.collection(collection);
        let mut find = coll.find(to_bson_filter(&query.filter)?);
        if let Some(field) = &query.sort_by {
            find = find.sort(doc! { field.as_str(): 1 });
        }
        if !query.exclude.is_empty() {
            let projection: BsonDocument = query
                .exclude
                .iter()
                .map(|f| (f.clone(), Bson::Int32(0)))
                .collect();
            find = find.projection(projection);
        }
        if let Some(limit) = query.limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let docs: Vec<BsonDocument> = find.await?.try_collect().await?;
        docs.into_iter().map(from_bson_document).collect()
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> StoreResult<InsertOneResult> {
        let id = DocumentId::new();
        doc.remove(ID_FIELD);
        let doc = to_bson_document(&document::with_id(doc, id))?;

        let res = self.collection(collection).insert_one(doc).await?;
        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: res.inserted_id.as_str().and_then(|s| s.parse().ok()).unwrap_or(id),
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        id: DocumentId,
        mut fields: Document,
    ) -> StoreResult<UpdateResult> {
        fields.remove(ID_FIELD);
        let coll = self.collection(collection);

        // `$set` with no fields is rejected by the server.
        if fields.is_empty() {
            let matched = coll.count_documents(id_filter(id)).await?;
            return Ok(UpdateResult::new(matched.min(1), 0));
        }

        let set = to_bson_document(&fields)?;
        let res = coll.update_one(id_filter(id), doc! { "$set": set }).await?;
        Ok(UpdateResult::new(res.matched_count, res.modified_count))
    }

    async fn delete_one(&self, collection: &str, id: DocumentId) -> StoreResult<DeleteResult> {
        let res = self.collection(collection).delete_one(id_filter(id)).await?;
        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: res.deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contains_filter_escapes_the_needle() {
        let filter = to_bson_filter(&Filter::contains("title", "a.b(c)")).unwrap();
        let inner = filter.get_document("title").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), r"a\.b\(c\)");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn id_filter_uses_string_rendering() {
        let id = DocumentId::new();
        let filter = to_bson_filter(&Filter::Id(id)).unwrap();
        assert_eq!(filter.get_str("_id").unwrap(), id.to_string());
    }

    #[test]
    fn documents_convert_both_ways() {
        let original = document::from_value(json!({
            "_id": DocumentId::new().to_string(),
            "title": "Inception",
            "year": 2010,
            "tags": ["a", "b"],
        }))
        .unwrap();
        let back = from_bson_document(to_bson_document(&original).unwrap()).unwrap();
        assert_eq!(back, original);
    }
}
