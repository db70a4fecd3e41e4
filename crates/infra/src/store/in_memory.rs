use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use filmoteca_core::{Document, DocumentId, ID_FIELD, document};

use crate::store::query::FindQuery;
use crate::store::r#trait::{
    DeleteResult, DocumentStore, InsertOneResult, StoreError, StoreResult, UpdateResult,
};

/// In-memory document store for tests/dev.
///
/// Collections are created on first insert and keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.inner
            .read()
            .map(|map| map.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::backend("in-memory store lock poisoned")
}

/// Order values the way a document database does for ascending sorts:
/// missing/null, then numbers, then strings, then booleans, then the rest.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Object(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Bool(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>> {
        let map = self.inner.read().map_err(poisoned)?;
        let Some(docs) = map.get(collection) else {
            return Ok(Vec::new());
        };

        let mut out: Vec<Document> = docs
            .iter()
            .filter(|d| query.filter.matches(d))
            .cloned()
            .collect();
        drop(map);

        if let Some(field) = &query.sort_by {
            // Stable, so ties keep insertion order.
            out.sort_by(|a, b| compare_values(a.get(field), b.get(field)));
        }
        if let Some(limit) = query.limit {
            out.truncate(limit);
        }
        if !query.exclude.is_empty() {
            for doc in &mut out {
                for field in &query.exclude {
                    doc.remove(field);
                }
            }
        }

        Ok(out)
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> StoreResult<InsertOneResult> {
        let id = DocumentId::new();
        doc.remove(ID_FIELD);
        let doc = document::with_id(doc, id);

        let mut map = self.inner.write().map_err(poisoned)?;
        map.entry(collection.to_string()).or_default().push(doc);

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        id: DocumentId,
        mut fields: Document,
    ) -> StoreResult<UpdateResult> {
        fields.remove(ID_FIELD);

        let mut map = self.inner.write().map_err(poisoned)?;
        let target = map
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| document::id_of(d) == Some(id)));

        let Some(target) = target else {
            return Ok(UpdateResult::new(0, 0));
        };

        let mut modified = false;
        for (key, value) in fields {
            if target.get(&key) != Some(&value) {
                target.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateResult::new(1, u64::from(modified)))
    }

    async fn delete_one(&self, collection: &str, id: DocumentId) -> StoreResult<DeleteResult> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let deleted = match map.get_mut(collection) {
            Some(docs) => match docs.iter().position(|d| document::id_of(d) == Some(id)) {
                Some(pos) => {
                    docs.remove(pos);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::Filter;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        document::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_fresh_unique_ids() {
        let store = InMemoryDocumentStore::new();
        let a = store
            .insert_one("filmes", doc(json!({"_id": "client-chosen", "title": "A"})))
            .await
            .unwrap();
        let b = store.insert_one("filmes", doc(json!({"title": "B"}))).await.unwrap();
        assert!(a.acknowledged);
        assert_ne!(a.inserted_id, b.inserted_id);

        let found = store.find("filmes", &FindQuery::new(Filter::Id(a.inserted_id))).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["_id"], a.inserted_id.to_string());
        assert_eq!(store.len("filmes"), 2);
    }

    #[tokio::test]
    async fn find_on_unknown_collection_is_empty() {
        let store = InMemoryDocumentStore::new();
        assert!(store.find("nada", &FindQuery::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sort_and_exclude() {
        let store = InMemoryDocumentStore::new();
        for (nome, senha) in [("Carla", "c"), ("ana", "a"), ("Bruno", "b")] {
            store
                .insert_one("usuarios", doc(json!({"nome": nome, "senha": senha})))
                .await
                .unwrap();
        }
        store.insert_one("usuarios", doc(json!({"senha": "x"}))).await.unwrap();

        let out = store
            .find("usuarios", &FindQuery::all().sorted_by("nome").excluding(["senha"]))
            .await
            .unwrap();
        let names: Vec<_> = out.iter().map(|d| d.get("nome").cloned()).collect();
        assert_eq!(
            names,
            vec![None, Some(json!("Bruno")), Some(json!("Carla")), Some(json!("ana"))]
        );
        assert!(out.iter().all(|d| !d.contains_key("senha")));
        assert!(out.iter().all(|d| d.contains_key("_id")));
    }

    #[tokio::test]
    async fn update_sets_fields_and_never_the_id() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("filmes", doc(json!({"title": "A", "year": "2000", "director": "X"})))
            .await
            .unwrap()
            .inserted_id;

        let fake = DocumentId::new();
        let res = store
            .update_one(
                "filmes",
                id,
                doc(json!({"_id": fake.to_string(), "title": "B", "year": "2000"})),
            )
            .await
            .unwrap();
        assert_eq!(res, UpdateResult::new(1, 1));

        let found = store.find("filmes", &FindQuery::new(Filter::Id(id))).await.unwrap();
        assert_eq!(found[0]["title"], "B");
        assert_eq!(found[0]["director"], "X");
        assert_eq!(found[0]["_id"], id.to_string());
    }

    #[tokio::test]
    async fn unchanged_update_reports_match_without_modification() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("filmes", doc(json!({"title": "A"})))
            .await
            .unwrap()
            .inserted_id;
        let res = store.update_one("filmes", id, doc(json!({"title": "A"}))).await.unwrap();
        assert_eq!(res, UpdateResult::new(1, 0));

        let res = store
            .update_one("filmes", DocumentId::new(), doc(json!({"title": "A"})))
            .await
            .unwrap();
        assert_eq!(res, UpdateResult::new(0, 0));
    }

    #[tokio::test]
    async fn delete_then_find_is_empty() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("prestadores", doc(json!({"cnpj": "1"})))
            .await
            .unwrap()
            .inserted_id;

        let res = store.delete_one("prestadores", id).await.unwrap();
        assert_eq!(res.deleted_count, 1);
        let res = store.delete_one("prestadores", id).await.unwrap();
        assert_eq!(res.deleted_count, 0);

        let found = store.find("prestadores", &FindQuery::new(Filter::Id(id))).await.unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn numbers_sort_before_strings() {
        assert_eq!(
            compare_values(Some(&json!(10)), Some(&json!("1"))),
            Ordering::Less
        );
        assert_eq!(compare_values(Some(&json!(2)), Some(&json!(10))), Ordering::Less);
        assert_eq!(compare_values(None, Some(&json!(0))), Ordering::Less);
    }
}
