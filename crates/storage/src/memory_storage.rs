//! In-memory implementation of [`UserStorage`].
//!
//! Same identifier, merge and not-found semantics as the MongoDB backend,
//! without a server. Used by tests and `serve --storage memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use rest_api_core::User;
use tokio::sync::RwLock;

use crate::document::{decode_user, insert_document, parse_object_id, update_fields, ID_FIELD};
use crate::error::StorageError;
use crate::traits::UserStorage;

#[derive(Debug, Default)]
pub struct MemoryUserStorage {
    documents: RwLock<BTreeMap<ObjectId, Document>>,
}

impl MemoryUserStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Raw stored document, `_id` included.
    pub async fn raw(&self, id: &str) -> Option<Document> {
        let oid = ObjectId::parse_str(id).ok()?;
        self.documents.read().await.get(&oid).cloned()
    }

    /// Overwrite raw fields, bypassing encoding.
    #[cfg(test)]
    pub(crate) async fn corrupt(&self, id: &str, fields: Document) {
        let Ok(oid) = ObjectId::parse_str(id) else { return };
        if let Some(stored) = self.documents.write().await.get_mut(&oid) {
            for (key, value) in fields {
                stored.insert(key, value);
            }
        }
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn create(&self, user: &User) -> Result<String, StorageError> {
        let mut document = insert_document(user)?;
        let oid = ObjectId::new();
        document.insert(ID_FIELD, oid);
        self.documents.write().await.insert(oid, document);
        Ok(oid.to_hex())
    }

    async fn find_one(&self, id: &str) -> Result<User, StorageError> {
        let oid = parse_object_id(id)?;
        let document = self.documents.read().await.get(&oid).cloned();
        match document {
            Some(document) => decode_user(document, || format!("id {id}")),
            None => Err(StorageError::not_found()),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>, StorageError> {
        let documents: Vec<Document> = self.documents.read().await.values().cloned().collect();
        documents
            .into_iter()
            .enumerate()
            .map(|(index, document)| decode_user(document, || format!("document #{index}")))
            .collect()
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        let oid = parse_object_id(&user.id)?;
        let fields = update_fields(oid, user)?;

        let mut documents = self.documents.write().await;
        let stored = documents.get_mut(&oid).ok_or_else(StorageError::not_found)?;
        for (key, value) in fields {
            stored.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let oid = parse_object_id(id)?;
        match self.documents.write().await.remove(&oid) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found()),
        }
    }
}
