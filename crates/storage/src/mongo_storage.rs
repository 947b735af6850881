//! MongoDB implementation of [`UserStorage`].
//!
//! The collection is handled as raw BSON documents so decoding stays an
//! explicit step with its own error, separate from driver failures.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};
use rest_api_core::User;

use crate::document::{decode_user, insert_document, parse_object_id, update_fields};
use crate::error::StorageError;
use crate::traits::UserStorage;

#[derive(Clone, Debug)]
pub struct MongoUserStorage {
    collection: Collection<Document>,
}

impl MongoUserStorage {
    pub fn new(database: &Database, collection: &str) -> Self {
        tracing::info!(database = database.name(), collection, "MongoUserStorage initialized");
        Self { collection: database.collection::<Document>(collection) }
    }
}

#[async_trait]
impl UserStorage for MongoUserStorage {
    async fn create(&self, user: &User) -> Result<String, StorageError> {
        tracing::debug!("create user");
        let document = insert_document(user)?;
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|e| StorageError::database("create user", "new document", e))?;

        match result.inserted_id.as_object_id() {
            Some(oid) => Ok(oid.to_hex()),
            None => {
                tracing::trace!(inserted_id = %result.inserted_id, "inserted id is not an ObjectId");
                Err(StorageError::UnexpectedId(result.inserted_id.to_string()))
            },
        }
    }

    async fn find_one(&self, id: &str) -> Result<User, StorageError> {
        let oid = parse_object_id(id)?;
        tracing::debug!(id, "find user");

        let found = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| StorageError::database("find user", format!("id {id}"), e))?;

        match found {
            Some(document) => decode_user(document, || format!("id {id}")),
            None => Err(StorageError::not_found()),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>, StorageError> {
        tracing::debug!("find all users");
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StorageError::database("find users", "all users", e))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::database("read users cursor", "all users", e))?;

        documents
            .into_iter()
            .enumerate()
            .map(|(index, document)| decode_user(document, || format!("document #{index}")))
            .collect()
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        let oid = parse_object_id(&user.id)?;
        let filter = doc! { "_id": oid };
        let fields = update_fields(oid, user)?;

        if fields.is_empty() {
            tracing::debug!(id = %user.id, "empty user patch, checking existence only");
            let count = self
                .collection
                .count_documents(filter)
                .await
                .map_err(|e| StorageError::database("update user", format!("id {}", user.id), e))?;
            return if count == 0 { Err(StorageError::not_found()) } else { Ok(()) };
        }

        let result = self
            .collection
            .update_one(filter, doc! { "$set": fields })
            .await
            .map_err(|e| StorageError::database("update user", format!("id {}", user.id), e))?;

        if result.matched_count == 0 {
            return Err(StorageError::not_found());
        }

        tracing::trace!(
            matched = result.matched_count,
            modified = result.modified_count,
            "user updated"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| StorageError::database("delete user", format!("id {id}"), e))?;

        if result.deleted_count == 0 {
            return Err(StorageError::not_found());
        }

        tracing::trace!(deleted = result.deleted_count, "user deleted");
        Ok(())
    }
}
