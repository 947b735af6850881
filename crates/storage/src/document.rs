//! BSON shape of a stored user and identifier translation.
//!
//! The native `ObjectId` never leaves this crate: the port speaks hex
//! strings, and conversion happens here for every backend.

use mongodb::bson::{self, oid::ObjectId, Document};
use rest_api_core::User;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Identity field name in stored documents.
pub(crate) const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserDocument {
    /// Document for `user` with the given native id. The external `user.id`
    /// is deliberately not read.
    pub fn from_user(id: Option<ObjectId>, user: &User) -> Self {
        Self {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        }
    }

    pub fn into_user(self) -> User {
        User {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

/// External hex id to native ObjectId.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, StorageError> {
    ObjectId::parse_str(id)
        .map_err(|source| StorageError::InvalidId { id: id.to_owned(), source })
}

/// New document to insert: all present non-id fields.
pub(crate) fn insert_document(user: &User) -> Result<Document, StorageError> {
    bson::to_document(&UserDocument::from_user(None, user)).map_err(StorageError::Encode)
}

/// Fields for a `$set` patch: the user as a field map with the identity
/// removed. Encoding failure aborts; an empty map means "nothing to change".
pub(crate) fn update_fields(oid: ObjectId, user: &User) -> Result<Document, StorageError> {
    let mut fields =
        bson::to_document(&UserDocument::from_user(Some(oid), user)).map_err(StorageError::Encode)?;
    fields.remove(ID_FIELD);
    Ok(fields)
}

pub(crate) fn decode_user(doc: Document, context: impl FnOnce() -> String) -> Result<User, StorageError> {
    bson::from_document::<UserDocument>(doc)
        .map(UserDocument::into_user)
        .map_err(|source| StorageError::Decode { context: context(), source })
}
