use mongodb::bson::doc;
use rest_api_core::{AppError, User};

use super::{create_test_storage, create_test_user, UNKNOWN_ID};
use crate::{StorageError, UserStorage};

#[tokio::test]
async fn test_create_then_find_one_round_trips() {
    let storage = create_test_storage();
    let user = create_test_user("alice");

    let id = storage.create(&user).await.unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    let found = storage.find_one(&id).await.unwrap();
    assert_eq!(found, user.clone().with_id(id));
}

#[tokio::test]
async fn test_create_ignores_caller_supplied_id() {
    let storage = create_test_storage();
    let user = User::with_name("alice").with_id(UNKNOWN_ID);

    let id = storage.create(&user).await.unwrap();
    assert_ne!(id, UNKNOWN_ID);
    assert!(storage.find_one(UNKNOWN_ID).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_find_one_invalid_id_is_not_not_found() {
    let storage = create_test_storage();
    let err = storage.find_one("not-hex").await.unwrap_err();
    assert!(err.is_invalid_id());
    assert!(!err.is_not_found());
    assert!(err.app_error().is_none());
}

#[tokio::test]
async fn test_find_one_unknown_id_returns_shared_not_found() {
    let storage = create_test_storage();
    let err = storage.find_one(UNKNOWN_ID).await.unwrap_err();
    let app_error = err.app_error().unwrap();
    assert!(std::ptr::eq(app_error, AppError::not_found()));
}

#[tokio::test]
async fn test_find_all_returns_every_user() {
    let storage = create_test_storage();
    let alice = storage.create(&create_test_user("alice")).await.unwrap();
    let bob = storage.create(&create_test_user("bob")).await.unwrap();

    let mut ids: Vec<String> =
        storage.find_all().await.unwrap().into_iter().map(|u| u.id).collect();
    ids.sort();
    let mut expected = vec![alice, bob];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_find_all_on_empty_store_is_empty() {
    let storage = create_test_storage();
    assert!(storage.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_merges_present_fields_only() {
    let storage = create_test_storage();
    let id = storage.create(&create_test_user("alice")).await.unwrap();

    let patch = User { email: Some("new@example.com".to_owned()), ..User::default() }.with_id(&id);
    storage.update(&patch).await.unwrap();

    let found = storage.find_one(&id).await.unwrap();
    assert_eq!(found.email.as_deref(), Some("new@example.com"));
    assert_eq!(found.name.as_deref(), Some("alice"));
    assert_eq!(found.password.as_deref(), Some("hunter2"));
}

#[tokio::test]
async fn test_update_never_rewrites_identity() {
    let storage = create_test_storage();
    let id = storage.create(&create_test_user("alice")).await.unwrap();

    storage.update(&User::with_name("alicia").with_id(&id)).await.unwrap();

    let raw = storage.raw(&id).await.unwrap();
    assert_eq!(raw.get_object_id("_id").unwrap().to_hex(), id);
    assert_eq!(raw.get_str("name").unwrap(), "alicia");
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn test_update_with_empty_patch_checks_existence() {
    let storage = create_test_storage();
    let id = storage.create(&create_test_user("alice")).await.unwrap();

    storage.update(&User::default().with_id(&id)).await.unwrap();
    assert_eq!(storage.find_one(&id).await.unwrap().name.as_deref(), Some("alice"));

    let err = storage.update(&User::default().with_id(UNKNOWN_ID)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found_without_mutation() {
    let storage = create_test_storage();
    let id = storage.create(&create_test_user("alice")).await.unwrap();
    let before = storage.raw(&id).await.unwrap();

    let err = storage.update(&User::with_name("mallory").with_id(UNKNOWN_ID)).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(e) if std::ptr::eq(e, AppError::not_found())));
    assert_eq!(storage.raw(&id).await.unwrap(), before);
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn test_update_invalid_id_is_rejected() {
    let storage = create_test_storage();
    let err = storage.update(&User::with_name("x").with_id("123")).await.unwrap_err();
    assert!(err.is_invalid_id());
}

#[tokio::test]
async fn test_delete_then_find_one_is_not_found() {
    let storage = create_test_storage();
    let id = storage.create(&create_test_user("alice")).await.unwrap();

    storage.delete(&id).await.unwrap();
    assert!(storage.find_one(&id).await.unwrap_err().is_not_found());
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found_without_mutation() {
    let storage = create_test_storage();
    storage.create(&create_test_user("alice")).await.unwrap();

    let err = storage.delete(UNKNOWN_ID).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(storage.len().await, 1);

    assert!(storage.delete("zz").await.unwrap_err().is_invalid_id());
}

#[tokio::test]
async fn test_not_found_is_uniform_across_operations() {
    let storage = create_test_storage();
    let errors = [
        storage.find_one(UNKNOWN_ID).await.unwrap_err(),
        storage.update(&User::with_name("x").with_id(UNKNOWN_ID)).await.unwrap_err(),
        storage.delete(UNKNOWN_ID).await.unwrap_err(),
    ];
    for err in errors {
        assert!(std::ptr::eq(err.app_error().unwrap(), AppError::not_found()));
    }
}

#[tokio::test]
async fn test_undecodable_document_fails_find_all() {
    let storage = create_test_storage();
    let id = storage.create(&create_test_user("alice")).await.unwrap();
    storage.corrupt(&id, doc! { "name": 42 }).await;

    let err = storage.find_all().await.unwrap_err();
    assert!(matches!(err, StorageError::Decode { .. }));
}
