//! UserStore tests against an in-memory SQLite database.

mod support;

use sea_orm::EntityTrait;
use tokio_test::{assert_err, assert_ok};

use common::AppError;
use domain::User;
use user_service_lib::repository::entities::UserEntity;
use user_service_lib::repository::{UserRepository, UserStore};

#[tokio::test]
async fn test_add_assigns_increasing_ids() {
    let repo = UserStore::new(support::memory_db().await);

    let first = assert_ok!(repo.add("Alice".to_string()).await);
    let second = assert_ok!(repo.add("Bob".to_string()).await);

    assert!(first > 0);
    assert!(second > first);
}

#[tokio::test]
async fn test_add_leaves_optional_columns_null() {
    let db = support::memory_db().await;
    let repo = UserStore::new(db.clone());

    let id = repo.add("Alice".to_string()).await.unwrap();

    let row = UserEntity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(row.name, "Alice");
    assert_eq!(row.second_name, None);
    assert_eq!(row.surname, None);
}

#[tokio::test]
async fn test_get_by_id_returns_stored_user() {
    let repo = UserStore::new(support::memory_db().await);
    let id = repo.add("Alice".to_string()).await.unwrap();

    let user = assert_ok!(repo.get_by_id(id).await);

    assert_eq!(user.id, id);
    assert_eq!(user.name, "Alice");
    assert_eq!(user.second_name, "");
    assert_eq!(user.surname, "");
}

#[tokio::test]
async fn test_get_by_id_missing_is_not_found() {
    let repo = UserStore::new(support::memory_db().await);

    let err = assert_err!(repo.get_by_id(404).await);
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_update_changes_only_name() {
    let repo = UserStore::new(support::memory_db().await);
    let id = repo.add("Alice".to_string()).await.unwrap();

    let updated = assert_ok!(repo.update(&User::new(id, "Bob")).await);
    assert!(updated);

    let user = repo.get_by_id(id).await.unwrap();
    assert_eq!(user.name, "Bob");
}

#[tokio::test]
async fn test_update_missing_reports_no_rows() {
    let repo = UserStore::new(support::memory_db().await);

    let updated = assert_ok!(repo.update(&User::new(77, "Nobody")).await);
    assert!(!updated);
}

#[tokio::test]
async fn test_delete_removes_user_and_is_idempotent() {
    let repo = UserStore::new(support::memory_db().await);
    let id = repo.add("Alice".to_string()).await.unwrap();

    assert_ok!(repo.delete(id).await);
    assert!(matches!(
        repo.get_by_id(id).await,
        Err(AppError::NotFound)
    ));

    // Deleting again is still a success
    assert_ok!(repo.delete(id).await);
}
