use sqlx::SqlitePool;
use std::sync::Arc;
use very_short_link::domain::repositories::SettingRepository;
use very_short_link::infrastructure::persistence::SqliteSettingRepository;

fn repo(pool: SqlitePool) -> SqliteSettingRepository {
    SqliteSettingRepository::new(Arc::new(pool))
}

#[sqlx::test]
async fn test_get_missing_setting(pool: SqlitePool) {
    let repo = repo(pool);

    assert_eq!(repo.get("motd").await.unwrap(), None);
}

#[sqlx::test]
async fn test_set_then_get(pool: SqlitePool) {
    let repo = repo(pool);

    repo.set("motd", "hello").await.unwrap();

    assert_eq!(repo.get("motd").await.unwrap().as_deref(), Some("hello"));
}

#[sqlx::test]
async fn test_set_overwrites_existing_value(pool: SqlitePool) {
    let repo = repo(pool);

    repo.set("motd", "hello").await.unwrap();
    repo.set("motd", "bye").await.unwrap();

    assert_eq!(repo.get("motd").await.unwrap().as_deref(), Some("bye"));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[sqlx::test]
async fn test_null_value_reads_as_missing(pool: SqlitePool) {
    sqlx::query("INSERT INTO Setting (key, value) VALUES ('empty', NULL)")
        .execute(&pool)
        .await
        .unwrap();
    let repo = repo(pool);

    assert_eq!(repo.get("empty").await.unwrap(), None);
}

#[sqlx::test]
async fn test_list_is_ordered_by_key(pool: SqlitePool) {
    let repo = repo(pool);
    repo.set("zeta", "1").await.unwrap();
    repo.set("alpha", "2").await.unwrap();

    let keys: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.key)
        .collect();

    assert_eq!(keys, vec!["alpha", "zeta"]);
}
