use sqlx::SqlitePool;
use std::sync::Arc;
use very_short_link::domain::repositories::LinkRepository;
use very_short_link::infrastructure::persistence::SqliteLinkRepository;
use very_short_link::utils::encoding::encode_endpoint;

const NOW: i64 = 1_700_000_000;

fn repo(pool: SqlitePool) -> SqliteLinkRepository {
    SqliteLinkRepository::new(Arc::new(pool))
}

#[sqlx::test]
async fn test_insert_assigns_sequential_ids(pool: SqlitePool) {
    let repo = repo(pool);

    let first = repo.insert(&encode_endpoint("a.example"), NOW).await.unwrap();
    let second = repo.insert(&encode_endpoint("b.example"), NOW).await.unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[sqlx::test]
async fn test_ids_are_not_reused_after_delete(pool: SqlitePool) {
    let repo = repo(pool);

    let first = repo.insert("YQ==", NOW).await.unwrap();
    let second = repo.insert("Yg==", NOW).await.unwrap();
    assert!(repo.delete_by_id(second).await.unwrap());

    let third = repo.insert("Yw==", NOW).await.unwrap();

    assert_eq!(first, 1);
    assert_eq!(third, 3);
}

#[sqlx::test]
async fn test_find_by_endpoint(pool: SqlitePool) {
    let repo = repo(pool);
    let endpoint = encode_endpoint("example.com/page");

    assert_eq!(repo.find_by_endpoint(&endpoint).await.unwrap(), None);

    let id = repo.insert(&endpoint, NOW).await.unwrap();

    assert_eq!(repo.find_by_endpoint(&endpoint).await.unwrap(), Some(id));
    assert_eq!(
        repo.find_by_endpoint(&encode_endpoint("example.com/other"))
            .await
            .unwrap(),
        None
    );
}

#[sqlx::test]
async fn test_find_by_id(pool: SqlitePool) {
    let repo = repo(pool);
    let endpoint = encode_endpoint("example.com/page");
    let id = repo.insert(&endpoint, NOW).await.unwrap();

    assert_eq!(repo.find_by_id(id).await.unwrap(), Some(endpoint));
    assert_eq!(repo.find_by_id(id + 1).await.unwrap(), None);
}

#[sqlx::test]
async fn test_renew_updates_expiration(pool: SqlitePool) {
    let repo = repo(pool);
    let id = repo.insert("YQ==", NOW).await.unwrap();

    repo.renew(id, NOW + 500).await.unwrap();

    let links = repo.list().await.unwrap();
    assert_eq!(links[0].expiration_date, NOW + 500);
}

#[sqlx::test]
async fn test_delete_missing_link_is_noop(pool: SqlitePool) {
    let repo = repo(pool);

    assert!(!repo.delete_by_id(42).await.unwrap());
}

#[sqlx::test]
async fn test_sweep_removes_only_strictly_expired(pool: SqlitePool) {
    let repo = repo(pool);
    repo.insert("YQ==", NOW - 1).await.unwrap();
    let boundary = repo.insert("Yg==", NOW).await.unwrap();
    let live = repo.insert("Yw==", NOW + 1).await.unwrap();

    let removed = repo.sweep_expired(NOW).await.unwrap();

    assert_eq!(removed, 1);
    let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![boundary, live]);
}

#[sqlx::test]
async fn test_count(pool: SqlitePool) {
    let repo = repo(pool);
    assert_eq!(repo.count().await.unwrap(), 0);

    repo.insert("YQ==", NOW).await.unwrap();
    repo.insert("Yg==", NOW).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_list_is_ordered_by_id(pool: SqlitePool) {
    let repo = repo(pool);
    repo.insert(&encode_endpoint("b.example"), NOW + 20).await.unwrap();
    repo.insert(&encode_endpoint("a.example"), NOW + 10).await.unwrap();

    let links = repo.list().await.unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].id, 1);
    assert_eq!(links[0].endpoint, encode_endpoint("b.example"));
    assert_eq!(links[1].token(), "2");
}
