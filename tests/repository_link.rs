//! PostgreSQL repository tests.
//!
//! Require a reachable database (`DATABASE_URL`); run with
//! `cargo test --test repository_link -- --ignored`.

use link_registry::AppError;
use link_registry::domain::entities::NewLink;
use link_registry::domain::repositories::LinkRepository;
use link_registry::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(short_id: &str, url: &str) -> NewLink {
    NewLink {
        short_id: short_id.to_string(),
        redirect_url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.short_id, "test123");
    assert_eq!(link.redirect_url, "https://example.com");
    assert!(link.visit_history.is_empty());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_duplicate_short_id(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup1", "https://a.example"))
        .await
        .unwrap();
    let result = repo.create(new_link("dup1", "https://b.example")).await;

    assert!(matches!(result, Err(AppError::DuplicateKey { .. })));

    let stored = repo.find_by_short_id("dup1").await.unwrap().unwrap();
    assert_eq!(stored.redirect_url, "https://a.example");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_short_id_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_short_id("notfound").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_record_visit_and_fetch(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("visit1", "https://example.com"))
        .await
        .unwrap();

    let first = repo
        .record_visit_and_fetch("visit1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.total_clicks(), 1);
    assert!(first.visit_history[0].timestamp > 0);

    let second = repo
        .record_visit_and_fetch("visit1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.total_clicks(), 2);
    assert_eq!(second.visit_history[0], first.visit_history[0]);
    assert!(second.visit_history[1].timestamp >= second.visit_history[0].timestamp);
    assert_eq!(second.redirect_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_record_visit_unknown_short_id(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let result = repo
        .record_visit_and_fetch("ghost")
        .await
        .unwrap();
    assert!(result.is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_visits_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.create(new_link("busy1", "https://example.com"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.record_visit_and_fetch("busy1")
                .await
                .unwrap()
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let link = repo.find_by_short_id("busy1").await.unwrap().unwrap();
    assert_eq!(link.total_clicks(), 50);
    assert!(
        link.visit_history
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
