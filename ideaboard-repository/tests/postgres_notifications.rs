//! Integration tests for the PostgreSQL notification repository.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `cargo test --test postgres_notifications`

use ideaboard_repository::{
    IdeaRepository, NotificationRepository, PostgresIdeaRepository,
    PostgresNotificationRepository, PostgresUserRepository, UserRepository,
};
use ideaboard_shared::types::{
    IdeaCategory, NewIdea, NewNotification, NewUser, NotificationKind, Page, User, WalletAddress,
};
use uuid::Uuid;

fn wallet(n: u8) -> String {
    format!("0x{:040x}", n)
}

async fn seed_user(pool: &sqlx::PgPool, n: u8, username: Option<&str>) -> User {
    PostgresUserRepository::new(pool.clone())
        .insert(NewUser {
            wallet_address: WalletAddress::parse(&wallet(n)).unwrap(),
            username: username.map(str::to_string),
            bio: None,
            avatar_url: None,
        })
        .await
        .unwrap()
}

fn make_notification(recipient: Uuid, actor: Option<Uuid>, title: &str) -> NewNotification {
    NewNotification {
        user_id: recipient,
        kind: NotificationKind::Like,
        title: title.to_string(),
        content: Some("\"Solar batteries\"".to_string()),
        related_user_id: actor,
        related_idea_id: None,
    }
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_insert_and_list_join_related_context(pool: sqlx::PgPool) {
    let repository = PostgresNotificationRepository::new(pool.clone());
    let recipient = seed_user(&pool, 1, Some("alice")).await;
    let actor = seed_user(&pool, 2, Some("bob")).await;
    let idea = PostgresIdeaRepository::new(pool.clone())
        .insert(NewIdea {
            user_id: recipient.id,
            title: "Solar batteries".to_string(),
            content: "content".to_string(),
            category: IdeaCategory::General,
            tags: Vec::new(),
            ipfs_hash: None,
        })
        .await
        .unwrap();

    repository
        .insert(NewNotification {
            user_id: recipient.id,
            kind: NotificationKind::Like,
            title: "bob liked your idea".to_string(),
            content: Some("\"Solar batteries\"".to_string()),
            related_user_id: Some(actor.id),
            related_idea_id: Some(idea.id),
        })
        .await
        .unwrap();

    let (listed, total) = repository
        .list_by_user(recipient.id, false, &Page::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    let item = &listed[0];
    assert_eq!(item.notification.title, "bob liked your idea");
    assert_eq!(item.notification.kind, NotificationKind::Like);
    assert!(!item.notification.is_read);
    assert_eq!(item.related_username.as_deref(), Some("bob"));
    assert_eq!(item.related_idea_title.as_deref(), Some("Solar batteries"));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_mark_read_only_works_for_the_recipient(pool: sqlx::PgPool) {
    let repository = PostgresNotificationRepository::new(pool.clone());
    let recipient = seed_user(&pool, 1, Some("alice")).await;
    let other = seed_user(&pool, 2, Some("bob")).await;
    let created = repository
        .insert(make_notification(recipient.id, Some(other.id), "hello"))
        .await
        .unwrap();

    assert!(!repository.mark_read(created.id, other.id).await.unwrap());
    assert_eq!(repository.unread_count(recipient.id).await.unwrap(), 1);

    assert!(repository.mark_read(created.id, recipient.id).await.unwrap());
    assert_eq!(repository.unread_count(recipient.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_mark_all_read_reports_the_previously_unread_count(pool: sqlx::PgPool) {
    let repository = PostgresNotificationRepository::new(pool.clone());
    let recipient = seed_user(&pool, 1, Some("alice")).await;

    for n in 0..3 {
        repository
            .insert(make_notification(recipient.id, None, &format!("n{n}")))
            .await
            .unwrap();
    }
    let first = repository
        .insert(make_notification(recipient.id, None, "already read"))
        .await
        .unwrap();
    repository.mark_read(first.id, recipient.id).await.unwrap();

    let unread_before = repository.unread_count(recipient.id).await.unwrap();
    assert_eq!(unread_before, 3);

    let affected = repository.mark_all_read(recipient.id).await.unwrap();
    assert_eq!(affected as i64, unread_before);
    assert_eq!(repository.unread_count(recipient.id).await.unwrap(), 0);

    // A second sweep has nothing left to flip.
    assert_eq!(repository.mark_all_read(recipient.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_unread_only_listing_filters_and_counts_consistently(pool: sqlx::PgPool) {
    let repository = PostgresNotificationRepository::new(pool.clone());
    let recipient = seed_user(&pool, 1, Some("alice")).await;
    let bystander = seed_user(&pool, 2, Some("bob")).await;

    for n in 0..4 {
        repository
            .insert(make_notification(recipient.id, None, &format!("n{n}")))
            .await
            .unwrap();
    }
    repository
        .insert(make_notification(bystander.id, None, "not yours"))
        .await
        .unwrap();
    let (all, _) = repository
        .list_by_user(recipient.id, false, &Page::default())
        .await
        .unwrap();
    repository
        .mark_read(all[0].notification.id, recipient.id)
        .await
        .unwrap();

    let (unread, total) = repository
        .list_by_user(recipient.id, true, &Page::new(1, 2))
        .await
        .unwrap();
    assert_eq!(unread.len(), 2);
    assert_eq!(total, 3);
    assert!(unread.iter().all(|item| !item.notification.is_read));

    // Newest first.
    assert_eq!(unread[0].notification.title, "n2");
}
