mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use round_store::dto::JoinOutcome;
use round_store::entities::RoundStatus;
use round_store::error::ErrorKind;
use round_store::utils::{OsSecretSource, SecretSource};

use common::{entries, insert_round, insert_round_size, insert_user, test_repo};

/// Entropy that runs dry after a fixed number of fills.
#[derive(Debug)]
struct ExhaustedAfter {
    remaining: AtomicUsize,
}

impl ExhaustedAfter {
    fn new(fills: usize) -> Arc<Self> {
        Arc::new(Self {
            remaining: AtomicUsize::new(fills),
        })
    }
}

impl SecretSource for ExhaustedAfter {
    fn fill(&self, buf: &mut [u8]) -> Result<(), rand::Error> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left == 0 {
            return Err(rand::Error::new(std::io::Error::other("entropy exhausted")));
        }
        self.remaining.store(left - 1, Ordering::SeqCst);
        OsSecretSource.fill(buf)
    }
}

#[tokio::test]
async fn join_twice_is_idempotent() {
    let repo = test_repo().await;
    let db = repo.db();
    let size = insert_round_size(db, 2, 8).await;
    let round = insert_round(db, "lobby", size, RoundStatus::Open, false).await;
    let user = insert_user(db, "alice").await;

    let first = repo.join_round(user, round).await;
    assert!(matches!(first, Ok(JoinOutcome::Joined)));
    assert_eq!(entries(db).await.len(), 1);

    let second = repo.join_round(user, round).await;
    assert!(matches!(second, Ok(JoinOutcome::AlreadyJoined)));
    assert!(second.is_ok_and(JoinOutcome::already_joined));
    assert_eq!(entries(db).await.len(), 1);
}

#[tokio::test]
async fn repeat_join_keeps_original_secrets() {
    let repo = test_repo().await;
    let db = repo.db();
    let size = insert_round_size(db, 2, 8).await;
    let round = insert_round(db, "lobby", size, RoundStatus::Open, false).await;
    let user = insert_user(db, "alice").await;

    assert!(repo.join_round(user, round).await.is_ok());
    let before = entries(db).await;
    assert!(repo.join_round(user, round).await.is_ok());
    let after = entries(db).await;

    assert_eq!(before, after);
}

#[tokio::test]
async fn same_user_can_join_different_rounds() {
    let repo = test_repo().await;
    let db = repo.db();
    let size = insert_round_size(db, 2, 8).await;
    let first = insert_round(db, "first", size, RoundStatus::Open, false).await;
    let second = insert_round(db, "second", size, RoundStatus::Open, false).await;
    let user = insert_user(db, "alice").await;

    assert!(matches!(repo.join_round(user, first).await, Ok(JoinOutcome::Joined)));
    assert!(matches!(repo.join_round(user, second).await, Ok(JoinOutcome::Joined)));
    assert_eq!(entries(db).await.len(), 2);
}

#[tokio::test]
async fn join_issues_non_empty_distinct_secrets() {
    let repo = test_repo().await;
    let db = repo.db();
    let size = insert_round_size(db, 2, 8).await;
    let round = insert_round(db, "lobby", size, RoundStatus::Open, false).await;

    for name in ["alice", "bob", "carol", "dave"] {
        let user = insert_user(db, name).await;
        assert!(repo.join_round(user, round).await.is_ok());
    }

    let rows = entries(db).await;
    assert_eq!(rows.len(), 4);

    let mut tokens = HashSet::new();
    let mut keys = HashSet::new();
    for row in &rows {
        assert_eq!(row.round_id, round);
        assert_eq!(row.auth_token.len(), 24);
        assert_eq!(row.round_ticket.len(), 22);
        assert_eq!(row.watch_token.len(), 16);
        assert_eq!(row.aes_key.len(), 32);
        assert!(tokens.insert(row.auth_token.clone()));
        assert!(tokens.insert(row.round_ticket.clone()));
        assert!(tokens.insert(row.watch_token.clone()));
        assert!(keys.insert(row.aes_key.clone()));
    }
}

#[tokio::test]
async fn secret_failure_aborts_join_without_writing() {
    let base = test_repo().await;
    let db = base.db().clone();
    let size = insert_round_size(&db, 2, 8).await;
    let round = insert_round(&db, "lobby", size, RoundStatus::Open, false).await;
    let user = insert_user(&db, "alice").await;

    // auth token and round ticket succeed, watch token fails
    let repo = base.with_secret_source(ExhaustedAfter::new(2));
    let result = repo.join_round(user, round).await;

    let err = result.err();
    assert!(err.as_ref().is_some_and(|e| e.kind() == ErrorKind::Secret));
    assert!(err.is_some_and(|e| e.to_string().contains("watchtoken")));
    assert!(entries(&db).await.is_empty());
}

#[tokio::test]
async fn existing_member_rejoins_without_entropy() {
    let base = test_repo().await;
    let db = base.db().clone();
    let size = insert_round_size(&db, 2, 8).await;
    let round = insert_round(&db, "lobby", size, RoundStatus::Open, false).await;
    let user = insert_user(&db, "alice").await;

    assert!(matches!(base.join_round(user, round).await, Ok(JoinOutcome::Joined)));
    let before = entries(&db).await;

    let repo = base.with_secret_source(ExhaustedAfter::new(0));
    let again = repo.join_round(user, round).await;

    assert!(matches!(again, Ok(JoinOutcome::AlreadyJoined)));
    assert_eq!(entries(&db).await, before);
}

#[tokio::test]
async fn key_failure_is_reported_as_aeskey() {
    let base = test_repo().await;
    let db = base.db().clone();
    let size = insert_round_size(&db, 2, 8).await;
    let round = insert_round(&db, "lobby", size, RoundStatus::Open, false).await;
    let user = insert_user(&db, "alice").await;

    let repo = base.with_secret_source(ExhaustedAfter::new(3));
    let err = repo.join_round(user, round).await.err();

    assert!(err.is_some_and(|e| e.to_string().contains("aeskey")));
    assert!(entries(&db).await.is_empty());
}

#[tokio::test]
async fn concurrent_joins_leave_one_membership() {
    let repo = test_repo().await;
    let db = repo.db();
    let size = insert_round_size(db, 2, 8).await;
    let round = insert_round(db, "lobby", size, RoundStatus::Open, false).await;
    let user = insert_user(db, "alice").await;

    let outcomes =
        futures_util::future::join_all((0..8).map(|_| repo.join_round(user, round))).await;

    let joined = outcomes
        .iter()
        .filter(|o| matches!(o, Ok(JoinOutcome::Joined)))
        .count();
    let already = outcomes
        .iter()
        .filter(|o| matches!(o, Ok(JoinOutcome::AlreadyJoined)))
        .count();

    assert_eq!(joined, 1);
    assert_eq!(already, 7);
    assert_eq!(entries(db).await.len(), 1);
}
