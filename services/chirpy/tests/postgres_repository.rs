//! Integration tests for the PostgreSQL repository
//!
//! These run against the database named by `DB_URL` after applying the
//! embedded migrations. They need a live database, so they are ignored by
//! default:
//!
//! ```text
//! DB_URL=postgres://... cargo test -p chirpy --test postgres_repository -- --ignored
//! ```

use chrono::{Duration, Utc};
use serial_test::serial;
use uuid::Uuid;

use chirpy::repositories::{ChirpyRepository, PgRepository, RepositoryError};
use common::database::{DatabaseConfig, init_pool, run_migrations};

type TestResult = Result<(), Box<dyn std::error::Error>>;

async fn repository() -> Result<PgRepository, Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool).await?;

    Ok(PgRepository::new(pool))
}

fn unique_email() -> String {
    format!("{}@chirpy.test", Uuid::new_v4())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_duplicate_email_is_rejected() -> TestResult {
    let repo = repository().await?;
    let email = unique_email();

    let user = repo.create_user(&email, "hash").await?;
    assert_eq!(user.email, email);
    assert!(!user.is_chirpy_red);

    let err = repo.create_user(&email, "other").await.unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateEmail));

    let other = repo.create_user(&unique_email(), "hash").await?;
    let err = repo
        .update_user_email_and_password(other.id, &email, "hash2")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateEmail));

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_update_and_lookup() -> TestResult {
    let repo = repository().await?;
    let old_email = unique_email();
    let new_email = unique_email();
    let user = repo.create_user(&old_email, "hash").await?;

    let updated = repo
        .update_user_email_and_password(user.id, &new_email, "hash2")
        .await?;
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.email, new_email);
    assert!(updated.updated_at >= user.updated_at);

    assert!(matches!(
        repo.get_user_by_email(&old_email).await,
        Err(RepositoryError::NotFound)
    ));
    assert_eq!(
        repo.get_user_by_email(&new_email).await?.hashed_password,
        "hash2"
    );

    assert!(matches!(
        repo.update_user_email_and_password(Uuid::new_v4(), &unique_email(), "hash")
            .await,
        Err(RepositoryError::NotFound)
    ));

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_upgrade_user() -> TestResult {
    let repo = repository().await?;
    let email = unique_email();
    let user = repo.create_user(&email, "hash").await?;

    repo.upgrade_user_to_paid(user.id).await?;
    assert!(repo.get_user_by_email(&email).await?.is_chirpy_red);

    assert!(matches!(
        repo.upgrade_user_to_paid(Uuid::new_v4()).await,
        Err(RepositoryError::NotFound)
    ));

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_refresh_token_lifecycle() -> TestResult {
    let repo = repository().await?;
    let user = repo.create_user(&unique_email(), "hash").await?;
    let live = Uuid::new_v4().simple().to_string();
    let stale = Uuid::new_v4().simple().to_string();

    let token = repo
        .create_refresh_token(&live, user.id, Utc::now() + Duration::days(60))
        .await?;
    assert_eq!(token.user_id, user.id);
    assert!(token.revoked_at.is_none());
    repo.create_refresh_token(&stale, user.id, Utc::now() - Duration::seconds(1))
        .await?;

    assert_eq!(repo.get_user_from_refresh_token(&live).await?.id, user.id);
    assert!(matches!(
        repo.get_user_from_refresh_token(&stale).await,
        Err(RepositoryError::ExpiredToken)
    ));
    assert!(matches!(
        repo.get_user_from_refresh_token("never-issued").await,
        Err(RepositoryError::UnknownToken)
    ));

    repo.revoke_token(&live).await?;
    assert!(matches!(
        repo.get_user_from_refresh_token(&live).await,
        Err(RepositoryError::RevokedToken)
    ));
    assert!(matches!(
        repo.revoke_token("never-issued").await,
        Err(RepositoryError::UnknownToken)
    ));

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_chirp_crud() -> TestResult {
    let repo = repository().await?;
    let user = repo.create_user(&unique_email(), "hash").await?;

    assert!(repo.create_chirp("orphan", Uuid::new_v4()).await.is_err());

    let first = repo.create_chirp("one", user.id).await?;
    let second = repo.create_chirp("two", user.id).await?;
    assert_eq!(first.user_id, user.id);

    let mine: Vec<_> = repo
        .get_chirps()
        .await?
        .into_iter()
        .filter(|c| c.user_id == user.id)
        .collect();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].created_at <= mine[1].created_at);

    let fetched = repo.get_chirp_by_id(second.id).await?;
    assert_eq!(fetched.body, "two");

    repo.delete_chirp_by_id(first.id).await?;
    assert!(matches!(
        repo.get_chirp_by_id(first.id).await,
        Err(RepositoryError::NotFound)
    ));

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_reset_cascades() -> TestResult {
    let repo = repository().await?;
    let email = unique_email();
    let user = repo.create_user(&email, "hash").await?;
    let chirp = repo.create_chirp("hello", user.id).await?;
    let token = Uuid::new_v4().simple().to_string();
    repo.create_refresh_token(&token, user.id, Utc::now() + Duration::days(1))
        .await?;

    repo.reset_users().await?;

    assert!(repo.get_chirps().await?.is_empty());
    assert!(matches!(
        repo.get_user_by_email(&email).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.get_chirp_by_id(chirp.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.get_user_from_refresh_token(&token).await,
        Err(RepositoryError::UnknownToken)
    ));

    Ok(())
}
