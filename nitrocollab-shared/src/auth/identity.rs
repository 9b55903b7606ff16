/// Identity resolution for incoming requests
///
/// Turns an optional bearer token into the acting user for a request.
/// Anonymity is a normal outcome here, never an error: a missing header, a
/// malformed or expired token, and a token whose user has since been deleted
/// all resolve to `None`. Whether anonymity is acceptable is decided later,
/// by the access gate in front of each operation.
use tracing::debug;

use crate::models::user::User;
use crate::store::{DocumentStore, StoreError};

use super::jwt;

/// Resolves the acting user from a bearer token
///
/// # Arguments
///
/// * `token` - Raw token value (without the `Bearer ` prefix), if a header
///   was supplied
/// * `secret` - Process-wide signing secret
/// * `store` - User store to look the decoded id up in
///
/// # Returns
///
/// The resolved user, or `None` for an anonymous request.
///
/// # Errors
///
/// Only store failures propagate; every token defect degrades to anonymous.
pub async fn resolve_user(
    token: Option<&str>,
    secret: &str,
    store: &dyn DocumentStore,
) -> Result<Option<User>, StoreError> {
    let Some(token) = token else {
        return Ok(None);
    };

    let claims = match jwt::validate_token(token, secret) {
        Ok(claims) => claims,
        Err(err) => {
            debug!(error = %err, "Rejected bearer token, treating request as anonymous");
            return Ok(None);
        }
    };

    // A valid token for a vanished user is a stale credential, not an error
    User::find_by_id(store, claims.sub).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::CreateUser;
    use crate::store::MemoryStore;
    use chrono::Duration;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    async fn seeded_store() -> (MemoryStore, User) {
        let store = MemoryStore::new();
        let user = User::create(
            &store,
            CreateUser {
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                avatar: None,
            },
        )
        .await
        .unwrap();

        (store, user)
    }

    #[tokio::test]
    async fn test_no_token_is_anonymous() {
        let (store, _) = seeded_store().await;

        let resolved = resolve_user(None, SECRET, &store).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let (store, user) = seeded_store().await;
        let token = jwt::create_token(&jwt::Claims::new(user.id), SECRET).unwrap();

        let resolved = resolve_user(Some(&token), SECRET, &store).await.unwrap();
        assert_eq!(resolved.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_malformed_token_is_anonymous() {
        let (store, _) = seeded_store().await;

        let resolved = resolve_user(Some("garbage"), SECRET, &store).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_is_anonymous() {
        let (store, user) = seeded_store().await;
        let claims = jwt::Claims::with_expiration(user.id, Duration::seconds(-3600));
        let token = jwt::create_token(&claims, SECRET).unwrap();

        let resolved = resolve_user(Some(&token), SECRET, &store).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_wrong_secret_is_anonymous() {
        let (store, user) = seeded_store().await;
        let token = jwt::create_token(&jwt::Claims::new(user.id), "another-secret").unwrap();

        let resolved = resolve_user(Some(&token), SECRET, &store).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_stale_token_for_deleted_user_is_anonymous() {
        let (store, _) = seeded_store().await;
        let token = jwt::create_token(&jwt::Claims::new(Uuid::new_v4()), SECRET).unwrap();

        let resolved = resolve_user(Some(&token), SECRET, &store).await.unwrap();
        assert!(resolved.is_none());
    }
}
