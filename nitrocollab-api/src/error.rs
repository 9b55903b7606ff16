/// Error handling for the API server
///
/// This module provides a unified error type for resolver failures. Every
/// error surfaces to the caller as a GraphQL error carrying a
/// machine-readable `code` extension; no error is retried and none is fatal
/// to the process; each request fails independently.
///
/// # Codes
///
/// | Variant              | `code`                |
/// |----------------------|-----------------------|
/// | `Unauthenticated`    | `UNAUTHENTICATED`     |
/// | `Forbidden`          | `FORBIDDEN`           |
/// | `AlreadyExists`      | `ALREADY_EXISTS`      |
/// | `InvalidCredentials` | `INVALID_CREDENTIALS` |
/// | `NotFound`           | `NOT_FOUND`           |
/// | `Internal`           | `INTERNAL`            |
use async_graphql::ErrorExtensions;
use nitrocollab_shared::auth::jwt::JwtError;
use nitrocollab_shared::auth::password::PasswordError;
use nitrocollab_shared::store::StoreError;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A protected operation was attempted without a resolved identity
    #[error("Not authenticated")]
    Unauthenticated,

    /// The acting user is not a member of the affected task list
    #[error("Not authorized to access this task list")]
    Forbidden,

    /// Sign-up with an email that is already registered
    #[error("An account with this email already exists")]
    AlreadyExists,

    /// Sign-in failed; deliberately silent on whether the email or the
    /// password was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Store or crypto failure; details are logged, not exposed
    #[error("An internal error occurred")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable error code for the GraphQL `code` extension
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::AlreadyExists => "ALREADY_EXISTS",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        if let ApiError::Internal(detail) = self {
            // Log the detail but keep the client-facing message generic
            tracing::error!("Internal error: {}", detail);
        }

        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(format!("Store error: {}", err))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        // Invalid inbound tokens never reach this path (the identity
        // resolver degrades them to anonymous); this covers signing failures
        ApiError::Internal(format!("Token operation failed: {}", err))
    }
}

/// Maps a shared-library error into an extended GraphQL error
///
/// Resolvers use this with `map_err` so every failure carries its `code`
/// extension:
///
/// ```ignore
/// let user = User::find_by_email(store, &email).await.map_err(to_graphql)?;
/// ```
pub fn to_graphql<E: Into<ApiError>>(err: E) -> async_graphql::Error {
    err.into().extend()
}
