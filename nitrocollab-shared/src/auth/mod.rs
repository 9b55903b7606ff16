/// Authentication primitives for NitroCollab
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: bearer token generation and validation
/// - [`identity`]: bearer token → acting user resolution
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Bearer Tokens**: HS256-signed JWTs with a 7-day validity window
/// - **Constant-time Comparison**: password verification never leaks through
///   timing
///
/// # Example
///
/// ```no_run
/// use nitrocollab_shared::auth::jwt::{create_token, Claims};
/// use nitrocollab_shared::auth::password::{hash_password, verify_password};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = create_token(&Claims::new(Uuid::new_v4()), "secret-key")?;
/// # Ok(())
/// # }
/// ```
pub mod identity;
pub mod jwt;
pub mod password;
