/// Persisted documents for NitroCollab
///
/// This module contains the three document models and their CRUD operations,
/// expressed over the [`DocumentStore`](crate::store::DocumentStore)
/// repository interface.
///
/// # Models
///
/// - `user`: accounts with hashed credentials
/// - `task_list`: shared lists with an ordered member set
/// - `todo`: items belonging to one task list
///
/// # Example
///
/// ```no_run
/// use nitrocollab_shared::models::user::{CreateUser, User};
/// use nitrocollab_shared::store::MongoStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MongoStore::connect("mongodb://localhost:27017", "nitrocollab").await?;
///
/// let user = User::create(
///     &store,
///     CreateUser {
///         name: "Ada".to_string(),
///         email: "ada@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         avatar: None,
///     },
/// )
/// .await?;
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```
pub mod task_list;
pub mod todo;
pub mod user;
