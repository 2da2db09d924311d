//! Port between the user service and the database.

use async_trait::async_trait;
use sqlx::FromRow;

use crate::error::Result;
use crate::user::{Interests, User};

/// User persistence.
///
/// Every call acquires a pooled connection for its own duration only.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a user and return it with its assigned `id`.
    ///
    /// Fails with [`crate::ServerError::EmailTaken`] if the schema carries a
    /// unique constraint on `email` and it is violated.
    async fn insert(&self, user: &crate::user::NewUser) -> Result<User>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Page of users ordered by `id`.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>>;
    /// Whole population.
    async fn all(&self) -> Result<Vec<User>>;
    /// Overwrite every mutable field of the user identified by `user.id`.
    async fn update(&self, user: &User) -> Result<Option<User>>;
    /// Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct UserRecord {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            age: record.age,
            gender: record.gender,
            email: record.email,
            city: record.city,
            interests: Interests::parse(&record.interests),
        }
    }
}

pub(crate) const COLUMNS: &str = "id, name, age, gender, email, city, interests";

/// Map a failed insert, turning unique violations into a conflict.
pub(crate) fn insert_error(err: sqlx::Error) -> crate::ServerError {
    if crate::ServerError::is_unique_violation(&err) {
        crate::ServerError::EmailTaken
    } else {
        err.into()
    }
}
