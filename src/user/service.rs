use std::sync::Arc;

use crate::email::{self, EmailStatus};
use crate::error::{Result, ServerError};
use crate::matcher;
use crate::user::{NewUser, User, UserPatch, UserRepository};

/// User manager.
#[derive(Clone)]
pub struct UserService {
    pub repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new [`UserService`].
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Create a user with a valid and unused email.
    pub async fn create(&self, user: NewUser) -> Result<User> {
        if !email::is_valid(&user.email) {
            return Err(ServerError::InvalidEmail);
        }

        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(ServerError::EmailTaken);
        }

        let user = self.repo.insert(&user).await?;
        metrics::counter!("users_created_total").increment(1);
        tracing::info!(user_id = user.id, "user created");

        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.repo.find_by_id(id).await?.ok_or(ServerError::NotFound)
    }

    pub async fn list(&self, skip: u32, limit: u32) -> Result<Vec<User>> {
        self.repo.list(skip.into(), limit.into()).await
    }

    /// Apply a partial update.
    ///
    /// Both `name` and `email` must be supplied even though every field is
    /// optional. The email is neither re-validated nor checked for
    /// uniqueness.
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User> {
        let mut user = self.get(id).await?;

        if patch.name.is_none() || patch.email.is_none() {
            return Err(ServerError::MissingFields);
        }

        patch.apply(&mut user);
        let user = self.repo.update(&user).await?.ok_or(ServerError::NotFound)?;
        tracing::info!(user_id = user.id, "user updated");

        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(ServerError::NotFound);
        }

        metrics::counter!("users_deleted_total").increment(1);
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Ids of the users matching user `id`.
    pub async fn matches(&self, id: i64) -> Result<Vec<i64>> {
        let target = self.get(id).await?;
        let population = self.repo.all().await?;

        let ids = matcher::matches(&target, &population);
        metrics::histogram!("user_matches").record(ids.len() as f64);
        tracing::debug!(user_id = id, count = ids.len(), "matches computed");

        Ok(ids)
    }

    /// Scan every stored email.
    pub async fn check_emails(&self) -> Result<EmailStatus> {
        let users = self.repo.all().await?;
        Ok(email::check_all(&users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;
    use crate::user::{Interests, SqliteUserRepository};

    async fn service() -> UserService {
        let pool = database::sqlite(database::IN_MEMORY_SQLITE)
            .await
            .unwrap();
        UserService::new(Arc::new(SqliteUserRepository::new(pool)))
    }

    fn new_user(email: &str, gender: &str, interests: &str) -> NewUser {
        NewUser {
            name: "Alex".into(),
            age: 30,
            gender: gender.into(),
            email: email.into(),
            city: "Lyon".into(),
            interests: Interests::parse(interests),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service().await;

        let user = service
            .create(new_user("alex@example.com", "M", "chess"))
            .await
            .unwrap();
        assert!(user.id > 0);
        assert_eq!(service.get(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let service = service().await;

        let err = service
            .create(new_user("not-an-email", "M", "chess"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidEmail));
        assert!(service.list(0, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let service = service().await;
        service
            .create(new_user("alex@example.com", "M", "chess"))
            .await
            .unwrap();

        let err = service
            .create(new_user("alex@example.com", "F", "go"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::EmailTaken));
    }

    #[tokio::test]
    async fn test_update_requires_name_and_email() {
        let service = service().await;
        let user = service
            .create(new_user("alex@example.com", "M", "chess"))
            .await
            .unwrap();

        // Only `city` supplied: rejected although every field is optional.
        let err = service
            .update(
                user.id,
                UserPatch {
                    city: Some("Nice".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::MissingFields));
        assert_eq!(service.get(user.id).await.unwrap().city, "Lyon");
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let service = service().await;

        let err = service.update(42, UserPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServerError::NotFound));
    }

    #[tokio::test]
    async fn test_update_may_duplicate_email() {
        let service = service().await;
        service
            .create(new_user("alex@example.com", "M", "chess"))
            .await
            .unwrap();
        let other = service
            .create(new_user("sam@example.com", "F", "chess"))
            .await
            .unwrap();

        let updated = service
            .update(
                other.id,
                UserPatch {
                    name: Some("Sam".into()),
                    email: Some("alex@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "alex@example.com");
        assert_eq!(updated.gender, "F");
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service().await;
        let user = service
            .create(new_user("alex@example.com", "M", "chess"))
            .await
            .unwrap();

        service.delete(user.id).await.unwrap();
        assert!(matches!(
            service.get(user.id).await.unwrap_err(),
            ServerError::NotFound
        ));
        assert!(matches!(
            service.delete(user.id).await.unwrap_err(),
            ServerError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_matches() {
        let service = service().await;
        let a = service
            .create(new_user("a@example.com", "F", "hiking,reading"))
            .await
            .unwrap();
        let b = service
            .create(new_user("b@example.com", "M", "reading,chess"))
            .await
            .unwrap();
        let c = service
            .create(new_user("c@example.com", "F", "reading"))
            .await
            .unwrap();

        assert_eq!(service.matches(a.id).await.unwrap(), vec![b.id]);
        assert_eq!(service.matches(b.id).await.unwrap(), vec![a.id, c.id]);
        assert!(matches!(
            service.matches(999).await.unwrap_err(),
            ServerError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_check_emails_sees_updated_addresses() {
        let service = service().await;
        let user = service
            .create(new_user("alex@example.com", "M", "chess"))
            .await
            .unwrap();
        assert_eq!(service.check_emails().await.unwrap(), EmailStatus::AllValid);

        service
            .update(
                user.id,
                UserPatch {
                    name: Some("Alex".into()),
                    email: Some("broken".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            service.check_emails().await.unwrap(),
            EmailStatus::SomeInvalid
        );
    }
}
