use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{IdentityProfile, User},
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a verified identity assertion to a local user record,
    /// creating one on first sign-in. Any store failure propagates so the
    /// sign-in fails closed; no partial record is left behind.
    pub async fn sign_in(&self, profile: IdentityProfile) -> AppResult<User> {
        if let Some(existing) = self.repository.find_by_email(&profile.email).await? {
            log::info!("Existing user signed in: {}", existing.email);
            return Ok(existing);
        }

        let email = profile.email.clone();
        let user = User::from_identity(profile);

        match self.repository.insert(user).await {
            Ok(created) => {
                log::info!("Created user on first sign-in: {}", created.email);
                Ok(created)
            }
            // Two first sign-ins raced on the unique email index; adopt the
            // record the winner inserted.
            Err(AppError::AlreadyExists(_)) => self
                .repository
                .find_by_email(&email)
                .await?
                .ok_or_else(|| {
                    AppError::DatabaseError(format!(
                        "User with email '{}' vanished after duplicate insert",
                        email
                    ))
                }),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::UserRole;
    use crate::repositories::MockUserRepository;

    fn profile(email: &str, name: Option<&str>) -> IdentityProfile {
        IdentityProfile {
            email: email.to_string(),
            name: name.map(|n| n.to_string()),
            picture: None,
        }
    }

    #[tokio::test]
    async fn test_sign_in_reuses_existing_user() {
        let existing = User::test_user("jane@example.com");
        let existing_id = existing.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "jane@example.com")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        // No insert expectation: a second record would panic the mock.

        let service = UserService::new(Arc::new(repo));
        let user = service
            .sign_in(profile("jane@example.com", Some("Jane")))
            .await
            .expect("sign-in should succeed");

        assert_eq!(user.id, existing_id);
    }

    #[tokio::test]
    async fn test_first_sign_in_creates_admin_with_defaulted_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|user| {
                user.email == "newbie@example.com"
                    && user.name == "newbie"
                    && user.role == UserRole::Admin
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .sign_in(profile("newbie@example.com", None))
            .await
            .expect("sign-in should succeed");

        assert_eq!(user.role, UserRole::Admin);
        assert!(user.id.is_some());
    }

    #[tokio::test]
    async fn test_sign_in_fails_closed_on_store_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repo));
        let result = service.sign_in(profile("down@example.com", None)).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_concurrent_first_sign_in_adopts_winner() {
        let winner = User::test_user("race@example.com");
        let winner_id = winner.id;

        let mut seq = mockall::Sequence::new();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::AlreadyExists("email taken".to_string())));
        repo.expect_find_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(winner.clone())));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .sign_in(profile("race@example.com", None))
            .await
            .expect("sign-in should adopt the winning record");

        assert_eq!(user.id, winner_id);
    }
}
