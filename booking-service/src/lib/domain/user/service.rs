use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain;
use crate::domain::activity::models::actions;
use crate::domain::activity::ports::ActivityRecorder;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Session;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, AR>
where
    UR: UserRepository,
    AR: ActivityRecorder,
{
    repository: Arc<UR>,
    activity: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, AR> UserService<UR, AR>
where
    UR: UserRepository,
    AR: ActivityRecorder,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `activity` - Audit side effect
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, activity: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            activity,
            authenticator,
        }
    }

    fn hash(&self, password: &str) -> Result<String, UserError> {
        Ok(self.authenticator.hash_password(password)?)
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn insert(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash: self.hash(command.password.expose())?,
            role_id: command.role_id,
            registered_at: domain::now(),
        };

        self.repository.create(user).await
    }
}

#[async_trait]
impl<UR, AR> UserServicePort for UserService<UR, AR>
where
    UR: UserRepository,
    AR: ActivityRecorder,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let user = self.insert(command).await?;

        self.activity
            .record(&user.id, actions::REGISTRATION, "User registered".to_string())
            .await;

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, UserError> {
        let email = EmailAddress::new(email).map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id, user.email.as_str())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => UserError::Password(err),
                AuthenticationError::JwtError(err) => UserError::Token(err),
            })?;

        self.activity
            .record(&user.id, actions::LOGIN, "User logged in".to_string())
            .await;

        Ok(Session {
            user,
            access_token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;

        if let Some(new_password) = command.new_password {
            let current = command.current_password.unwrap_or_default();
            if !self
                .authenticator
                .verify_password(&current, &user.password_hash)?
            {
                return Err(UserError::IncorrectCurrentPassword);
            }
            user.password_hash = self.hash(new_password.expose())?;
        }

        if let Some(name) = command.name {
            user.name = name;
        }

        let updated_user = self.repository.update(user).await?;

        self.activity
            .record(
                &updated_user.id,
                actions::PROFILE_UPDATE,
                "User updated their profile".to_string(),
            )
            .await;

        Ok(updated_user)
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.insert(command).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;

        if let Some(name) = command.name {
            user.name = name;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(password) = command.password {
            user.password_hash = self.hash(password.expose())?;
        }

        if let Some(role_id) = command.role_id {
            user.role_id = Some(role_id);
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }
}
