use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{require_non_blank, LoginRequest, RegisterRequest},
            response::{AuthResponse, UserDto},
        },
    },
    repositories::UserRepository,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;
        require_non_blank("name", &request.name)?;

        let email = normalize_email(&request.email);
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(request.password).await?;
        let user = self
            .repository
            .create(User::new(request.name.trim(), &email, &password_hash))
            .await?;

        log::info!("Registered user {}", user.id);

        let token = self.jwt_service.create_token(&user)?;
        Ok(AuthResponse {
            message: "User created successfully".to_string(),
            user: user.into(),
            token,
        })
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(request.password, user.password_hash.clone()).await? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.jwt_service.create_token(&user)?;
        Ok(AuthResponse {
            message: "Login successful".to_string(),
            user: user.into(),
            token,
        })
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }

    pub async fn profile(&self, user_id: &str) -> AppResult<UserDto> {
        Ok(self.get_user(user_id).await?.into())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
