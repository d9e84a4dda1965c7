use auth::AuthenticationError;
use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

pub async fn login<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let (email, password) = body.try_into_parts()?;

    // An unknown email is 404; a wrong password below is 422.
    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(ApiError::from)?;

    let mut claims = Claims::for_subject(user.id);
    if let Some(hours) = state.token_expiry_hours {
        claims = claims.with_expiry_in_hours(hours);
    }

    let result = state
        .authenticator
        .authenticate(&password, &user.password_hash, &claims)
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                ApiError::UnprocessableEntity("invalid password".to_string())
            }
            AuthenticationError::Password(err) => {
                ApiError::InternalServerError(format!("password verification failed: {}", err))
            }
            AuthenticationError::Jwt(err) => {
                ApiError::InternalServerError(format!("token generation failed: {}", err))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            msg: "user authenticated successfully".to_string(),
            token: result.access_token,
        },
    ))
}

/// HTTP request body for login (raw JSON).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error("the password is required")]
    MissingPassword,
}

impl LoginRequest {
    fn try_into_parts(self) -> Result<(EmailAddress, String), ParseLoginRequestError> {
        let email = EmailAddress::new(self.email)?;
        if self.password.is_empty() {
            return Err(ParseLoginRequestError::MissingPassword);
        }
        Ok((email, self.password))
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub msg: String,
    pub token: String,
}
