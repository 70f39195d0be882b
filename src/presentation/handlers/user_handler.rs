use std::sync::Arc;

use crate::{
    domain::{
        models::{
            outcome::{PersistenceStage, RegistrationOutcome},
            registration::RegistrationRequest,
            user::Profile,
        },
        repositories::user_repository::UserRepository,
        services::password_service::PasswordHasher,
    },
    usecase::register_user_usecase::RegisterUserUsecase,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

// Request

/// json for register request
///
/// Absent fields decode as empty strings and are left to the validator.
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// age in years
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            username: request.username,
            password: request.password,
            dob: request.dob,
            profile: Profile {
                first_name: request.first_name,
                last_name: request.last_name,
                gender: request.gender,
            },
        }
    }
}

// Response

/// json body shared by every register response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

pub const MSG_SUCCESS: &str = "Successful registration";
pub const MSG_BAD_REQUEST: &str = "bad request";

/// Status and message for each outcome. The strings are part of the public contract.
pub fn outcome_response(outcome: RegistrationOutcome) -> (StatusCode, &'static str) {
    match outcome {
        RegistrationOutcome::Success => (StatusCode::OK, MSG_SUCCESS),
        RegistrationOutcome::InvalidEmail => {
            (StatusCode::BAD_REQUEST, "bad request: invalid email address")
        }
        RegistrationOutcome::InvalidDateOfBirth => {
            (StatusCode::BAD_REQUEST, "bad request: invalid date of birth")
        }
        RegistrationOutcome::PersistenceFailure(PersistenceStage::Lookup) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
        RegistrationOutcome::BothTaken => {
            (StatusCode::CONFLICT, "conflict: email and username already exist")
        }
        RegistrationOutcome::EmailTaken => (StatusCode::CONFLICT, "conflict: email already taken"),
        RegistrationOutcome::UsernameTaken => {
            (StatusCode::CONFLICT, "conflict: username already taken")
        }
        RegistrationOutcome::HashingFailure => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
        RegistrationOutcome::PersistenceFailure(PersistenceStage::Insert) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error: failed to register user",
        ),
    }
}

fn message(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            msg: msg.to_string(),
        }),
    )
        .into_response()
}

/* Router Function and Handler Function */

// User Router

/// function return Router object
/// Suppose to be nested by main router
pub fn create_user_router<
    R: UserRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_service: RegisterUserUsecase<R, P>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/register", post(register::<R, P>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<R: UserRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterUserUsecase<R, P>>,
}

// handler function

/// handler function for register
async fn register<
    R: UserRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<R, P>>,
    body: Bytes,
) -> Response {
    // the body is decoded whatever the Content-Type header says
    let payload: RegisterRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "malformed register payload");
            return message(StatusCode::BAD_REQUEST, MSG_BAD_REQUEST);
        }
    };

    let outcome = state.register_service.execute(payload.into()).await;
    let (status, msg) = outcome_response(outcome);
    message(status, msg)
}
