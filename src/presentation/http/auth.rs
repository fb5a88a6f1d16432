use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterError, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Documented body shape. The handler reads the raw JSON itself so that
/// missing or non-string fields reach validation instead of being rejected
/// by the extractor.
#[derive(Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        let status = match &self {
            RegisterError::MissingField
            | RegisterError::InvalidFormat
            | RegisterError::PolicyViolation => StatusCode::BAD_REQUEST,
            RegisterError::Conflict => StatusCode::CONFLICT,
            RegisterError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Display never includes the internal cause.
        let body = MessageResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, responses(
    (status = 201, description = "Account created", body = MessageResponse),
    (status = 400, description = "Missing field, malformed email or short password", body = MessageResponse),
    (status = 409, description = "Email already registered", body = MessageResponse),
    (status = 500, description = "Unexpected failure", body = MessageResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), RegisterError> {
    let dto = match parse_body(&body) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::error!(error = ?e, "register_body_unreadable");
            return Err(RegisterError::Internal(e));
        }
    };
    let repo = ctx.user_repo();
    let hasher = ctx.password_hasher();
    let uc = RegisterUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
    };
    match uc.execute(&dto).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user_registered");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "User registered successfully".into(),
                }),
            ))
        }
        Err(RegisterError::Internal(e)) => {
            tracing::error!(error = ?e, "register_failed");
            Err(RegisterError::Internal(e))
        }
        Err(e) => {
            tracing::debug!(reason = %e, "register_rejected");
            Err(e)
        }
    }
}

/// Parses the body as JSON whatever the Content-Type says. A `null` body has
/// no fields to read and is an error; any other non-object yields no fields.
fn parse_body(body: &[u8]) -> anyhow::Result<RegisterDto> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Null => anyhow::bail!("request body is null"),
        Value::Object(mut fields) => Ok(RegisterDto {
            email: fields.remove("email").unwrap_or(Value::Null),
            password: fields.remove("password").unwrap_or(Value::Null),
        }),
        _ => Ok(RegisterDto::default()),
    }
}
