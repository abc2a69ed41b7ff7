use crate::account::FormError;
use crate::source::SourceError;
use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        let status = match &err {
            // The customer API's client errors describe the caller's request.
            SourceError::Status { status, .. } if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            SourceError::Http(_) | SourceError::Status { .. } => StatusCode::BAD_GATEWAY,
            SourceError::NotFound(_) => StatusCode::NOT_FOUND,
            SourceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            SourceError::Io(_) | SourceError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status: u16) -> StatusCode {
        AppError::from(SourceError::Status {
            status,
            body: String::new(),
        })
        .status
    }

    #[test]
    fn upstream_client_errors_pass_through() {
        assert_eq!(upstream(400), StatusCode::BAD_REQUEST);
        assert_eq!(upstream(409), StatusCode::CONFLICT);
        assert_eq!(upstream(422), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn upstream_server_errors_are_bad_gateway() {
        assert_eq!(upstream(500), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream(503), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream(302), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn rejected_credentials_are_unauthorized() {
        let err = AppError::from(SourceError::InvalidCredentials);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "email or password is incorrect");
    }

    #[test]
    fn form_errors_are_bad_requests() {
        let err = AppError::from(FormError::InvalidEmail);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
