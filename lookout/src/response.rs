use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use primitives::lookout::{ApiResponse, MessageResponse};

#[derive(Debug, PartialEq, Eq)]
pub enum ResponseError {
    NotFound,
    BadRequest(String),
    NotAcceptable(String),
    Unauthorized,
    /// Carries the cause for server-side logging, the client only sees
    /// a generic message.
    Internal(String),
}

/// The cause of a 500 response, attached to the response extensions so
/// the outermost middleware can log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalCause(pub String);

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        match self {
            ResponseError::NotFound => {
                (StatusCode::NOT_FOUND, "Not found".to_string()).into_response()
            }
            ResponseError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(MessageResponse { message })).into_response()
            }
            ResponseError::NotAcceptable(message) => {
                (StatusCode::NOT_ACCEPTABLE, Json(MessageResponse { message })).into_response()
            }
            ResponseError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            ResponseError::Internal(cause) => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse {
                        message: "internal error".to_string(),
                    }),
                )
                    .into_response();
                response.extensions_mut().insert(InternalCause(cause));

                response
            }
        }
    }
}

impl From<mongodb::error::Error> for ResponseError {
    fn from(error: mongodb::error::Error) -> Self {
        ResponseError::Internal(error.to_string())
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(error: serde_json::Error) -> Self {
        ResponseError::BadRequest(error.to_string())
    }
}

impl From<adapter::Error> for ResponseError {
    fn from(error: adapter::Error) -> Self {
        match error {
            adapter::Error::Authentication(_) => ResponseError::Unauthorized,
            adapter::Error::Database(error) => ResponseError::Internal(error.to_string()),
        }
    }
}

/// `200 OK` with the `{"response": [..]}` envelope, or `204 No Content`
/// when there is nothing to return.
pub fn list_response<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(ApiResponse::new(items)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            StatusCode::NOT_FOUND,
            ResponseError::NotFound.into_response().status()
        );
        assert_eq!(
            StatusCode::BAD_REQUEST,
            ResponseError::BadRequest("missing field".to_string())
                .into_response()
                .status()
        );
        assert_eq!(
            StatusCode::NOT_ACCEPTABLE,
            ResponseError::NotAcceptable("no sensor found".to_string())
                .into_response()
                .status()
        );
        assert_eq!(
            StatusCode::UNAUTHORIZED,
            ResponseError::Unauthorized.into_response().status()
        );
    }

    #[tokio::test]
    async fn internal_error_hides_the_cause() {
        let response =
            ResponseError::Internal("db connection refused".to_string()).into_response();

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        assert_eq!(
            Some(&InternalCause("db connection refused".to_string())),
            response.extensions().get::<InternalCause>()
        );

        let body = hyper::body::to_bytes(response.into_body())
            .await
            .expect("Should read the response body");
        assert_eq!(
            r#"{"message":"internal error"}"#,
            std::str::from_utf8(&body).expect("Should be valid utf-8")
        );
    }

    #[test]
    fn empty_list_is_no_content() {
        let empty: Vec<String> = vec![];
        assert_eq!(StatusCode::NO_CONTENT, list_response(empty).status());
        assert_eq!(
            StatusCode::OK,
            list_response(vec!["item".to_string()]).status()
        );
    }
}
