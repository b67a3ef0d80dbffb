use std::sync::Arc;

use axum::{http::Request, middleware::Next, response::Response};
use slog::error;

use adapter::Authenticator;

use crate::{response::InternalCause, Application};

/// Logs the cause of every 500 response server-side.
///
/// [`ResponseError::Internal`](crate::response::ResponseError) keeps
/// the client body generic and attaches the cause to the response
/// extensions, which this middleware picks up.
pub async fn log_internal_errors<A: Authenticator + 'static, B>(
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let logger = request
        .extensions()
        .get::<Arc<Application<A>>>()
        .expect("Application should always be present")
        .logger
        .clone();

    let response = next.run(request).await;

    if let Some(InternalCause(cause)) = response.extensions().get::<InternalCause>() {
        error!(&logger, "Internal server error"; "cause" => cause);
    }

    response
}

#[cfg(test)]
mod test {
    use axum::{
        body::Body,
        http::StatusCode,
        middleware::from_fn,
        routing::get,
        Router,
    };
    use tower::Service;

    use adapter::Dummy;

    use crate::{
        response::ResponseError,
        test_util::{body_to_string, setup_dummy_app},
    };

    use super::*;

    #[tokio::test]
    async fn client_gets_the_generic_body() {
        let app = Arc::new(setup_dummy_app());

        async fn handle() -> Result<String, ResponseError> {
            Err(ResponseError::Internal("connection reset".to_string()))
        }

        let mut router = Router::new()
            .route("/", get(handle))
            .layer(from_fn(log_internal_errors::<Dummy, _>));

        let request = Request::builder()
            .extension(app.clone())
            .body(Body::empty())
            .expect("should never fail!");

        let response = router
            .call(request)
            .await
            .expect("Handling the Request shouldn't have failed");

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        assert_eq!(
            r#"{"message":"internal error"}"#,
            body_to_string(response).await
        );
    }
}
