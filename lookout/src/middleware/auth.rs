use std::sync::Arc;

use axum::{
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
};

use adapter::Authenticator;

use crate::{response::ResponseError, Application, Auth};

/// Rejects the request with `401` unless [`authenticate`] resolved an
/// [`Auth`] earlier in the stack.
pub async fn authentication_required<B>(
    request: Request<B>,
    next: Next<B>,
) -> Result<axum::response::Response, ResponseError> {
    if request.extensions().get::<Auth>().is_some() {
        Ok(next.run(request).await)
    } else {
        Err(ResponseError::Unauthorized)
    }
}

/// Resolves the `Authorization: Bearer` header into an [`Auth`] and
/// inserts it in the request extensions.
///
/// A missing header or a non-Bearer scheme leaves the request
/// unauthenticated, a present but unknown token is a `401`.
pub async fn authenticate<A: Authenticator + 'static, B>(
    mut request: Request<B>,
    next: Next<B>,
) -> Result<axum::response::Response, ResponseError> {
    let app = request
        .extensions()
        .get::<Arc<Application<A>>>()
        .expect("Application should always be present")
        .clone();

    let prefix = "Bearer ";

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|hv| {
            hv.to_str()
                .map(|token_str| token_str.strip_prefix(prefix))
                .transpose()
        })
        .transpose()
        .map_err(|error| ResponseError::BadRequest(error.to_string()))?
        .map(ToString::to_string);

    if let Some(token) = token {
        let session = app.adapter.session_from_token(&token).await?;

        request.extensions_mut().insert(Auth {
            owner: session.owner,
        });
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod test {
    use axum::{
        body::Body,
        http::StatusCode,
        middleware::from_fn,
        routing::get,
        Extension, Router,
    };
    use tower::Service;

    use adapter::Dummy;
    use primitives::test_util::OWNER;

    use crate::test_util::setup_dummy_app;

    use super::*;

    #[tokio::test]
    async fn no_authentication_should_not_add_auth() {
        let app = Arc::new(setup_dummy_app());

        async fn handle(auth: Option<Extension<Auth>>) -> StatusCode {
            assert!(auth.is_none(), "There shouldn't be an Auth in the extensions");
            StatusCode::OK
        }

        let mut router = Router::new()
            .route("/", get(handle))
            .layer(from_fn(authenticate::<Dummy, _>));

        let no_auth_req = Request::builder()
            .extension(app.clone())
            .body(Body::empty())
            .expect("should never fail!");

        let no_auth = router
            .call(no_auth_req)
            .await
            .expect("Handling the Request shouldn't have failed");

        assert_eq!(StatusCode::OK, no_auth.status());
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let app = Arc::new(setup_dummy_app());

        async fn handle() -> String {
            "Ok".into()
        }

        let mut router = Router::new()
            .route("/", get(handle))
            .layer(from_fn(authenticate::<Dummy, _>));

        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer wrong-token")
            .extension(app.clone())
            .body(Body::empty())
            .expect("should never fail!");

        let response = router
            .call(request)
            .await
            .expect("Handling the Request shouldn't have failed");

        assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    }

    #[tokio::test]
    async fn auth_from_correct_token() {
        let app = Arc::new(setup_dummy_app());

        async fn handle(Extension(auth): Extension<Auth>) -> String {
            assert_eq!(*OWNER, auth.owner);

            "Ok".into()
        }

        let mut router = Router::new()
            .route("/", get(handle))
            .layer(from_fn(authenticate::<Dummy, _>));

        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer AUTH_acme")
            .extension(app.clone())
            .body(Body::empty())
            .expect("should never fail!");

        // The handle takes care of the assertion for the Auth extension
        let response = router
            .call(request)
            .await
            .expect("Handling the Request shouldn't have failed");

        assert_eq!(StatusCode::OK, response.status());
    }

    #[tokio::test]
    async fn authentication_required_rejects_unauthenticated() {
        async fn handle() -> String {
            "Ok".into()
        }

        let mut router = Router::new()
            .route("/", get(handle))
            .layer(from_fn(authentication_required::<_>));

        let request = Request::builder()
            .body(Body::empty())
            .expect("should never fail!");

        let response = router
            .call(request)
            .await
            .expect("Handling the Request shouldn't have failed");

        assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    }
}
