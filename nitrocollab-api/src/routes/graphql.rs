/// GraphQL endpoint handlers
///
/// `POST /graphql` executes operations; `GET /graphql` serves a GraphiQL
/// page for interactive exploration.
///
/// Identity is resolved here, once per request: the bearer token from the
/// `Authorization` header is turned into an `Option<User>` and injected into
/// the request data before execution. An absent or invalid token yields an
/// anonymous request; the per-operation gate decides whether that is
/// acceptable, so `signUp`/`signIn` work without credentials.
use async_graphql::http::GraphiQLSource;
use async_graphql::ServerError;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::Html;
use nitrocollab_shared::auth::identity;

use crate::app::AppState;
use crate::schema::CurrentUser;

/// Extracts the bearer token from the Authorization header, if any
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// GraphQL execution handler
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let token = bearer_token(&headers);

    let current_user =
        match identity::resolve_user(token, state.jwt_secret(), state.store.as_ref()).await {
            Ok(user) => user,
            Err(err) => {
                // A store failure during identity resolution fails the whole
                // request; it must not silently downgrade to anonymous
                tracing::error!("Identity resolution failed: {}", err);
                return async_graphql::Response::from_errors(vec![ServerError::new(
                    "An internal error occurred",
                    None,
                )])
                .into();
            }
        };

    let request = req.into_inner().data(CurrentUser(current_user));

    state.schema.execute(request).await.into()
}

/// GraphiQL page handler
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert_eq!(bearer_token(&headers), None);
    }
}
