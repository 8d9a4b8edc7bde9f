//! GraphQL endpoint and playground.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::error::to_server_error;
use crate::state::AppState;

/// POST /graphql
///
/// Resolves the session cookie into a request context before executing the
/// operation. A missing or invalid cookie means an anonymous request.
pub async fn graphql_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let token = state.session_cookie.read(&jar);
    let request_ctx = match state.auth_service.resolve_session(token.as_deref()).await {
        Ok(ctx) => ctx,
        Err(e) => return async_graphql::Response::from_errors(vec![to_server_error(e)]).into(),
    };

    state
        .schema
        .execute(req.into_inner().data(request_ctx))
        .await
        .into()
}

/// GET /graphql
pub async fn graphiql(State(state): State<AppState>) -> Response {
    if !state.config.server.playground {
        return StatusCode::NOT_FOUND.into_response();
    }
    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}
