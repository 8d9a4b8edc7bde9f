//! Maps domain `AppError` to GraphQL errors.
//!
//! Caller-facing kinds keep their message and carry a machine-readable
//! `extensions.code`. Infrastructure failures are logged with their cause
//! and surface only as a generic internal error.

use async_graphql::{ErrorExtensionValues, ErrorExtensions, ServerError};

use shophub_core::error::{AppError, ErrorKind};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Machine-readable code for an error kind.
pub fn error_code(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Authentication => "AUTH_ERROR",
        ErrorKind::Authorization => "PERMISSION_ERROR",
        ErrorKind::NotFound => "NOT_FOUND",
        ErrorKind::Validation => "VALIDATION_ERROR",
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::ExternalService => "INTERNAL_ERROR",
    }
}

fn public_message(err: &AppError) -> String {
    if err.kind.is_client_facing() {
        err.message.clone()
    } else {
        tracing::error!(
            kind = %err.kind,
            error = %err.message,
            source = ?err.source,
            "Internal error while resolving GraphQL request"
        );
        INTERNAL_MESSAGE.to_string()
    }
}

/// Convert an application error into a resolver error.
pub fn to_graphql_error(err: AppError) -> async_graphql::Error {
    let code = error_code(err.kind);
    async_graphql::Error::new(public_message(&err)).extend_with(|_, e| e.set("code", code))
}

/// Convert an application error raised outside a resolver (e.g. while
/// resolving the session) into a top-level GraphQL error.
pub fn to_server_error(err: AppError) -> ServerError {
    let mut extensions = ErrorExtensionValues::default();
    extensions.set("code", error_code(err.kind));

    let mut server_error = ServerError::new(public_message(&err), None);
    server_error.extensions = Some(extensions);
    server_error
}

/// `?`-friendly conversion from `AppResult` into `async_graphql::Result`.
pub trait GraphQLResultExt<T> {
    /// Map the error side through [`to_graphql_error`].
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> GraphQLResultExt<T> for Result<T, AppError> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(to_graphql_error)
    }
}
