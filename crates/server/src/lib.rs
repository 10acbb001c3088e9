use api_types::error::ErrorBody;
use axum::{
    Json,
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use engine::{EngineError, EntityKind};

pub use server::{app, run_with_listener};

mod entities;
mod server;

pub(crate) static ALERT_HEADER: HeaderName = HeaderName::from_static("x-accounting-alert");
pub(crate) static ERROR_HEADER: HeaderName = HeaderName::from_static("x-accounting-error");
pub(crate) static PARAMS_HEADER: HeaderName = HeaderName::from_static("x-accounting-params");

pub enum ServerError {
    Engine {
        entity: Option<EntityKind>,
        error: EngineError,
    },
    Generic(String),
}

impl ServerError {
    /// Attach the entity an engine error happened on, for the error body.
    pub(crate) fn on(kind: EntityKind) -> impl Fn(EngineError) -> ServerError {
        move |error| ServerError::Engine {
            entity: Some(kind),
            error,
        }
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::IdentifierConflict(_)
        | EngineError::IdentifierMismatch(_)
        | EngineError::BadRequest(_)
        | EngineError::MalformedId(_)
        | EngineError::Validation(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine { entity, error } => {
                let status = status_for_engine_error(&error);
                let body = ErrorBody {
                    error_key: error.error_key().to_string(),
                    entity_name: entity.map(|kind| kind.descriptor().name.to_string()),
                    error: message_for_engine_error(error),
                };
                (status, body)
            }
            ServerError::Generic(error) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error,
                    error_key: "badrequest".to_string(),
                    entity_name: None,
                },
            ),
        };

        let mut response = (status, Json(&body)).into_response();
        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(&format!("error.{}", body.error_key)) {
            headers.insert(ERROR_HEADER.clone(), value);
        }
        if let Some(entity) = body.entity_name.as_deref().and_then(|e| HeaderValue::from_str(e).ok()) {
            headers.insert(PARAMS_HEADER.clone(), entity);
        }
        if status == StatusCode::METHOD_NOT_ALLOWED {
            headers.insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
        }
        response
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine {
            entity: None,
            error: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()[&ERROR_HEADER], "error.idnotfound");
    }

    #[test]
    fn identifier_errors_map_to_400() {
        for err in [
            EngineError::IdentifierConflict("currency".to_string()),
            EngineError::IdentifierMismatch("x".to_string()),
            EngineError::BadRequest("x".to_string()),
            EngineError::MalformedId("x".to_string()),
            EngineError::Validation("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn missing_path_id_maps_to_405() {
        let res = ServerError::on(EntityKind::Journal)(EngineError::MethodNotAllowed(
            "x".to_string(),
        ))
        .into_response();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[&PARAMS_HEADER], "journal");
        assert_eq!(res.headers()[header::ALLOW], "GET, POST");
    }

    #[test]
    fn database_errors_map_to_500() {
        let err = EngineError::Database(engine_db_error());
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    fn engine_db_error() -> sea_orm::DbErr {
        sea_orm::DbErr::Custom("connection lost".to_string())
    }
}
