//! Request extractors feeding the converters.

use axum::body::Bytes;
use axum::extract::{FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use entidto_core::{request_to_dto, Dto, Fields, RequestData, TransferObject};
use serde_json::Value;

use crate::error::AppError;

/// The body and query-string mappings of a request.
///
/// JSON bodies must be objects; urlencoded form bodies become string fields.
/// A request without a content type must have an empty body. Repeated keys
/// keep their last value.
#[derive(Debug, Clone)]
pub struct Payload(pub RequestData);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query_params = match Query::<Vec<(String, String)>>::try_from_uri(req.uri()) {
            Ok(Query(pairs)) => RequestData::query(pairs),
            Err(rejection) => return Err(AppError::BadRequest(rejection.body_text())),
        };

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        let data = match content_type.as_deref() {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(value) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
                match value {
                    Value::Object(fields) => fields,
                    Value::Null => Fields::new(),
                    _ => {
                        return Err(AppError::BadRequest(
                            "JSON body must be an object".to_string(),
                        ))
                    }
                }
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
                RequestData::query(pairs)
            }
            _ => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
                if !bytes.is_empty() {
                    return Err(AppError::BadRequest(
                        "Unsupported request body content type".to_string(),
                    ));
                }
                Fields::new()
            }
        };

        Ok(Payload(RequestData::new(data, query_params)))
    }
}

/// A transfer object validated from the request body, or from the query
/// string when the body is empty.
///
/// ```ignore
/// async fn create(ValidDto(dto): ValidDto<PersonDto>) -> AppResult<Json<()>> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct ValidDto<T>(pub Dto<T>);

impl<S, T> FromRequest<S> for ValidDto<T>
where
    S: Send + Sync,
    T: TransferObject + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Payload(request) = Payload::from_request(req, state).await?;
        let dto = request_to_dto::<T>(&request)?;
        tracing::debug!(
            dto = T::type_name(),
            fields = dto.fields_set().len(),
            "Extracted transfer object"
        );
        Ok(ValidDto(dto))
    }
}
