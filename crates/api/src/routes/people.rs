//! Demo routes converting between the `people` store, `PersonEntity` records
//! and `PersonDto` transfer objects. Nothing is written back to the store.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use entidto_core::{
    dto_to_entity, entity_to_dto, update_entity, Coerce, Dto, Field, Record, Schema,
    TransferObject,
};
use entidto_db::{get_by, Fetched, GetBy, LookupField, UnknownLookupField};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidDto;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonEntity {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

impl Schema for PersonEntity {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::optional("id"),
            Field::optional("username"),
            Field::optional("email"),
            Field::optional("age"),
        ];
        FIELDS
    }
}

impl Record for PersonEntity {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonDto {
    pub id: Option<i64>,
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i64>,
}

impl Schema for PersonDto {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            Field::optional("id").coerce(Coerce::Integer),
            Field::optional("username"),
            Field::optional("email"),
            Field::optional("age").coerce(Coerce::Integer),
        ];
        FIELDS
    }
}

impl TransferObject for PersonDto {}

/// The `people` table stores the age in a `years` column.
fn lookup_options() -> GetBy {
    GetBy::default().field_mapping(HashMap::from([("age".to_string(), "years".to_string())]))
}

async fn find_person(state: &AppState, field: LookupField, value: &str) -> AppResult<PersonEntity> {
    get_by::<PersonEntity>(state.people.as_ref(), field, value, &lookup_options())
        .await?
        .and_then(Fetched::into_entity)
        .ok_or_else(|| AppError::NotFound(format!("No person with {field}={value}")))
}

/// GET /people/{field}/{value}
async fn get_person(
    State(state): State<AppState>,
    Path((field, value)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<PersonDto>>> {
    let field: LookupField = field
        .parse()
        .map_err(|e: UnknownLookupField| AppError::BadRequest(e.to_string()))?;

    let person = find_person(&state, field, &value).await?;
    let dto: Dto<PersonDto> = entity_to_dto(&person)?;
    Ok(Json(DataResponse {
        data: dto.into_inner(),
    }))
}

/// POST /people/validate
///
/// Validates the body (or query string) and returns the record it maps to.
async fn validate_person(
    ValidDto(dto): ValidDto<PersonDto>,
) -> AppResult<Json<DataResponse<PersonEntity>>> {
    let person: PersonEntity = dto_to_entity(&dto, None)?;
    Ok(Json(DataResponse { data: person }))
}

/// PATCH /people/{id}
///
/// Returns the stored person with the supplied non-null fields laid over it.
async fn preview_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidDto(dto): ValidDto<PersonDto>,
) -> AppResult<Json<DataResponse<PersonEntity>>> {
    let base = find_person(&state, LookupField::Id, &id.to_string()).await?;
    let mut update: PersonEntity = dto_to_entity(&dto, None)?;
    update.id = None;

    let merged = update_entity(&base, &update)?;
    tracing::info!(id, "Previewed person update");
    Ok(Json(DataResponse { data: merged }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/people/validate", post(validate_person))
        .route("/people/{id}", patch(preview_update))
        .route("/people/{field}/{value}", get(get_person))
}
