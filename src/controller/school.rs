use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    data::school::SchoolRepository,
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        registry::SchoolDto,
    },
};

pub static SCHOOL_TAG: &str = "school";

/// List registered schools
///
/// Public reference list shown on the registration forms.
///
/// # Responses
/// - 200 (OK): Schools ordered by name
#[utoipa::path(
    get,
    path = "/api/schools",
    tag = SCHOOL_TAG,
    responses(
        (status = 200, description = "Schools ordered by name", body = Vec<SchoolDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_schools(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let schools = SchoolRepository::new(&state.db).list().await?;

    let school_dtos: Vec<SchoolDto> = schools
        .into_iter()
        .map(|school| SchoolDto {
            id: school.id,
            name: school.name,
            address: school.address,
        })
        .collect();

    Ok(Json(school_dtos))
}
