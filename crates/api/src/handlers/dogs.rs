//! Handlers for dog listings: list, fetch, create with photo upload, delete.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use shelter_core::error::CoreError;
use shelter_core::types::DbId;
use shelter_core::{uploads, validation};
use shelter_db::models::dog::{CreateDogListing, DogListing};
use shelter_db::repositories::DogRepo;

use crate::error::{AppError, AppResult, GENERIC_FAILURE};
use crate::response::{DataResponse, ErrorWithData};
use crate::state::AppState;

/// Where a successful create sends the client.
pub const LISTING_PATH: &str = "/api/v1/dogs";

/// GET /api/v1/dogs
///
/// List every dog listing, ordered by id.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<DogListing>>>> {
    let dogs = DogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: dogs }))
}

/// GET /api/v1/dogs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<DogListing>>> {
    let Path(id) = path?;
    let dog = DogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DogListing",
            id,
        }))?;
    Ok(Json(DataResponse { data: dog }))
}

/// Text fields and photo collected from the add-dog form.
#[derive(Debug, Default)]
struct DogForm {
    name: Option<String>,
    breed: Option<String>,
    age: Option<String>,
    description: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl DogForm {
    async fn read(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = DogForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let data = field.bytes().await?;
                    // Browsers send an empty file part when nothing was picked.
                    if !filename.is_empty() {
                        form.image = Some((filename, data.to_vec()));
                    }
                }
                "name" => form.name = Some(field.text().await?),
                "breed" => form.breed = Some(field.text().await?),
                "age" => form.age = Some(field.text().await?),
                "description" => form.description = Some(field.text().await?),
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}

/// POST /api/v1/dogs (multipart)
///
/// Fields: `name`, `breed`, `age`, `description`, file `image`.
///
/// Every check runs before the photo is written. The photo is written
/// before the row is inserted; if the insert fails the photo stays on disk.
/// The upload lock is held from the write until the row exists.
/// Responds `303 See Other` to the listing on success.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Redirect> {
    let mut multipart = multipart?;
    let form = DogForm::read(&mut multipart).await?;

    validation::require_fields(&[
        ("name", form.name.as_deref()),
        ("breed", form.breed.as_deref()),
        ("age", form.age.as_deref()),
        ("description", form.description.as_deref()),
        ("image", form.image.as_ref().map(|(filename, _)| filename.as_str())),
    ])?;

    let (Some(name), Some(breed), Some(age), Some(description), Some((raw_filename, data))) =
        (form.name, form.breed, form.age, form.description, form.image)
    else {
        return Err(AppError::BadRequest("Incomplete dog form".into()));
    };

    let age = validation::parse_age(&age)?;
    let image_filename = uploads::accept_image_filename(&raw_filename)?;

    let input = CreateDogListing {
        name,
        breed,
        age,
        description,
        image_filename,
    };
    validation::check(&input)?;

    let _pairing = state.uploads.lock().await;

    state
        .uploads
        .save(&input.image_filename, &data)
        .await
        .map_err(|e| {
            AppError::Core(CoreError::Internal(format!(
                "Failed to store image '{}': {e}",
                input.image_filename
            )))
        })?;

    let dog = DogRepo::create(&state.pool, &input).await.map_err(|e| {
        tracing::warn!(
            image = %input.image_filename,
            "Dog insert failed after the image was stored; leaving file in place",
        );
        AppError::Database(e)
    })?;

    tracing::info!(dog_id = dog.id, image = %dog.image_filename, "Dog listing created");

    Ok(Redirect::to(LISTING_PATH))
}

/// DELETE /api/v1/dogs/{id}  (also POST /api/v1/dogs/{id}/delete)
///
/// On success returns the remaining listing. A storage failure returns 500
/// with the unchanged listing so the client can redisplay it. If the listing
/// cannot be reloaded, `data` is `null`; a committed delete still answers 200.
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Response> {
    let Path(id) = path?;
    let _pairing = state.uploads.lock().await;

    match DogRepo::delete(&state.pool, id).await {
        Ok(Some(removed)) => {
            tracing::info!(dog_id = id, "Dog listing deleted");
            remove_orphaned_image(&state, &removed.image_filename).await;

            let dogs = listing_or_none(DogRepo::list(&state.pool).await);
            Ok(Json(DataResponse { data: dogs }).into_response())
        }
        Ok(None) => Err(AppError::Core(CoreError::NotFound {
            entity: "DogListing",
            id,
        })),
        Err(e) => {
            tracing::error!(dog_id = id, error = %e, "Failed to delete dog listing");

            let body = ErrorWithData {
                error: GENERIC_FAILURE.to_string(),
                code: "INTERNAL_ERROR",
                data: listing_or_none(DogRepo::list(&state.pool).await),
            };
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}

/// The reloaded listing, or `None` (serialized as `null`) when it is unavailable.
fn listing_or_none(result: Result<Vec<DogListing>, sqlx::Error>) -> Option<Vec<DogListing>> {
    result
        .map_err(|e| tracing::error!(error = %e, "Failed to reload dog listing"))
        .ok()
}

/// Remove a deleted dog's photo unless another listing still points at it.
///
/// Never fails the delete; problems are logged.
async fn remove_orphaned_image(state: &AppState, image_filename: &str) {
    match DogRepo::count_by_image(&state.pool, image_filename).await {
        Ok(0) => match state.uploads.remove(image_filename).await {
            Ok(true) => tracing::debug!(image = %image_filename, "Removed orphaned image"),
            Ok(false) => tracing::debug!(image = %image_filename, "Image already absent"),
            Err(e) => {
                tracing::warn!(image = %image_filename, error = %e, "Failed to remove image")
            }
        },
        Ok(refs) => {
            tracing::debug!(image = %image_filename, refs, "Image still referenced, keeping")
        }
        Err(e) => tracing::warn!(
            image = %image_filename,
            error = %e,
            "Could not check image references, keeping file",
        ),
    }
}
