//! Read-only query surface over dog listings and contact requests.
//!
//! Connection endpoints accept `first`/`after` or `last`/`before`; the node
//! endpoint resolves a global id to its row.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use shelter_core::connection::{self, Connection, ConnectionArgs, GlobalNode, NodeType};
use shelter_core::error::CoreError;
use shelter_db::models::contact_request::ContactRequest;
use shelter_db::models::dog::DogListing;
use shelter_db::repositories::{ContactRequestRepo, DogRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A node resolved from a global id, tagged with its type name.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum NodeResponse {
    DogListing(GlobalNode<DogListing>),
    ContactRequest(GlobalNode<ContactRequest>),
}

/// GET /api/v1/query/dogs
pub async fn dogs(
    State(state): State<AppState>,
    query: Result<Query<ConnectionArgs>, QueryRejection>,
) -> AppResult<Json<DataResponse<Connection<DogListing>>>> {
    let Query(args) = query?;
    let request = args.resolve()?;
    let rows = DogRepo::page(&state.pool, &request).await?;
    let total = DogRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: Connection::from_rows(rows, &request, total),
    }))
}

/// GET /api/v1/query/contact-requests
pub async fn contact_requests(
    State(state): State<AppState>,
    query: Result<Query<ConnectionArgs>, QueryRejection>,
) -> AppResult<Json<DataResponse<Connection<ContactRequest>>>> {
    let Query(args) = query?;
    let request = args.resolve()?;
    let rows = ContactRequestRepo::page(&state.pool, &request).await?;
    let total = ContactRequestRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: Connection::from_rows(rows, &request, total),
    }))
}

/// GET /api/v1/query/node/{global_id}
pub async fn node(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<DataResponse<NodeResponse>>> {
    let Path(global_id) = path?;
    let (node_type, id) = connection::decode_global_id(&global_id)?;
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: node_type.as_str(),
            id,
        })
    };

    let node = match node_type {
        NodeType::DogListing => DogRepo::find_by_id(&state.pool, id)
            .await?
            .map(|dog| NodeResponse::DogListing(GlobalNode::new(dog)))
            .ok_or_else(not_found)?,
        NodeType::ContactRequest => ContactRequestRepo::find_by_id(&state.pool, id)
            .await?
            .map(|req| NodeResponse::ContactRequest(GlobalNode::new(req)))
            .ok_or_else(not_found)?,
    };

    Ok(Json(DataResponse { data: node }))
}
