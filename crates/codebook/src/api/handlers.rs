//! REST API handlers using axum

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use super::response::{
    DataList, DataMessage, Message, ModelList, TechList, CREATED_MESSAGE, DELETED_MESSAGE,
    UPDATED_MESSAGE,
};
use super::{ApiError, AppState};
use crate::error::Error;
use crate::filter::RecordFilter;
use crate::model::{Data, DataDetail};

/// Bind a request body to a record.
///
/// The content type is not checked; any JSON object binds, with missing
/// fields left empty.
fn bind(body: &[u8]) -> Result<Data, Error> {
    serde_json::from_slice(body).map_err(Error::InvalidBody)
}

/// GET /data - List records, optionally filtered by `model` and `tech`
pub async fn list_data(
    State(store): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<DataList> {
    let filter = RecordFilter::from_query(params);
    let data = if filter.is_empty() {
        store.all()
    } else {
        info!(model = ?filter.model, techs = ?filter.techs, "REST Filter request");
        store.filter(&filter)
    };

    debug!(count = data.len(), "Records listed");
    Json(DataList { data })
}

/// GET /data/:code - Get the enriched view of a record
pub async fn get_data(
    State(store): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DataDetail>, ApiError> {
    debug!(code = %code, "REST Get request");

    store
        .detail(&code)
        .map(Json)
        .ok_or_else(|| Error::not_found(code).into())
}

/// POST /data - Append a record
pub async fn create_data(
    State(store): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataMessage>), ApiError> {
    let data = bind(&body)?;
    info!(code = %data.code, "REST Create request");

    let data = store.create(data);
    Ok((
        StatusCode::CREATED,
        Json(DataMessage {
            message: CREATED_MESSAGE,
            data,
        }),
    ))
}

/// PUT /data/:code - Overwrite a record
///
/// An unknown code is reported before the body is looked at.
pub async fn update_data(
    State(store): State<AppState>,
    Path(code): Path<String>,
    body: Bytes,
) -> Result<Json<DataMessage>, ApiError> {
    info!(code = %code, "REST Update request");

    let data = store.update_with(&code, |_| bind(&body))?;
    Ok(Json(DataMessage {
        message: UPDATED_MESSAGE,
        data,
    }))
}

/// DELETE /data/:code - Remove a record
pub async fn delete_data(
    State(store): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Message>, ApiError> {
    info!(code = %code, "REST Delete request");

    store.delete(&code)?;
    Ok(Json(Message {
        message: DELETED_MESSAGE,
    }))
}

/// GET /references/models - List the model reference table
pub async fn list_models(State(store): State<AppState>) -> Json<ModelList> {
    Json(ModelList {
        models: store.models().to_vec(),
    })
}

/// GET /references/techs - List the tech reference table
pub async fn list_techs(State(store): State<AppState>) -> Json<TechList> {
    Json(TechList {
        techs: store.techs().to_vec(),
    })
}
