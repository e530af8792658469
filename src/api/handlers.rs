use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum::extract::multipart::Multipart;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AppState, ServerConfig};
use crate::ingest::{self, BatchReport};
use crate::record::FeatureCollection;
use super::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut saw_file_field = false;
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        saw_file_field = true;

        // A part without a filename is reported as skipped under an empty name.
        let original = field.file_name().unwrap_or_default().to_string();
        let filename = ingest::sanitize_filename(&original)
            .filter(|name| ingest::is_allowed_file(name));

        let Some(filename) = filename else {
            skipped.push(original);
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read {}: {}", filename, e)))?;
        files.push((filename, bytes.to_vec()));
    }

    if !saw_file_field {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing file part"));
    }

    let config = Arc::clone(&state.config);
    let (report, save_failures) = tokio::task::spawn_blocking(move || {
        let (files, save_failures) = save_uploads(&config, files);
        (ingest::ingest_batch(files), save_failures)
    })
    .await
    .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Ingestion task failed: {}", e)))?;

    let BatchReport { records, failures } = report;
    let inserted = state.store.insert_many(records);

    let mut failed = save_failures;
    failed.extend(failures.into_iter().map(|f| UploadFailure {
        filename: f.filename,
        error: f.error.to_string(),
    }));

    info!(
        "upload: {} inserted, {} skipped, {} failed",
        inserted.len(),
        skipped.len(),
        failed.len()
    );

    Ok(Json(UploadResponse {
        inserted,
        skipped,
        failed,
    }))
}

/// Writes uploads to the configured directory, dropping files that cannot be saved
fn save_uploads(
    config: &ServerConfig,
    files: Vec<(String, Vec<u8>)>,
) -> (Vec<(String, Vec<u8>)>, Vec<UploadFailure>) {
    let Some(dir) = &config.upload_dir else {
        return (files, Vec::new());
    };

    if let Err(e) = fs::create_dir_all(dir) {
        warn!("cannot create upload directory {}: {}", dir.display(), e);
        let failures = files
            .into_iter()
            .map(|(filename, _)| UploadFailure {
                filename,
                error: format!("Failed to save upload: {}", e),
            })
            .collect();
        return (Vec::new(), failures);
    }

    let mut kept = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for (filename, bytes) in files {
        match fs::write(dir.join(&filename), &bytes) {
            Ok(()) => kept.push((filename, bytes)),
            Err(e) => {
                warn!("cannot save {}: {}", filename, e);
                failures.push(UploadFailure {
                    filename,
                    error: format!("Failed to save upload: {}", e),
                });
            }
        }
    }

    (kept, failures)
}

pub async fn list_images(State(state): State<AppState>) -> Json<Vec<ImageDocument>> {
    let documents = state.store.list().iter().map(ImageDocument::from).collect();
    Json(documents)
}

pub async fn first_image(
    State(state): State<AppState>,
) -> Result<Json<ImageDocument>, ApiError> {
    state
        .store
        .first()
        .map(|stored| Json(ImageDocument::from(&stored)))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No images stored"))
}

pub async fn raw_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let stored = state
        .store
        .get(&id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No image with id {}", id)))?;

    Ok((
        [(header::CONTENT_TYPE, mime::IMAGE_JPEG.to_string())],
        stored.record.image_data().to_vec(),
    )
        .into_response())
}

pub async fn delete_images(State(state): State<AppState>) -> Json<DeleteResponse> {
    let deleted = state.store.delete_all();
    info!("deleted {} image(s)", deleted);
    Json(DeleteResponse { deleted })
}

pub async fn feature_collection(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stored = state.store.list();
    let collection = FeatureCollection::new(stored.iter().map(|s| s.record.as_ref()));

    serde_json::to_value(&collection)
        .map(Json)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode features: {}", e)))
}

pub async fn features_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let stored = state.store.list();

    let csv_data = write_csv(&stored)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to export CSV: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV.to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"survey.csv\"".to_string(),
            ),
        ],
        csv_data,
    )
        .into_response())
}

fn write_csv(stored: &[crate::store::StoredFeature]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for item in stored {
        let properties = item.record.properties();
        writer.serialize(CsvRow {
            filename: &properties.filename,
            lat: properties.lat,
            lon: properties.lon,
            yaw: properties.yaw,
            msl_alt: properties.msl_alt,
        })?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        documents: state.store.len(),
    })
}
