/// Feed endpoints - paginated listing, single post, create/update/delete
use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde::Deserialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::{AppError, FieldViolation, Result};
use crate::models::Identity;
use crate::services::PostInput;
use crate::storage::ImageStore;

const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
}

/// GET /api/v1/feed/posts?page=N
pub async fn get_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let page = state.posts.list_page(query.page).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/feed/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = state.posts.get_post(*post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/v1/feed/posts
///
/// Multipart body with `title` and `content` text fields and an `image`
/// file field.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> Result<HttpResponse> {
    let input = read_post_input(payload, &state.images).await?;
    let post = state.posts.create_post(&identity, input).await?;
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/v1/feed/posts/{id}
///
/// Same shape as creation, except `image` may instead be a text field
/// carrying the currently stored blob reference when the caller did not
/// change the picture.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let input = read_post_input(payload, &state.images).await?;
    let post = state.posts.update_post(&identity, *post_id, input).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/feed/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.posts.delete_post(&identity, *post_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "post deleted",
    })))
}

fn malformed(detail: &str) -> AppError {
    AppError::Validation(vec![FieldViolation::new("body", detail)])
}

/// Walk the multipart fields into a `PostInput`
///
/// A file part named `image` is persisted through the image store (after the
/// content-type gate); a text part named `image` passes an existing blob
/// reference through. Unknown fields are drained and ignored.
async fn read_post_input(
    mut payload: Multipart,
    images: &Arc<dyn ImageStore>,
) -> Result<PostInput> {
    let mut input = PostInput::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| malformed(&format!("malformed multipart: {}", e)))?;

        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or("").to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => (String::new(), None),
        };

        // Gate file uploads on the declared type before buffering any bytes.
        let content_type = field.content_type().map(|m| m.to_string());
        if name == "image" && file_name.is_some() {
            images.check_content_type(content_type.as_deref().unwrap_or(""))?;
        }

        let mut data = web::BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| malformed(&format!("malformed multipart: {}", e)))?;
            if data.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(malformed("field exceeds size limit"));
            }
            data.extend_from_slice(&chunk);
        }

        match (name.as_str(), file_name) {
            ("title", None) => input.title = text(&data)?,
            ("content", None) => input.content = text(&data)?,
            ("image", Some(file_name)) => {
                let stored = images
                    .save(
                        &file_name,
                        content_type.as_deref().unwrap_or(""),
                        &data,
                    )
                    .await?;
                input.new_image = Some(stored);
            }
            ("image", None) => input.existing_image = Some(text(&data)?),
            _ => {}
        }
    }

    Ok(input)
}

fn text(data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec()).map_err(|_| malformed("field is not valid UTF-8"))
}
