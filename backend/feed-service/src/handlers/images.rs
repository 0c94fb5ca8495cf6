/// Static serving of stored image blobs
use actix_web::{web, HttpResponse};

use crate::app_state::AppState;
use crate::error::Result;

/// GET /images/{name}
///
/// Posts carry their blob reference in `imagePath`; this is the route that
/// makes the reference fetchable. The store resolves the name inside its
/// root directory only, so a crafted path cannot escape it.
pub async fn get_image(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse> {
    let bytes = state.images.load(&name).await?;
    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&name))
        .body(bytes))
}

// Only allow-listed types ever reach the store, so the extension decides.
fn content_type_for(name: &str) -> &'static str {
    if name.ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_picks_the_content_type() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
    }
}
