/// WebSocket endpoint for live feed updates
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use crate::app_state::AppState;
use crate::realtime::socket::FeedSocket;

/// GET /ws/feed
///
/// Registers the connection as a viewer; every feed change event is pushed
/// as a JSON text frame in commit order until the client disconnects.
pub async fn feed_updates(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> std::result::Result<HttpResponse, actix_web::Error> {
    let (id, events) = state.broadcaster.subscribe().await;
    ws::start(
        FeedSocket::new(id, events, state.broadcaster.clone()),
        &req,
        stream,
    )
}
