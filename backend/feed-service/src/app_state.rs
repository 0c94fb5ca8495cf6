/// Shared application state constructed once at server start
use std::sync::Arc;

use crate::realtime::FeedBroadcaster;
use crate::services::{AuthService, PostService};
use crate::storage::ImageStore;

pub struct AppState {
    pub auth: AuthService,
    pub posts: PostService,
    pub images: Arc<dyn ImageStore>,
    pub broadcaster: FeedBroadcaster,
    /// Shared secret the `Identity` extractor verifies bearer tokens with
    pub jwt_secret: String,
}
