/// Database access layer
///
/// The core depends on the `PostStore` and `UserStore` capability sets only;
/// the Postgres implementations live in the sibling modules. Tests supply
/// in-memory implementations of the same traits.
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Post, User};

pub mod post_repo;
pub mod user_repo;

pub use post_repo::PgPostStore;
pub use user_repo::PgUserStore;

/// Fields required to create a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_path: String,
    pub creator_id: Uuid,
}

/// Mutable fields of a post; `creator_id` and `created_at` never change
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub image_path: String,
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub status: String,
}

/// Capability set the core requires from the post storage engine
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>>;

    /// One window of the feed in `(created_at DESC, id DESC)` order
    async fn list_page(&self, skip: i64, limit: i64) -> Result<Vec<Post>>;

    /// Total post count, independent of any page slice
    async fn count(&self) -> Result<i64>;

    async fn insert(&self, post: NewPost) -> Result<Post>;

    /// Apply changes and bump `updated_at`; fails with `NotFound` if absent
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post>;

    /// Delete a post; fails with `NotFound` if absent
    async fn remove(&self, id: Uuid) -> Result<()>;
}

/// Capability set the core requires from the user storage engine
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert(&self, user: NewUser) -> Result<User>;
    async fn update_status(&self, id: Uuid, status: &str) -> Result<()>;
}
