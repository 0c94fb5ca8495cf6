#![allow(dead_code)] // each test binary uses a different subset of helpers

/// In-memory implementations of the storage capability traits, used to
/// exercise the service layer without Postgres or a disk.
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use feed_service::db::{NewPost, NewUser, PostChanges, PostStore, UserStore};
use feed_service::error::{AppError, Result};
use feed_service::models::{Identity, Post, User};
use feed_service::storage::{ImageStore, StoredImage};

const EPOCH: i64 = 1_700_000_000;

#[derive(Default)]
pub struct MemoryPostStore {
    posts: Mutex<HashMap<Uuid, Post>>,
    // Monotonic tick so successive inserts get distinct, increasing
    // timestamps.
    tick: Mutex<i64>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully specified post, bypassing timestamp assignment.
    pub fn insert_raw(&self, post: Post) {
        self.posts.lock().unwrap().insert(post.id, post);
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn list_page(&self, skip: i64, limit: i64) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.posts.lock().unwrap().len() as i64)
    }

    async fn insert(&self, new: NewPost) -> Result<Post> {
        let mut tick = self.tick.lock().unwrap();
        *tick += 1;
        let at = Utc.timestamp_opt(EPOCH + *tick, 0).unwrap();

        let post = Post {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            image_path: new.image_path,
            creator_id: new.creator_id,
            created_at: at,
            updated_at: at,
        };
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post> {
        let mut tick = self.tick.lock().unwrap();
        *tick += 1;
        let at = Utc.timestamp_opt(EPOCH + *tick, 0).unwrap();

        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;
        post.title = changes.title;
        post.content = changes.content;
        post.image_path = changes.image_path;
        post.updated_at = at;
        Ok(post.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        self.posts
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, new: NewUser) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            name: new.name,
            password_hash: new.password_hash,
            status: new.status,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))?;
        user.status = status.to_string();
        Ok(())
    }
}

/// Image store that records every release instead of touching a disk
#[derive(Default)]
pub struct RecordingImageStore {
    releases: Mutex<Vec<String>>,
}

impl RecordingImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn released(&self) -> Vec<String> {
        self.releases.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for RecordingImageStore {
    fn check_content_type(&self, content_type: &str) -> Result<()> {
        match content_type {
            "image/png" | "image/jpeg" | "image/jpg" => Ok(()),
            other => Err(AppError::InvalidImageType(other.to_string())),
        }
    }

    async fn save(
        &self,
        original_name: &str,
        content_type: &str,
        _data: &[u8],
    ) -> Result<StoredImage> {
        self.check_content_type(content_type)?;
        Ok(StoredImage {
            original_name: original_name.to_string(),
            content_type: content_type.to_string(),
            path: format!("images/{}-{}", Uuid::new_v4(), original_name),
        })
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>> {
        Err(AppError::NotFound(format!("image {} not found", path)))
    }

    async fn release(&self, path: &str) -> Result<()> {
        self.releases.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

pub fn identity(user_id: Uuid) -> Identity {
    Identity {
        user_id,
        email: format!("{}@example.com", user_id.simple()),
        name: "Test User".to_string(),
    }
}

pub fn upload(name: &str) -> StoredImage {
    StoredImage {
        original_name: name.to_string(),
        content_type: "image/png".to_string(),
        path: format!("images/{}", name),
    }
}

/// Poll until `condition` holds; releases run on detached tasks, so tests
/// have to wait for them rather than assume immediate completion.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within timeout");
}
