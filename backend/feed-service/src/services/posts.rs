/// Post service - creation, mutation, deletion, and feed pagination
///
/// The one place where authorization, image lifecycle, persistence, and
/// fan-out meet. The ordering contract for every mutation is: validate,
/// fetch, authorize, commit, then release old blobs and broadcast - in that
/// order, so a failed or forbidden operation leaves no side effects.
use std::sync::Arc;

use uuid::Uuid;

use crate::db::{NewPost, PostChanges, PostStore};
use crate::error::{AppError, FieldViolation, Result};
use crate::models::{Identity, Post, PostPage};
use crate::realtime::{FeedBroadcaster, FeedEvent};
use crate::services::authorize::{authorize, Operation};
use crate::storage::{spawn_release, ImageStore, StoredImage};

const MIN_TEXT_LEN: usize = 5;

/// Incoming fields for a post create or update
#[derive(Debug, Default)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    /// Freshly uploaded blob, when the request carried a file
    pub new_image: Option<StoredImage>,
    /// Blob reference passed through unchanged on update
    pub existing_image: Option<String>,
}

pub struct PostService {
    store: Arc<dyn PostStore>,
    images: Arc<dyn ImageStore>,
    broadcaster: FeedBroadcaster,
    page_size: i64,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        images: Arc<dyn ImageStore>,
        broadcaster: FeedBroadcaster,
        page_size: i64,
    ) -> Self {
        Self {
            store,
            images,
            broadcaster,
            page_size,
        }
    }

    /// One page of the feed, newest first
    ///
    /// Pages are 1-based; absent or non-positive numbers mean the first
    /// page. The total count is computed independently of the slice.
    pub async fn list_page(&self, page: Option<i64>) -> Result<PostPage> {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        // Saturating: an absurd page number is an empty page, not an
        // arithmetic panic or a negative OFFSET.
        let skip = (page - 1).saturating_mul(self.page_size);

        let total_items = self.store.count().await?;
        let posts = self.store.list_page(skip, self.page_size).await?;

        Ok(PostPage { posts, total_items })
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))
    }

    /// Create a post; broadcasts `create` after the insert committed
    pub async fn create_post(&self, identity: &Identity, input: PostInput) -> Result<Post> {
        if let Err(err) = validate_text(&input.title, &input.content) {
            self.discard(input.new_image);
            return Err(err);
        }
        let image = input.new_image.ok_or(AppError::MissingImage)?;

        let post = self
            .store
            .insert(NewPost {
                title: input.title,
                content: input.content,
                image_path: image.path,
                creator_id: identity.user_id,
            })
            .await?;

        self.broadcaster
            .publish(&FeedEvent::Create { post: post.clone() })
            .await;
        tracing::info!(post_id = %post.id, creator = %post.creator_id, "post created");
        Ok(post)
    }

    /// Update a post; owner-only
    ///
    /// When the image reference changes, the old blob is released exactly
    /// once, and only after the update committed - releasing earlier could
    /// leave the post pointing at a deleted blob if the commit failed.
    pub async fn update_post(
        &self,
        identity: &Identity,
        id: Uuid,
        input: PostInput,
    ) -> Result<Post> {
        if let Err(err) = validate_text(&input.title, &input.content) {
            self.discard(input.new_image);
            return Err(err);
        }

        let image_path = match (&input.new_image, &input.existing_image) {
            (Some(image), _) => image.path.clone(),
            (None, Some(existing)) if !existing.trim().is_empty() => existing.clone(),
            _ => return Err(AppError::MissingImage),
        };

        let post = self.get_post(id).await?;
        authorize(identity, &post, Operation::Update)?;

        let old_image = post.image_path.clone();
        let updated = self
            .store
            .update(
                id,
                PostChanges {
                    title: input.title,
                    content: input.content,
                    image_path,
                },
            )
            .await?;

        if updated.image_path != old_image {
            spawn_release(self.images.clone(), old_image);
        }

        self.broadcaster
            .publish(&FeedEvent::Update {
                post: updated.clone(),
            })
            .await;
        tracing::info!(post_id = %updated.id, "post updated");
        Ok(updated)
    }

    /// Delete a post; owner-only. Releases its blob exactly once.
    pub async fn delete_post(&self, identity: &Identity, id: Uuid) -> Result<()> {
        let post = self.get_post(id).await?;
        authorize(identity, &post, Operation::Delete)?;

        self.store.remove(id).await?;

        spawn_release(self.images.clone(), post.image_path);
        self.broadcaster
            .publish(&FeedEvent::Delete { post_id: id })
            .await;
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }

    /// A rejected request must not leave its fresh upload behind
    fn discard(&self, upload: Option<StoredImage>) {
        if let Some(image) = upload {
            spawn_release(self.images.clone(), image.path);
        }
    }
}

fn validate_text(title: &str, content: &str) -> Result<()> {
    let mut violations = Vec::new();
    if title.trim().len() < MIN_TEXT_LEN {
        violations.push(FieldViolation::new(
            "title",
            "title must be at least 5 characters",
        ));
    }
    if content.trim().len() < MIN_TEXT_LEN {
        violations.push(FieldViolation::new(
            "content",
            "content must be at least 5 characters",
        ));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}
