/// Postgres-backed post store
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::db::{NewPost, PostChanges, PostStore};
use crate::error::{AppError, Result};
use crate::models::Post;

pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, image_path, creator_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_page(&self, skip: i64, limit: i64) -> Result<Vec<Post>> {
        // The id tie-break keeps the order total even for identical timestamps.
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, image_path, creator_id, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>("count"))
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, image_path, creator_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, image_path, creator_id, created_at, updated_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_path)
        .bind(post.creator_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $1, content = $2, image_path = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, title, content, image_path, creator_id, created_at, updated_at
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.image_path)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        post.ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("post {} not found", id)));
        }
        Ok(())
    }
}
