/// Ownership checks for post operations
///
/// Runs after the post snapshot is fetched and before any mutation or blob
/// release is issued, so an unauthorized request can never cause a
/// destructive side effect. `creator_id` is immutable, which makes the
/// fetched snapshot authoritative for the check.
use crate::error::{AppError, Result};
use crate::models::{Identity, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

/// Decide whether `identity` may perform `operation` on `post`
///
/// Update and delete are owner-only. Reads and creation carry no ownership
/// requirement.
pub fn authorize(identity: &Identity, post: &Post, operation: Operation) -> Result<()> {
    match operation {
        Operation::Read | Operation::Create => Ok(()),
        Operation::Update | Operation::Delete => {
            if post.creator_id == identity.user_id {
                Ok(())
            } else {
                Err(AppError::Forbidden("not the creator of this post".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn identity(user_id: Uuid) -> Identity {
        Identity {
            user_id,
            email: "a@example.com".to_string(),
            name: "A".to_string(),
        }
    }

    fn post_by(creator_id: Uuid) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: "title".to_string(),
            content: "content".to_string(),
            image_path: "images/p.png".to_string(),
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_may_update_and_delete() {
        let owner = Uuid::new_v4();
        let post = post_by(owner);
        assert!(authorize(&identity(owner), &post, Operation::Update).is_ok());
        assert!(authorize(&identity(owner), &post, Operation::Delete).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden_to_mutate() {
        let post = post_by(Uuid::new_v4());
        let other = identity(Uuid::new_v4());
        for op in [Operation::Update, Operation::Delete] {
            let err = authorize(&other, &post, op).unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
    }

    #[test]
    fn read_and_create_are_open_to_any_identity() {
        let post = post_by(Uuid::new_v4());
        let other = identity(Uuid::new_v4());
        assert!(authorize(&other, &post, Operation::Read).is_ok());
        assert!(authorize(&other, &post, Operation::Create).is_ok());
    }
}
