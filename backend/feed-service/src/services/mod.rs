pub mod auth;
pub mod authorize;
pub mod posts;

pub use auth::AuthService;
pub use authorize::{authorize, Operation};
pub use posts::{PostInput, PostService};
