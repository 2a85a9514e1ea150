pub mod api_key;
pub mod credential_cache;
pub mod jwt;

pub use api_key::*;
pub use credential_cache::*;
pub use jwt::*;
