pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtKeys};
pub use middleware::{auth_middleware, require_internal, AuthUser, AuthenticatedUser};
pub use password::{hash_password, verify_password};
