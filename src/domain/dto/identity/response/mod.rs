pub mod user_response;

pub use user_response::{LinkedAccountResponse, UserListResponse, UserResponse};
