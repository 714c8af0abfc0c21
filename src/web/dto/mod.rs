//! Request and response DTOs for the web API.
//!
//! These types are shared with the client SDK, so they derive both
//! `Serialize` and `Deserialize`.

mod request;
mod response;
mod validation;

pub use request::{
    AssignRoleRequest, LoginRequest, RefreshRequest, RegisterRequest, UpdateProfileRequest,
};
pub use response::{ApiResponse, AuthData, RefreshData, StatusResponse, UserDetail, UserProfile};
pub use validation::ValidatedJson;
