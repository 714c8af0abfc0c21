//! Authentication primitives: password hashing and token issuance.

mod password;
mod token;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use token::{Claims, TokenError, TokenService, TokenType};
