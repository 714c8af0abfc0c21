//! Validated JSON extractor.
//!
//! Deserializes the request body, then runs validator rules. Failures are
//! reported with the complete list of violations, not just the first.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// JSON extractor that also runs validation rules.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiError::validation(format!("Invalid request body: {}", e.body_text()), Vec::new())
        })?;

        value
            .validate()
            .map_err(|e| ApiError::from_validation_errors(&e))?;

        Ok(ValidatedJson(value))
    }
}
