//! Mapping from content store failures to domain errors.

use crate::domain::Error;
use crate::domain::ports::ContentStoreError;

pub(crate) fn map_content_error(error: ContentStoreError) -> Error {
    match error {
        ContentStoreError::Connection { message } => {
            Error::service_unavailable(format!("content store unavailable: {message}"))
        }
        ContentStoreError::Query { message } => {
            Error::internal(format!("content store error: {message}"))
        }
    }
}
