//! Thin facades: each operation builds one request, sends it through a
//! [`Collaborator`](cloudops_provider::Collaborator), and trims the answer.

pub mod identity;
pub mod model;
pub mod storage;

pub use identity::IdentityFacade;
pub use model::ModelFacade;
pub use storage::StorageFacade;

use cloudops_core::{CloudOpsError, Response};

/// Builds the error for a response variant the operation cannot produce.
pub(crate) fn unexpected(operation: &'static str, response: &Response) -> CloudOpsError {
    CloudOpsError::UnexpectedResponse {
        operation,
        received: response.kind(),
    }
}
