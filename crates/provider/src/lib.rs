//! Collaborator abstraction: the one seam through which facades reach the cloud.

pub mod aws;
pub mod memory;

use async_trait::async_trait;
use cloudops_core::{ClientFault, Operation, Response};

pub use aws::AwsCollaborator;
pub use memory::InMemoryCollaborator;

/// Anything that can execute a remote management operation.
///
/// Implementations perform exactly one request per call: no retries, no
/// pagination, no caching.
#[async_trait]
pub trait Collaborator: Send + Sync {
    async fn invoke(&self, operation: Operation) -> Result<Response, ClientFault>;
}
