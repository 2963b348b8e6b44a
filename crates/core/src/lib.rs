//! Wire types, configuration, and error definitions.
//!
//! Foundation crate -- no async or I/O dependencies.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ErrorPolicy, FacadeConfig, DEFAULT_MODEL_ID};
pub use error::{ClientFault, CloudOpsError, CloudOpsResult, FaultKind};
pub use types::{
    BucketConfiguration, CreateBucketRequest, CreateGroupMembershipRequest, CreateGroupRequest,
    CreateUserRequest, CreatedGroup, CreatedMembership, CreatedUser, HeadBucketRequest,
    InvocationResult, MemberId, ModelSummary, ObjectBody, ObjectLocation, Operation,
    PutObjectRequest, Response,
};
