//! Object storage facade.
//!
//! Bucket names are never validated locally and payloads are never chunked;
//! whatever the service rejects comes back as its own fault.

use crate::unexpected;
use cloudops_core::{
    BucketConfiguration, CloudOpsResult, CreateBucketRequest, FacadeConfig, FaultKind,
    HeadBucketRequest, ObjectBody, ObjectLocation, Operation, PutObjectRequest, Response,
};
use cloudops_provider::Collaborator;

pub struct StorageFacade<'a> {
    client: &'a dyn Collaborator,
    config: &'a FacadeConfig,
}

impl<'a> StorageFacade<'a> {
    pub fn new(client: &'a dyn Collaborator, config: &'a FacadeConfig) -> Self {
        Self { client, config }
    }

    pub async fn create_bucket(&self, name: &str) -> CloudOpsResult<bool> {
        let create_bucket_configuration =
            self.config
                .bucket_location_constraint()
                .map(|region| BucketConfiguration {
                    location_constraint: region.to_string(),
                });
        let req = CreateBucketRequest {
            bucket: name.to_string(),
            create_bucket_configuration,
        };

        match self.client.invoke(Operation::CreateBucket(req)).await? {
            Response::BucketCreated { location } => {
                tracing::info!(bucket = name, location = ?location, "bucket created");
                Ok(true)
            }
            other => Err(unexpected("CreateBucket", &other)),
        }
    }

    pub async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        content: impl Into<Vec<u8>>,
    ) -> CloudOpsResult<bool> {
        let body = content.into();
        let size = body.len();
        let req = PutObjectRequest {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
        };

        match self.client.invoke(Operation::PutObject(req)).await? {
            Response::ObjectPut { .. } => {
                tracing::info!(bucket, key, size, "object uploaded");
                Ok(true)
            }
            other => Err(unexpected("PutObject", &other)),
        }
    }

    /// Reads a whole object back.
    pub async fn read_object(&self, bucket: &str, key: &str) -> CloudOpsResult<ObjectBody> {
        let req = ObjectLocation {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };

        match self.client.invoke(Operation::GetObject(req)).await? {
            Response::Object(object) => {
                tracing::debug!(bucket, key, size = object.body.len(), "object read");
                Ok(object)
            }
            other => Err(unexpected("GetObject", &other)),
        }
    }

    /// `false` only for a not-found fault; anything else propagates.
    pub async fn bucket_exists(&self, name: &str) -> CloudOpsResult<bool> {
        let req = HeadBucketRequest {
            bucket: name.to_string(),
        };

        match self.client.invoke(Operation::HeadBucket(req)).await {
            Ok(Response::BucketExists) => Ok(true),
            Ok(other) => Err(unexpected("HeadBucket", &other)),
            Err(fault) if fault.kind() == FaultKind::NotFound => Ok(false),
            Err(fault) => Err(fault.into()),
        }
    }
}
