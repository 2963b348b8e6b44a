//! Collaborator backed by the AWS SDK (Bedrock, Identity Store, S3).

use crate::Collaborator;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_identitystore::types::{Email, MemberId, Name};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use cloudops_core::{
    ClientFault, CloudOpsError, CloudOpsResult, CreateBucketRequest, CreateGroupMembershipRequest,
    CreateGroupRequest, CreateUserRequest, CreatedGroup, CreatedMembership, CreatedUser,
    FacadeConfig, HeadBucketRequest, ModelSummary, ObjectBody, ObjectLocation, Operation,
    PutObjectRequest, Response,
};

/// Talks to the real services using credentials from the SDK's default chain.
///
/// ```ignore
/// let config = FacadeConfig::new().with_region("eu-west-1");
/// let aws = AwsCollaborator::connect(&config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AwsCollaborator {
    bedrock: aws_sdk_bedrock::Client,
    identity: aws_sdk_identitystore::Client,
    s3: aws_sdk_s3::Client,
    region: Option<String>,
}

impl AwsCollaborator {
    /// Loads SDK defaults, overriding the region when the config names one.
    pub async fn connect(config: &FacadeConfig) -> CloudOpsResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let Some(region) = sdk_config.region() else {
            return Err(CloudOpsError::Config(
                "no AWS region configured; pass --region or set AWS_REGION".into(),
            ));
        };
        tracing::info!(region = %region, "aws clients configured");

        Ok(Self::from_sdk_config(&sdk_config))
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self {
            bedrock: aws_sdk_bedrock::Client::new(sdk_config),
            identity: aws_sdk_identitystore::Client::new(sdk_config),
            s3: aws_sdk_s3::Client::new(sdk_config),
            region: sdk_config.region().map(ToString::to_string),
        }
    }

    /// Region the SDK resolved, whether from config, env, or profile.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    async fn list_foundation_models(&self) -> Result<Response, ClientFault> {
        let output = self
            .bedrock
            .list_foundation_models()
            .send()
            .await
            .map_err(|e| sdk_fault("ListFoundationModels", e))?;

        let models = output
            .model_summaries()
            .iter()
            .map(|m| ModelSummary {
                model_id: m.model_id().to_string(),
                model_name: m.model_name().map(str::to_owned),
                provider_name: m.provider_name().map(str::to_owned),
                input_modalities: m
                    .input_modalities()
                    .iter()
                    .map(|x| x.as_str().to_owned())
                    .collect(),
                output_modalities: m
                    .output_modalities()
                    .iter()
                    .map(|x| x.as_str().to_owned())
                    .collect(),
            })
            .collect();

        Ok(Response::ModelSummaries(models))
    }

    async fn create_user(&self, req: CreateUserRequest) -> Result<Response, ClientFault> {
        let name = Name::builder()
            .given_name(req.name.given_name)
            .family_name(req.name.family_name)
            .build();

        let mut call = self
            .identity
            .create_user()
            .identity_store_id(req.identity_store_id)
            .user_name(req.user_name)
            .name(name);
        for email in req.emails {
            call = call.emails(Email::builder().value(email.value).r#type(email.kind).build());
        }

        let output = call.send().await.map_err(|e| sdk_fault("CreateUser", e))?;
        Ok(Response::UserCreated(CreatedUser {
            user_id: output.user_id().to_string(),
        }))
    }

    async fn create_group(&self, req: CreateGroupRequest) -> Result<Response, ClientFault> {
        let output = self
            .identity
            .create_group()
            .identity_store_id(req.identity_store_id)
            .display_name(req.display_name)
            .description(req.description)
            .send()
            .await
            .map_err(|e| sdk_fault("CreateGroup", e))?;

        Ok(Response::GroupCreated(CreatedGroup {
            group_id: output.group_id().to_string(),
        }))
    }

    async fn create_group_membership(
        &self,
        req: CreateGroupMembershipRequest,
    ) -> Result<Response, ClientFault> {
        let output = self
            .identity
            .create_group_membership()
            .identity_store_id(req.identity_store_id)
            .group_id(req.group_id)
            .member_id(MemberId::UserId(req.member_id.user_id))
            .send()
            .await
            .map_err(|e| sdk_fault("CreateGroupMembership", e))?;

        Ok(Response::MembershipCreated(CreatedMembership {
            membership_id: output.membership_id().to_string(),
        }))
    }

    async fn create_bucket(&self, req: CreateBucketRequest) -> Result<Response, ClientFault> {
        let mut call = self.s3.create_bucket().bucket(req.bucket);
        if let Some(cfg) = req.create_bucket_configuration {
            call = call.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(
                        cfg.location_constraint.as_str(),
                    ))
                    .build(),
            );
        }

        let output = call.send().await.map_err(|e| sdk_fault("CreateBucket", e))?;
        Ok(Response::BucketCreated {
            location: output.location().map(str::to_owned),
        })
    }

    async fn put_object(&self, req: PutObjectRequest) -> Result<Response, ClientFault> {
        let output = self
            .s3
            .put_object()
            .bucket(req.bucket)
            .key(req.key)
            .body(ByteStream::from(req.body))
            .send()
            .await
            .map_err(|e| sdk_fault("PutObject", e))?;

        Ok(Response::ObjectPut {
            e_tag: output.e_tag().map(str::to_owned),
        })
    }

    async fn get_object(&self, req: ObjectLocation) -> Result<Response, ClientFault> {
        let output = self
            .s3
            .get_object()
            .bucket(req.bucket)
            .key(req.key)
            .send()
            .await
            .map_err(|e| sdk_fault("GetObject", e))?;

        let declared_length = output.content_length();
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| ClientFault::new("GetObject", "BodyReadError", e.to_string()))?
            .into_bytes()
            .to_vec();

        let content_length = declared_length
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(body.len() as u64);
        Ok(Response::Object(ObjectBody {
            body,
            content_length,
        }))
    }

    async fn head_bucket(&self, req: HeadBucketRequest) -> Result<Response, ClientFault> {
        match self.s3.head_bucket().bucket(&req.bucket).send().await {
            Ok(_) => Ok(Response::BucketExists),
            // HEAD responses carry no error body, so the code has to come from the variant.
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => {
                Err(ClientFault::new(
                    "HeadBucket",
                    "NotFound",
                    format!("bucket {} not found", req.bucket),
                ))
            }
            Err(e) => Err(sdk_fault("HeadBucket", e)),
        }
    }
}

#[async_trait]
impl Collaborator for AwsCollaborator {
    async fn invoke(&self, operation: Operation) -> Result<Response, ClientFault> {
        tracing::debug!(operation = operation.name(), "sending request");

        match operation {
            Operation::ListFoundationModels => self.list_foundation_models().await,
            Operation::CreateUser(req) => self.create_user(req).await,
            Operation::CreateGroup(req) => self.create_group(req).await,
            Operation::CreateGroupMembership(req) => self.create_group_membership(req).await,
            Operation::CreateBucket(req) => self.create_bucket(req).await,
            Operation::PutObject(req) => self.put_object(req).await,
            Operation::GetObject(req) => self.get_object(req).await,
            Operation::HeadBucket(req) => self.head_bucket(req).await,
        }
    }
}

/// Flattens an SDK error into a fault, keeping the service's error code.
fn sdk_fault<E>(operation: &'static str, err: E) -> ClientFault
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let code = err.code().unwrap_or("Unknown").to_string();
    let message = err
        .message()
        .map(str::to_owned)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    ClientFault::new(operation, code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sdk_config(region: Option<&'static str>) -> SdkConfig {
        let mut builder = SdkConfig::builder().behavior_version(BehaviorVersion::latest());
        if let Some(region) = region {
            builder = builder.region(Region::new(region));
        }
        builder.build()
    }

    #[test]
    fn exposes_region_resolved_by_sdk() {
        let aws = AwsCollaborator::from_sdk_config(&sdk_config(Some("eu-west-1")));
        assert_eq!(aws.region(), Some("eu-west-1"));
    }

    #[test]
    fn unresolved_region_is_none() {
        let aws = AwsCollaborator::from_sdk_config(&sdk_config(None));
        assert_eq!(aws.region(), None);
    }
}
