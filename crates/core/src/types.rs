//! Request and response shapes exchanged with the remote API.
//!
//! Field names serialize exactly as the services spell them, so a request
//! dumped to JSON reads like the service's own API reference.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// One remote call. Every facade operation maps to exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListFoundationModels,
    CreateUser(CreateUserRequest),
    CreateGroup(CreateGroupRequest),
    CreateGroupMembership(CreateGroupMembershipRequest),
    CreateBucket(CreateBucketRequest),
    PutObject(PutObjectRequest),
    GetObject(ObjectLocation),
    HeadBucket(HeadBucketRequest),
}

impl Operation {
    /// The service's name for this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListFoundationModels => "ListFoundationModels",
            Self::CreateUser(_) => "CreateUser",
            Self::CreateGroup(_) => "CreateGroup",
            Self::CreateGroupMembership(_) => "CreateGroupMembership",
            Self::CreateBucket(_) => "CreateBucket",
            Self::PutObject(_) => "PutObject",
            Self::GetObject(_) => "GetObject",
            Self::HeadBucket(_) => "HeadBucket",
        }
    }
}

/// Successful answer to an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    ModelSummaries(Vec<ModelSummary>),
    UserCreated(CreatedUser),
    GroupCreated(CreatedGroup),
    MembershipCreated(CreatedMembership),
    BucketCreated { location: Option<String> },
    ObjectPut { e_tag: Option<String> },
    Object(ObjectBody),
    BucketExists,
}

impl Response {
    /// Variant name, for diagnostics when a caller gets the wrong one.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelSummaries(_) => "ModelSummaries",
            Self::UserCreated(_) => "UserCreated",
            Self::GroupCreated(_) => "GroupCreated",
            Self::MembershipCreated(_) => "MembershipCreated",
            Self::BucketCreated { .. } => "BucketCreated",
            Self::ObjectPut { .. } => "ObjectPut",
            Self::Object(_) => "Object",
            Self::BucketExists => "BucketExists",
        }
    }
}

// ---------------------------------------------------------------------------
// Model hosting
// ---------------------------------------------------------------------------

/// One entry from ListFoundationModels. Only `model_id` is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_modalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_modalities: Vec<String>,
}

impl ModelSummary {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            model_name: None,
            provider_name: None,
            input_modalities: Vec::new(),
            output_modalities: Vec::new(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider_name = Some(provider.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub text: String,
}

impl InvocationResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// An empty result is what a degraded invocation returns.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Identity store
// ---------------------------------------------------------------------------

/// Email type the identity store records for provisioned users.
pub const WORK_EMAIL_TYPE: &str = "Work";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserRequest {
    pub identity_store_id: String,
    pub user_name: String,
    pub name: PersonName,
    pub emails: Vec<EmailAddress>,
}

impl CreateUserRequest {
    pub fn new(
        identity_store_id: impl Into<String>,
        user_name: impl Into<String>,
        email: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        Self {
            identity_store_id: identity_store_id.into(),
            user_name: user_name.into(),
            name: PersonName {
                given_name: given_name.into(),
                family_name: family_name.into(),
            },
            emails: vec![EmailAddress {
                value: email.into(),
                kind: WORK_EMAIL_TYPE.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonName {
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailAddress {
    pub value: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGroupRequest {
    pub identity_store_id: String,
    pub display_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGroupMembershipRequest {
    pub identity_store_id: String,
    pub group_id: String,
    pub member_id: MemberId,
}

/// Only user members are supported; groups cannot nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberId {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedUser {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedGroup {
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedMembership {
    pub membership_id: String,
}

// ---------------------------------------------------------------------------
// Object storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBucketRequest {
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_bucket_configuration: Option<BucketConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketConfiguration {
    pub location_constraint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutObjectRequest {
    pub bucket: String,
    pub key: String,
    /// Sent as the raw request body, never as a JSON field.
    #[serde(skip)]
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeadBucketRequest {
    pub bucket: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectBody {
    pub body: Vec<u8>,
    pub content_length: u64,
}

impl ObjectBody {
    pub fn new(body: Vec<u8>) -> Self {
        let content_length = body.len() as u64;
        Self {
            body,
            content_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_user_uses_identity_store_field_names() {
        let req = CreateUserRequest::new("d-123", "jdoe", "jdoe@example.com", "Jane", "Doe");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "IdentityStoreId": "d-123",
                "UserName": "jdoe",
                "Name": { "GivenName": "Jane", "FamilyName": "Doe" },
                "Emails": [{ "Value": "jdoe@example.com", "Type": "Work" }],
            })
        );
    }

    #[test]
    fn membership_nests_user_under_member_id() {
        let req = CreateGroupMembershipRequest {
            identity_store_id: "d-123".into(),
            group_id: "g-1".into(),
            member_id: MemberId {
                user_id: "u-1".into(),
            },
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "IdentityStoreId": "d-123",
                "GroupId": "g-1",
                "MemberId": { "UserId": "u-1" },
            })
        );
    }

    #[test]
    fn put_object_body_stays_off_the_json() {
        let req = PutObjectRequest {
            bucket: "b".into(),
            key: "k".into(),
            body: b"payload".to_vec(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "Bucket": "b", "Key": "k" })
        );
    }

    #[test]
    fn model_summary_reads_bedrock_shape() {
        let summary: ModelSummary = serde_json::from_value(json!({
            "modelId": "anthropic.claude-v2",
            "providerName": "Anthropic",
            "inputModalities": ["TEXT"],
            "responseStreamingSupported": true,
        }))
        .unwrap();
        assert_eq!(summary.model_id, "anthropic.claude-v2");
        assert_eq!(summary.provider_name.as_deref(), Some("Anthropic"));
        assert_eq!(summary.input_modalities, vec!["TEXT"]);
    }

    #[test]
    fn bucket_without_constraint_omits_configuration() {
        let req = CreateBucketRequest {
            bucket: "logs".into(),
            create_bucket_configuration: None,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "Bucket": "logs" }));
    }

    #[test]
    fn bucket_with_constraint_nests_configuration() {
        let req = CreateBucketRequest {
            bucket: "logs".into(),
            create_bucket_configuration: Some(BucketConfiguration {
                location_constraint: "eu-central-1".into(),
            }),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "Bucket": "logs",
                "CreateBucketConfiguration": { "LocationConstraint": "eu-central-1" },
            })
        );
    }

    #[test]
    fn create_group_uses_identity_store_field_names() {
        let req = CreateGroupRequest {
            identity_store_id: "d-123".into(),
            display_name: "Admins".into(),
            description: "Platform admins".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "IdentityStoreId": "d-123",
                "DisplayName": "Admins",
                "Description": "Platform admins",
            })
        );
    }
}
