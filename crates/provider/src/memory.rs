//! In-process collaborator that mimics the remote services' observable rules.
//!
//! Used by the test suites and the CLI's `--in-memory` mode. It enforces what
//! the real services enforce from the caller's point of view: S3 bucket
//! naming, duplicate resources, referential checks on memberships. Error
//! codes match the ones the services return.

use crate::Collaborator;
use async_trait::async_trait;
use cloudops_core::{
    ClientFault, CreateBucketRequest, CreateGroupMembershipRequest, CreateGroupRequest,
    CreateUserRequest, CreatedGroup, CreatedMembership, CreatedUser, HeadBucketRequest,
    ModelSummary, ObjectBody, ObjectLocation, Operation, PutObjectRequest, Response,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

const MAX_USER_NAME_LEN: usize = 128;
const MAX_DISPLAY_NAME_LEN: usize = 1024;

/// Well-known Bedrock model ids, as `(model_id, provider)`.
const SAMPLE_MODELS: &[(&str, &str)] = &[
    ("anthropic.claude-v2", "Anthropic"),
    ("anthropic.claude-instant-v1", "Anthropic"),
    ("ai21.j2-ultra-v1", "AI21 Labs"),
    ("amazon.titan-text-express-v1", "Amazon"),
    ("meta.llama2-13b-chat-v1", "Meta"),
];

/// A small catalog of real Bedrock model ids.
pub fn sample_catalog() -> Vec<ModelSummary> {
    SAMPLE_MODELS
        .iter()
        .map(|(id, provider)| ModelSummary::new(*id).with_provider(*provider))
        .collect()
}

#[derive(Default)]
struct State {
    models: Vec<ModelSummary>,
    listing_fault: Option<ClientFault>,
    stores: HashMap<String, IdentityStore>,
    buckets: HashMap<String, HashMap<String, Vec<u8>>>,
    calls: Vec<&'static str>,
    last_create_bucket: Option<CreateBucketRequest>,
}

#[derive(Default)]
struct IdentityStore {
    /// user_id -> user_name
    users: HashMap<String, String>,
    /// group_id -> display_name
    groups: HashMap<String, String>,
    /// membership_id -> (group_id, user_id)
    memberships: HashMap<String, (String, String)>,
}

#[derive(Default)]
pub struct InMemoryCollaborator {
    state: Mutex<State>,
}

impl InMemoryCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_models(self, models: impl IntoIterator<Item = ModelSummary>) -> Self {
        self.state().models = models.into_iter().collect();
        self
    }

    /// Makes every subsequent ListFoundationModels call fail with `fault`.
    pub fn fail_listing_with(&self, fault: ClientFault) {
        self.state().listing_fault = Some(fault);
    }

    pub fn clear_listing_fault(&self) {
        self.state().listing_fault = None;
    }

    /// Names of every operation invoked so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    /// The most recent CreateBucket request, as sent.
    pub fn last_create_bucket(&self) -> Option<CreateBucketRequest> {
        self.state().last_create_bucket.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Collaborator for InMemoryCollaborator {
    async fn invoke(&self, operation: Operation) -> Result<Response, ClientFault> {
        let mut state = self.state();
        state.calls.push(operation.name());

        match operation {
            Operation::ListFoundationModels => state.list_foundation_models(),
            Operation::CreateUser(req) => state.create_user(req),
            Operation::CreateGroup(req) => state.create_group(req),
            Operation::CreateGroupMembership(req) => state.create_group_membership(req),
            Operation::CreateBucket(req) => state.create_bucket(req),
            Operation::PutObject(req) => state.put_object(req),
            Operation::GetObject(req) => state.get_object(req),
            Operation::HeadBucket(req) => state.head_bucket(req),
        }
    }
}

impl State {
    fn list_foundation_models(&self) -> Result<Response, ClientFault> {
        if let Some(fault) = &self.listing_fault {
            return Err(fault.clone());
        }
        Ok(Response::ModelSummaries(self.models.clone()))
    }

    fn store(
        &mut self,
        op: &str,
        identity_store_id: &str,
    ) -> Result<&mut IdentityStore, ClientFault> {
        if identity_store_id.trim().is_empty() {
            return Err(validation(op, "IdentityStoreId must not be empty"));
        }
        Ok(self.stores.entry(identity_store_id.to_string()).or_default())
    }

    fn create_user(&mut self, req: CreateUserRequest) -> Result<Response, ClientFault> {
        const OP: &str = "CreateUser";
        if !is_valid_user_name(&req.user_name) {
            return Err(validation(
                OP,
                format!("UserName '{}' failed to satisfy constraint", req.user_name),
            ));
        }

        let store = self.store(OP, &req.identity_store_id)?;
        if store.users.values().any(|name| *name == req.user_name) {
            return Err(ClientFault::new(
                OP,
                "ConflictException",
                format!("Duplicate UserName '{}'", req.user_name),
            ));
        }

        let user_id = uuid::Uuid::new_v4().to_string();
        store.users.insert(user_id.clone(), req.user_name);
        Ok(Response::UserCreated(CreatedUser { user_id }))
    }

    fn create_group(&mut self, req: CreateGroupRequest) -> Result<Response, ClientFault> {
        const OP: &str = "CreateGroup";
        if req.display_name.trim().is_empty()
            || req.display_name.chars().count() > MAX_DISPLAY_NAME_LEN
        {
            return Err(validation(
                OP,
                format!("DisplayName '{}' failed to satisfy constraint", req.display_name),
            ));
        }

        let store = self.store(OP, &req.identity_store_id)?;
        if store.groups.values().any(|existing| *existing == req.display_name) {
            return Err(ClientFault::new(
                OP,
                "ConflictException",
                format!("Duplicate GroupDisplayName '{}'", req.display_name),
            ));
        }

        let group_id = uuid::Uuid::new_v4().to_string();
        store.groups.insert(group_id.clone(), req.display_name);
        Ok(Response::GroupCreated(CreatedGroup { group_id }))
    }

    fn create_group_membership(
        &mut self,
        req: CreateGroupMembershipRequest,
    ) -> Result<Response, ClientFault> {
        const OP: &str = "CreateGroupMembership";
        let store = self.store(OP, &req.identity_store_id)?;
        let user_id = req.member_id.user_id;

        if !store.groups.contains_key(&req.group_id) {
            return Err(not_found(OP, "GROUP", &req.group_id));
        }
        if !store.users.contains_key(&user_id) {
            return Err(not_found(OP, "USER", &user_id));
        }
        if store
            .memberships
            .values()
            .any(|(g, u)| *g == req.group_id && *u == user_id)
        {
            return Err(ClientFault::new(
                OP,
                "ConflictException",
                format!("Member {user_id} already belongs to group {}", req.group_id),
            ));
        }

        let membership_id = uuid::Uuid::new_v4().to_string();
        store
            .memberships
            .insert(membership_id.clone(), (req.group_id, user_id));
        Ok(Response::MembershipCreated(CreatedMembership { membership_id }))
    }

    fn create_bucket(&mut self, req: CreateBucketRequest) -> Result<Response, ClientFault> {
        const OP: &str = "CreateBucket";
        self.last_create_bucket = Some(req.clone());
        if !is_valid_bucket_name(&req.bucket) {
            return Err(ClientFault::new(
                OP,
                "InvalidBucketName",
                "The specified bucket is not valid.",
            ));
        }
        if self.buckets.contains_key(&req.bucket) {
            return Err(ClientFault::new(
                OP,
                "BucketAlreadyOwnedByYou",
                "Your previous request to create the named bucket succeeded and you already own it.",
            ));
        }

        let location = format!("/{}", req.bucket);
        self.buckets.insert(req.bucket, HashMap::new());
        Ok(Response::BucketCreated {
            location: Some(location),
        })
    }

    fn put_object(&mut self, req: PutObjectRequest) -> Result<Response, ClientFault> {
        let Some(objects) = self.buckets.get_mut(&req.bucket) else {
            return Err(no_such_bucket("PutObject"));
        };
        objects.insert(req.key, req.body);
        Ok(Response::ObjectPut { e_tag: None })
    }

    fn get_object(&self, req: ObjectLocation) -> Result<Response, ClientFault> {
        let Some(objects) = self.buckets.get(&req.bucket) else {
            return Err(no_such_bucket("GetObject"));
        };
        let Some(body) = objects.get(&req.key) else {
            return Err(ClientFault::new(
                "GetObject",
                "NoSuchKey",
                "The specified key does not exist.",
            ));
        };
        Ok(Response::Object(ObjectBody::new(body.clone())))
    }

    fn head_bucket(&self, req: HeadBucketRequest) -> Result<Response, ClientFault> {
        if self.buckets.contains_key(&req.bucket) {
            Ok(Response::BucketExists)
        } else {
            Err(ClientFault::new(
                "HeadBucket",
                "NotFound",
                format!("bucket {} not found", req.bucket),
            ))
        }
    }
}

fn validation(op: &str, message: impl Into<String>) -> ClientFault {
    ClientFault::new(op, "ValidationException", message)
}

fn not_found(op: &str, resource: &str, id: &str) -> ClientFault {
    ClientFault::new(
        op,
        "ResourceNotFoundException",
        format!("{resource} not found: {id}"),
    )
}

fn no_such_bucket(op: &str) -> ClientFault {
    ClientFault::new(op, "NoSuchBucket", "The specified bucket does not exist")
}

/// Letters, marks, symbols, digits and punctuation only; no whitespace.
fn is_valid_user_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_USER_NAME_LEN
        && name.chars().all(|c| !c.is_whitespace() && !c.is_control())
}

/// S3 general-purpose bucket naming rules.
fn is_valid_bucket_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if !(3..=63).contains(&bytes.len()) {
        return false;
    }
    let allowed = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'.' || *b == b'-';
    if !bytes.iter().all(allowed) {
        return false;
    }
    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !edge_ok(bytes[0]) || !edge_ok(bytes[bytes.len() - 1]) {
        return false;
    }
    if name.contains("..") {
        return false;
    }
    // Must not be formatted as an IPv4 address.
    name.parse::<std::net::Ipv4Addr>().is_err()
}
