//! Identity provisioning facade. Faults propagate unmodified.

use crate::unexpected;
use cloudops_core::{
    CloudOpsResult, CreateGroupMembershipRequest, CreateGroupRequest, CreateUserRequest,
    CreatedGroup, CreatedMembership, CreatedUser, MemberId, Operation, Response,
};
use cloudops_provider::Collaborator;

pub struct IdentityFacade<'a> {
    client: &'a dyn Collaborator,
}

impl<'a> IdentityFacade<'a> {
    pub fn new(client: &'a dyn Collaborator) -> Self {
        Self { client }
    }

    /// Creates a user with a single work email address.
    pub async fn create_user(
        &self,
        identity_store_id: &str,
        user_name: &str,
        email: &str,
        given_name: &str,
        family_name: &str,
    ) -> CloudOpsResult<CreatedUser> {
        tracing::info!(identity_store_id, user_name, "creating user");
        let req =
            CreateUserRequest::new(identity_store_id, user_name, email, given_name, family_name);

        match self.client.invoke(Operation::CreateUser(req)).await? {
            Response::UserCreated(user) => Ok(user),
            other => Err(unexpected("CreateUser", &other)),
        }
    }

    pub async fn create_group(
        &self,
        identity_store_id: &str,
        display_name: &str,
        description: &str,
    ) -> CloudOpsResult<CreatedGroup> {
        tracing::info!(identity_store_id, display_name, "creating group");
        let req = CreateGroupRequest {
            identity_store_id: identity_store_id.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
        };

        match self.client.invoke(Operation::CreateGroup(req)).await? {
            Response::GroupCreated(group) => Ok(group),
            other => Err(unexpected("CreateGroup", &other)),
        }
    }

    /// Both ids must already exist remotely; nothing is checked locally.
    pub async fn assign_user_to_group(
        &self,
        identity_store_id: &str,
        group_id: &str,
        user_id: &str,
    ) -> CloudOpsResult<CreatedMembership> {
        tracing::info!(identity_store_id, group_id, user_id, "creating group membership");
        let req = CreateGroupMembershipRequest {
            identity_store_id: identity_store_id.to_string(),
            group_id: group_id.to_string(),
            member_id: MemberId {
                user_id: user_id.to_string(),
            },
        };

        match self.client.invoke(Operation::CreateGroupMembership(req)).await? {
            Response::MembershipCreated(membership) => Ok(membership),
            other => Err(unexpected("CreateGroupMembership", &other)),
        }
    }

    /// Alias of [`assign_user_to_group`](Self::assign_user_to_group); same argument order.
    pub async fn assign_group_to_user(
        &self,
        identity_store_id: &str,
        group_id: &str,
        user_id: &str,
    ) -> CloudOpsResult<CreatedMembership> {
        self.assign_user_to_group(identity_store_id, group_id, user_id)
            .await
    }
}
