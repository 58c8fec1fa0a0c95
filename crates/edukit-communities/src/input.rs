//! Typed command inputs
//!
//! Each input derives its JSON Schema; the command table checks raw JSON
//! against it before deserializing. Unknown fields are rejected.

use edukit_model::{CommunityId, DiscussionId, KeyStage, Subject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Filters for `list_communities`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListCommunities {
    /// Only communities with this subject
    #[serde(default)]
    pub subject: Option<Subject>,
    /// Only communities with this key stage
    #[serde(default)]
    pub key_stage: Option<KeyStage>,
    /// Text search over name, description and tags
    #[serde(default)]
    pub search: Option<String>,
}

/// Input naming a single community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommunityRef {
    /// Community
    pub community_id: CommunityId,
}

/// Input for `create_community`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCommunity {
    /// Display name
    #[schemars(length(min = 1))]
    pub name: String,
    /// Description
    pub description: String,
    /// Creator, becomes the first member
    #[schemars(length(min = 1))]
    pub owner_id: String,
    /// Subject focus
    #[serde(default)]
    pub subject: Option<Subject>,
    /// Key stage focus
    #[serde(default)]
    pub key_stage: Option<KeyStage>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Private flag
    #[serde(default)]
    pub is_private: bool,
}

/// Input for `update_community`; absent fields stay unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCommunity {
    /// Community
    pub community_id: CommunityId,
    /// New name
    #[serde(default)]
    #[schemars(length(min = 1))]
    pub name: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New subject focus
    #[serde(default)]
    pub subject: Option<Subject>,
    /// New key stage focus
    #[serde(default)]
    pub key_stage: Option<KeyStage>,
    /// Replacement tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// New private flag
    #[serde(default)]
    pub is_private: Option<bool>,
}

/// Input for `join_community` and `leave_community`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Membership {
    /// Community
    pub community_id: CommunityId,
    /// Joining or leaving user
    #[schemars(length(min = 1))]
    pub member_id: String,
}

/// Input for `create_discussion`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDiscussion {
    /// Community
    pub community_id: CommunityId,
    /// Author, must be a member
    #[schemars(length(min = 1))]
    pub author_id: String,
    /// Title
    #[schemars(length(min = 1))]
    pub title: String,
    /// Opening post
    #[schemars(length(min = 1))]
    pub body: String,
}

/// Input for `add_reply`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddReply {
    /// Discussion
    pub discussion_id: DiscussionId,
    /// Author, must be a member of the discussion's community
    #[schemars(length(min = 1))]
    pub author_id: String,
    /// Text
    #[schemars(length(min = 1))]
    pub body: String,
}

/// Output of `delete_community`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    /// Always true on success
    pub deleted: bool,
    /// Discussions removed with the community
    pub discussions_removed: usize,
}
