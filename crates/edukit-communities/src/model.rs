//! Community entities

use chrono::{DateTime, Utc};
use edukit_model::{CommunityId, DiscussionId, KeyStage, ReplyId, Subject};
use edukit_store::Entity;
use serde::{Deserialize, Serialize};

/// Group of teachers around a subject or key stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Id
    pub id: CommunityId,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Subject focus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    /// Key stage focus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_stage: Option<KeyStage>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creator; always a member
    pub owner_id: String,
    /// Members in join order, owner first
    pub members: Vec<String>,
    /// Hidden from public listings in the client
    #[serde(default)]
    pub is_private: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Community {
    /// Check membership
    #[inline]
    #[must_use]
    pub fn is_member(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// Case-insensitive match on name, description or tags
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

impl Entity for Community {
    type Id = CommunityId;
    const KIND: &'static str = "community";

    fn id(&self) -> Option<CommunityId> {
        Some(self.id)
    }
}

/// Reply within a discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    /// Id
    pub id: ReplyId,
    /// Author member id
    pub author_id: String,
    /// Text
    pub body: String,
    /// Posting time
    pub created_at: DateTime<Utc>,
}

/// Discussion thread inside a community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    /// Id
    pub id: DiscussionId,
    /// Owning community
    pub community_id: CommunityId,
    /// Author member id
    pub author_id: String,
    /// Title
    pub title: String,
    /// Opening post
    pub body: String,
    /// Replies in posting order
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// Posting time
    pub created_at: DateTime<Utc>,
}

impl Entity for Discussion {
    type Id = DiscussionId;
    const KIND: &'static str = "discussion";

    fn id(&self) -> Option<DiscussionId> {
        Some(self.id)
    }
}
