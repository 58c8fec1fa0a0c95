//! Seed data
//!
//! A JSON array of communities loaded at startup. Each entry goes through
//! the same rules as `create_community`; extra members are joined after.

use crate::error::CommunityError;
use crate::input::{CreateCommunity, Membership};
use crate::model::Community;
use crate::service::CommunityService;
use edukit_model::{KeyStage, Subject};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One seeded community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCommunity {
    /// Display name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Owner
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
    /// Members besides the owner
    #[serde(default)]
    pub members: Vec<String>,
}

/// Parse seed JSON
///
/// # Errors
/// `Seed` if the text is not a JSON array of communities.
pub fn parse_seed(text: &str) -> Result<Vec<SeedCommunity>, CommunityError> {
    serde_json::from_str(text).map_err(|e| CommunityError::Seed(e.to_string()))
}

/// Read and parse a seed file
///
/// # Errors
/// `Seed` if the file cannot be read or parsed.
pub fn load_seed(path: &Path) -> Result<Vec<SeedCommunity>, CommunityError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CommunityError::Seed(format!("{}: {e}", path.display())))?;
    parse_seed(&text)
}

impl CommunityService {
    /// Create seeded communities in order
    ///
    /// # Errors
    /// First failing create or join; earlier entries stay stored.
    pub async fn seed(&self, entries: Vec<SeedCommunity>) -> Result<Vec<Community>, CommunityError> {
        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut community = self
                .create_community(CreateCommunity {
                    name: entry.name,
                    description: entry.description,
                    owner_id: entry.owner_id,
                    subject: entry.subject,
                    key_stage: entry.key_stage,
                    tags: entry.tags,
                    is_private: entry.is_private,
                })
                .await?;
            for member in entry.members {
                if community.is_member(&member) {
                    continue;
                }
                community = self
                    .join_community(Membership {
                        community_id: community.id,
                        member_id: member,
                    })
                    .await?;
            }
            created.push(community);
        }
        tracing::info!("Seeded {} communities", created.len());
        Ok(created)
    }
}
