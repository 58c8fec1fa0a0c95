//! Community operations over the storage interface

use crate::error::CommunityError;
use crate::input::{
    AddReply, CommunityRef, CreateCommunity, CreateDiscussion, Deleted, ListCommunities,
    Membership, UpdateCommunity,
};
use crate::model::{Community, Discussion, Reply};
use chrono::Utc;
use edukit_model::{CommunityId, DiscussionId, ReplyId};
use edukit_store::{InMemoryRepository, Repository, StoreError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Default upper bound on community names, in characters
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;

/// Communities configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunitiesConfig {
    /// JSON seed file loaded at startup
    pub seed: Option<PathBuf>,
    /// Longest accepted community name
    pub max_name_length: usize,
}

impl Default for CommunitiesConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

impl CommunitiesConfig {
    /// With seed file
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed = Some(path.into());
        self
    }

    /// With name length limit
    #[inline]
    #[must_use]
    pub fn with_max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = max;
        self
    }
}

/// Community and discussion operations
pub struct CommunityService {
    communities: Arc<dyn Repository<Community>>,
    discussions: Arc<dyn Repository<Discussion>>,
    config: CommunitiesConfig,
}

impl std::fmt::Debug for CommunityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommunityService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn not_found_as(err: StoreError, mapped: CommunityError) -> CommunityError {
    if err.is_not_found() {
        mapped
    } else {
        CommunityError::Store(err)
    }
}

impl CommunityService {
    /// Service over explicit repositories
    #[must_use]
    pub fn new(
        communities: Arc<dyn Repository<Community>>,
        discussions: Arc<dyn Repository<Discussion>>,
        config: CommunitiesConfig,
    ) -> Self {
        Self {
            communities,
            discussions,
            config,
        }
    }

    /// Service over fresh in-memory repositories
    #[must_use]
    pub fn in_memory(config: CommunitiesConfig) -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<Community>::new()),
            Arc::new(InMemoryRepository::<Discussion>::new()),
            config,
        )
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CommunitiesConfig {
        &self.config
    }

    async fn community(&self, id: CommunityId) -> Result<Community, CommunityError> {
        self.communities
            .get(&id)
            .await?
            .ok_or(CommunityError::CommunityNotFound(id))
    }

    async fn discussion(&self, id: DiscussionId) -> Result<Discussion, CommunityError> {
        self.discussions
            .get(&id)
            .await?
            .ok_or(CommunityError::DiscussionNotFound(id))
    }

    fn check_name(&self, name: &str) -> Result<String, CommunityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CommunityError::invalid("name must not be blank"));
        }
        let len = name.chars().count();
        if len > self.config.max_name_length {
            return Err(CommunityError::invalid(format!(
                "name is {} characters, limit is {}",
                len, self.config.max_name_length
            )));
        }
        Ok(name.to_string())
    }

    fn require_member(community: &Community, member: &str) -> Result<(), CommunityError> {
        if community.is_member(member) {
            Ok(())
        } else {
            Err(CommunityError::NotAMember {
                community: community.id,
                member: member.to_string(),
            })
        }
    }

    /// Communities matching every given filter, in creation order
    ///
    /// # Errors
    /// Storage failures.
    pub async fn list_communities(
        &self,
        filter: ListCommunities,
    ) -> Result<Vec<Community>, CommunityError> {
        let all = self.communities.list().await?;
        Ok(all
            .into_iter()
            .filter(|c| filter.subject.map_or(true, |s| c.subject == Some(s)))
            .filter(|c| filter.key_stage.map_or(true, |k| c.key_stage == Some(k)))
            .filter(|c| filter.search.as_deref().map_or(true, |q| c.matches_search(q)))
            .collect())
    }

    /// Load one community
    ///
    /// # Errors
    /// `CommunityNotFound` if absent.
    pub async fn get_community(&self, input: CommunityRef) -> Result<Community, CommunityError> {
        self.community(input.community_id).await
    }

    /// Create a community; the owner becomes its first member
    ///
    /// # Errors
    /// `InvalidInput` for a blank or overlong name.
    pub async fn create_community(
        &self,
        input: CreateCommunity,
    ) -> Result<Community, CommunityError> {
        let name = self.check_name(&input.name)?;
        let owner = input.owner_id.trim().to_string();
        if owner.is_empty() {
            return Err(CommunityError::invalid("ownerId must not be blank"));
        }
        let now = Utc::now();
        let community = Community {
            id: CommunityId::new(),
            name,
            description: input.description,
            subject: input.subject,
            key_stage: input.key_stage,
            tags: input.tags,
            owner_id: owner.clone(),
            members: vec![owner],
            is_private: input.is_private,
            created_at: now,
            updated_at: now,
        };
        let saved = self.communities.insert(community).await?;
        tracing::info!("Created community {} '{}'", saved.id, saved.name);
        Ok(saved)
    }

    /// Change the given fields of a community
    ///
    /// # Errors
    /// `CommunityNotFound` if absent, `InvalidInput` for a bad name.
    pub async fn update_community(
        &self,
        input: UpdateCommunity,
    ) -> Result<Community, CommunityError> {
        let mut community = self.community(input.community_id).await?;
        if let Some(name) = &input.name {
            community.name = self.check_name(name)?;
        }
        if let Some(description) = input.description {
            community.description = description;
        }
        if input.subject.is_some() {
            community.subject = input.subject;
        }
        if input.key_stage.is_some() {
            community.key_stage = input.key_stage;
        }
        if let Some(tags) = input.tags {
            community.tags = tags;
        }
        if let Some(is_private) = input.is_private {
            community.is_private = is_private;
        }
        community.updated_at = Utc::now();
        let id = community.id;
        self.communities
            .update(community)
            .await
            .map_err(|e| not_found_as(e, CommunityError::CommunityNotFound(id)))
    }

    /// Delete a community and its discussions
    ///
    /// # Errors
    /// `CommunityNotFound` if absent.
    pub async fn delete_community(&self, input: CommunityRef) -> Result<Deleted, CommunityError> {
        let id = input.community_id;
        self.communities
            .delete(&id)
            .await
            .map_err(|e| not_found_as(e, CommunityError::CommunityNotFound(id)))?;

        let mut removed = 0;
        for d in self.discussions.list().await? {
            if d.community_id == id {
                self.discussions.delete(&d.id).await?;
                removed += 1;
            }
        }
        tracing::info!("Deleted community {} with {} discussion(s)", id, removed);
        Ok(Deleted {
            deleted: true,
            discussions_removed: removed,
        })
    }

    /// Add a member
    ///
    /// # Errors
    /// `CommunityNotFound` if absent, `AlreadyMember` on a repeat join.
    pub async fn join_community(&self, input: Membership) -> Result<Community, CommunityError> {
        let mut community = self.community(input.community_id).await?;
        let member = input.member_id.trim().to_string();
        if member.is_empty() {
            return Err(CommunityError::invalid("memberId must not be blank"));
        }
        if community.is_member(&member) {
            return Err(CommunityError::AlreadyMember {
                community: community.id,
                member,
            });
        }
        community.members.push(member);
        community.updated_at = Utc::now();
        Ok(self.communities.update(community).await?)
    }

    /// Remove a member; the owner cannot leave
    ///
    /// # Errors
    /// `CommunityNotFound`, `OwnerCannotLeave`, or `NotAMember`.
    pub async fn leave_community(&self, input: Membership) -> Result<Community, CommunityError> {
        let mut community = self.community(input.community_id).await?;
        let member = input.member_id.trim();
        if member == community.owner_id {
            return Err(CommunityError::OwnerCannotLeave(community.id));
        }
        Self::require_member(&community, member)?;
        community.members.retain(|m| m != member);
        community.updated_at = Utc::now();
        Ok(self.communities.update(community).await?)
    }

    /// Discussions of a community, oldest first
    ///
    /// # Errors
    /// `CommunityNotFound` if absent.
    pub async fn list_discussions(
        &self,
        input: CommunityRef,
    ) -> Result<Vec<Discussion>, CommunityError> {
        let id = self.community(input.community_id).await?.id;
        Ok(self
            .discussions
            .list()
            .await?
            .into_iter()
            .filter(|d| d.community_id == id)
            .collect())
    }

    /// Open a discussion
    ///
    /// # Errors
    /// `CommunityNotFound` if absent, `NotAMember` if the author has not joined.
    pub async fn create_discussion(
        &self,
        input: CreateDiscussion,
    ) -> Result<Discussion, CommunityError> {
        let community = self.community(input.community_id).await?;
        Self::require_member(&community, input.author_id.trim())?;
        let discussion = Discussion {
            id: DiscussionId::new(),
            community_id: community.id,
            author_id: input.author_id.trim().to_string(),
            title: input.title,
            body: input.body,
            replies: Vec::new(),
            created_at: Utc::now(),
        };
        let saved = self.discussions.insert(discussion).await?;
        tracing::info!("Discussion {} opened in {}", saved.id, community.id);
        Ok(saved)
    }

    /// Reply to a discussion
    ///
    /// # Errors
    /// `DiscussionNotFound` if absent, `NotAMember` if the author has not
    /// joined the discussion's community.
    pub async fn add_reply(&self, input: AddReply) -> Result<Discussion, CommunityError> {
        let mut discussion = self.discussion(input.discussion_id).await?;
        let community = self.community(discussion.community_id).await?;
        let author = input.author_id.trim().to_string();
        Self::require_member(&community, &author)?;
        discussion.replies.push(Reply {
            id: ReplyId::new(),
            author_id: author,
            body: input.body,
            created_at: Utc::now(),
        });
        let id = discussion.id;
        self.discussions
            .update(discussion)
            .await
            .map_err(|e| not_found_as(e, CommunityError::DiscussionNotFound(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edukit_model::{KeyStage, Subject};

    fn service() -> CommunityService {
        CommunityService::in_memory(CommunitiesConfig::default().with_max_name_length(20))
    }

    fn create(name: &str, owner: &str) -> CreateCommunity {
        CreateCommunity {
            name: name.into(),
            description: "desc".into(),
            owner_id: owner.into(),
            subject: None,
            key_stage: None,
            tags: Vec::new(),
            is_private: false,
        }
    }

    fn membership(id: CommunityId, member: &str) -> Membership {
        Membership {
            community_id: id,
            member_id: member.into(),
        }
    }

    #[tokio::test]
    async fn owner_is_first_member() {
        let svc = service();
        let c = svc.create_community(create(" Science Club ", "t-1")).await.unwrap();
        assert_eq!(c.name, "Science Club");
        assert_eq!(c.members, vec!["t-1".to_string()]);
    }

    #[tokio::test]
    async fn overlong_name_is_rejected() {
        let svc = service();
        let err = svc
            .create_community(create("A name far too long for the limit", "t-1"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn filters_combine() {
        let svc = service();
        let mut maths = create("Maths KS2", "t-1");
        maths.subject = Some(Subject::Mathematics);
        maths.key_stage = Some(KeyStage::Ks2);
        let mut maths_ks3 = create("Maths KS3", "t-2");
        maths_ks3.subject = Some(Subject::Mathematics);
        maths_ks3.key_stage = Some(KeyStage::Ks3);
        svc.create_community(maths).await.unwrap();
        svc.create_community(maths_ks3).await.unwrap();
        svc.create_community(create("Art", "t-3")).await.unwrap();

        let found = svc
            .list_communities(ListCommunities {
                subject: Some(Subject::Mathematics),
                key_stage: Some(KeyStage::Ks3),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Maths KS3");

        let all = svc.list_communities(ListCommunities::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn join_twice_conflicts_and_owner_cannot_leave() {
        let svc = service();
        let c = svc.create_community(create("Club", "t-1")).await.unwrap();
        svc.join_community(membership(c.id, "t-2")).await.unwrap();

        let err = svc.join_community(membership(c.id, "t-2")).await.unwrap_err();
        assert_eq!(err.status_code(), 409);

        let err = svc.leave_community(membership(c.id, "t-1")).await.unwrap_err();
        assert_eq!(err, CommunityError::OwnerCannotLeave(c.id));

        let left = svc.leave_community(membership(c.id, "t-2")).await.unwrap();
        assert_eq!(left.members, vec!["t-1".to_string()]);

        let err = svc.leave_community(membership(c.id, "t-2")).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn discussions_require_membership() {
        let svc = service();
        let c = svc.create_community(create("Club", "t-1")).await.unwrap();
        let open = |author: &str| CreateDiscussion {
            community_id: c.id,
            author_id: author.into(),
            title: "Marking".into(),
            body: "How do you mark fractions work?".into(),
        };

        let err = svc.create_discussion(open("stranger")).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let d = svc.create_discussion(open("t-1")).await.unwrap();
        let err = svc
            .add_reply(AddReply {
                discussion_id: d.id,
                author_id: "stranger".into(),
                body: "hi".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        svc.join_community(membership(c.id, "t-2")).await.unwrap();
        let d = svc
            .add_reply(AddReply {
                discussion_id: d.id,
                author_id: "t-2".into(),
                body: "Peer marking works".into(),
            })
            .await
            .unwrap();
        assert_eq!(d.replies.len(), 1);
        assert_eq!(d.replies[0].author_id, "t-2");
    }

    #[tokio::test]
    async fn delete_removes_discussions() {
        let svc = service();
        let keep = svc.create_community(create("Keep", "t-1")).await.unwrap();
        let drop = svc.create_community(create("Drop", "t-1")).await.unwrap();
        for id in [keep.id, drop.id, drop.id] {
            svc.create_discussion(CreateDiscussion {
                community_id: id,
                author_id: "t-1".into(),
                title: "t".into(),
                body: "b".into(),
            })
            .await
            .unwrap();
        }

        let out = svc
            .delete_community(CommunityRef { community_id: drop.id })
            .await
            .unwrap();
        assert_eq!(out.discussions_removed, 2);

        let err = svc
            .list_discussions(CommunityRef { community_id: drop.id })
            .await
            .unwrap_err();
        assert_eq!(err, CommunityError::CommunityNotFound(drop.id));
        let kept = svc
            .list_discussions(CommunityRef { community_id: keep.id })
            .await
            .unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let svc = service();
        let c = svc.create_community(create("Club", "t-1")).await.unwrap();
        let updated = svc
            .update_community(UpdateCommunity {
                community_id: c.id,
                name: None,
                description: Some("New".into()),
                subject: Some(Subject::Music),
                key_stage: None,
                tags: None,
                is_private: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Club");
        assert_eq!(updated.description, "New");
        assert_eq!(updated.subject, Some(Subject::Music));
        assert!(updated.is_private);
        assert_eq!(updated.created_at, c.created_at);
    }
}
