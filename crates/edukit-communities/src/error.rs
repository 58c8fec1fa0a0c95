//! Community errors and their status codes

use edukit_model::{CommunityId, DiscussionId};
use edukit_store::StoreError;
use thiserror::Error;

/// Command failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommunityError {
    /// No handler registered under the name
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Input rejected by schema or field rules
    #[error("invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// No community with this id
    #[error("community not found: {0}")]
    CommunityNotFound(CommunityId),

    /// No discussion with this id
    #[error("discussion not found: {0}")]
    DiscussionNotFound(DiscussionId),

    /// Acting user is not a member of the community
    #[error("{member} is not a member of community {community}")]
    NotAMember {
        /// Community
        community: CommunityId,
        /// Acting user
        member: String,
    },

    /// Join of an existing member
    #[error("{member} is already a member of community {community}")]
    AlreadyMember {
        /// Community
        community: CommunityId,
        /// Joining user
        member: String,
    },

    /// The owner tried to leave
    #[error("the owner cannot leave community {0}")]
    OwnerCannotLeave(CommunityId),

    /// Seed data could not be loaded
    #[error("seed data: {0}")]
    Seed(String),

    /// Storage failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Output could not be encoded
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl CommunityError {
    /// HTTP-style status code
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotAMember { .. } => 403,
            Self::UnknownOperation(_) | Self::CommunityNotFound(_) | Self::DiscussionNotFound(_) => {
                404
            }
            Self::AlreadyMember { .. } | Self::OwnerCannotLeave(_) => 409,
            Self::Store(StoreError::NotFound { .. }) => 404,
            Self::Store(StoreError::Duplicate { .. }) => 409,
            Self::Store(_) | Self::Seed(_) | Self::Encoding(_) => 500,
        }
    }

    /// Check if the caller can fix the request
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(vec![message.into()])
    }
}
