use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Family, FamilyMembership};

pub mod memory;
pub mod rest;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Calling contract against the family/membership database collaborator.
/// Acceptance is one atomic operation: status flip and profile link commit
/// together or not at all.
#[async_trait]
pub trait FamilyStore: Send + Sync {
    async fn get_family(&self, family_id: &str) -> StoreResult<Family>;

    /// The pending membership an invite token refers to.
    async fn get_pending_membership(
        &self,
        family_id: &str,
        email: &str,
    ) -> StoreResult<FamilyMembership>;

    /// Marks the membership accepted with a timestamp and links the
    /// accepting user's profile to the family. A membership that is no
    /// longer pending yields `Conflict`.
    async fn accept_membership(
        &self,
        family_id: &str,
        email: &str,
        user_id: &str,
    ) -> StoreResult<FamilyMembership>;
}
