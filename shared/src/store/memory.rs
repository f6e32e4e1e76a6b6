use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FamilyStore, StoreError, StoreResult};
use crate::models::{now_str, Family, FamilyMembership, MembershipStatus};

#[derive(Default)]
struct Inner {
    families: HashMap<String, Family>,
    memberships: HashMap<String, FamilyMembership>,
    // user_id -> family_id profile link
    profiles: HashMap<String, String>,
}

/// In-memory store used by tests and local runs. All three maps live under
/// one lock so acceptance mutates status and profile link atomically.
#[derive(Default)]
pub struct InMemoryFamilyStore {
    inner: RwLock<Inner>,
}

impl InMemoryFamilyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_family(&self, family: Family) {
        self.inner
            .write()
            .await
            .families
            .insert(family.id.clone(), family);
    }

    pub async fn insert_membership(&self, membership: FamilyMembership) {
        self.inner
            .write()
            .await
            .memberships
            .insert(membership.id.clone(), membership);
    }

    pub async fn get_membership(&self, id: &str) -> Option<FamilyMembership> {
        self.inner.read().await.memberships.get(id).cloned()
    }

    /// The family a user's profile is linked to, if any.
    pub async fn profile_family(&self, user_id: &str) -> Option<String> {
        self.inner.read().await.profiles.get(user_id).cloned()
    }
}

#[async_trait]
impl FamilyStore for InMemoryFamilyStore {
    async fn get_family(&self, family_id: &str) -> StoreResult<Family> {
        self.inner
            .read()
            .await
            .families
            .get(family_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("family {}", family_id)))
    }

    async fn get_pending_membership(
        &self,
        family_id: &str,
        email: &str,
    ) -> StoreResult<FamilyMembership> {
        self.inner
            .read()
            .await
            .memberships
            .values()
            .find(|m| {
                m.family_id == family_id
                    && m.email == email
                    && m.status == MembershipStatus::Pending
            })
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound(format!("pending membership for {} in {}", email, family_id))
            })
    }

    async fn accept_membership(
        &self,
        family_id: &str,
        email: &str,
        user_id: &str,
    ) -> StoreResult<FamilyMembership> {
        let mut inner = self.inner.write().await;

        let membership = inner
            .memberships
            .values_mut()
            .find(|m| m.family_id == family_id && m.email == email)
            .ok_or_else(|| {
                StoreError::NotFound(format!("membership for {} in {}", email, family_id))
            })?;

        if membership.status != MembershipStatus::Pending {
            return Err(StoreError::Conflict(
                "invitation has already been accepted".to_string(),
            ));
        }

        membership.status = MembershipStatus::Accepted;
        membership.accepted_at = Some(now_str());
        membership.user_id = Some(user_id.to_string());
        let accepted = membership.clone();

        inner
            .profiles
            .insert(user_id.to_string(), family_id.to_string());

        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> Family {
        Family {
            id: "fam-1".to_string(),
            name: "Smiths".to_string(),
            created_by: "owner-1".to_string(),
            created_at: now_str(),
        }
    }

    fn pending_membership() -> FamilyMembership {
        FamilyMembership {
            id: "mem-1".to_string(),
            family_id: "fam-1".to_string(),
            email: "a@b.com".to_string(),
            role: "member".to_string(),
            status: MembershipStatus::Pending,
            invited_at: now_str(),
            accepted_at: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn accept_flips_status_and_links_profile() {
        let store = InMemoryFamilyStore::new();
        store.insert_family(family()).await;
        store.insert_membership(pending_membership()).await;

        let accepted = store
            .accept_membership("fam-1", "a@b.com", "user-9")
            .await
            .unwrap();
        assert_eq!(accepted.status, MembershipStatus::Accepted);
        assert!(accepted.accepted_at.is_some());
        assert_eq!(accepted.user_id.as_deref(), Some("user-9"));

        assert_eq!(
            store.profile_family("user-9").await.as_deref(),
            Some("fam-1")
        );
    }

    #[tokio::test]
    async fn repeated_accept_is_rejected() {
        let store = InMemoryFamilyStore::new();
        store.insert_family(family()).await;
        store.insert_membership(pending_membership()).await;

        store
            .accept_membership("fam-1", "a@b.com", "user-9")
            .await
            .unwrap();
        let err = store
            .accept_membership("fam-1", "a@b.com", "user-10")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // First acceptance is untouched by the rejected retry
        let membership = store.get_membership("mem-1").await.unwrap();
        assert_eq!(membership.user_id.as_deref(), Some("user-9"));
    }

    #[tokio::test]
    async fn missing_membership_is_not_found() {
        let store = InMemoryFamilyStore::new();
        store.insert_family(family()).await;

        let err = store
            .get_pending_membership("fam-1", "nobody@b.com")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
