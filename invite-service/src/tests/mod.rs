use std::sync::Arc;

use axum::Router;

use nourishplate_shared::auth::init_test_auth;
use nourishplate_shared::config::SenderProfile;
use nourishplate_shared::email::EmailClient;
use nourishplate_shared::models::{now_str, Family, FamilyMembership, MembershipStatus};
use nourishplate_shared::store::memory::InMemoryFamilyStore;
use nourishplate_shared::test_utils::test_logging::init_test_logging;

use crate::routes::{create_router_with_state, AppState};


pub const TEST_APP_BASE_URL: &str = "https://app.nourishplate.test";

/// Builds a router backed by the in-memory store, with the email client
/// pointed at the given (usually mocked) provider URL.
fn create_test_app(email_provider_url: &str) -> (Router, Arc<InMemoryFamilyStore>) {
    init_test_logging();
    init_test_auth();

    let store = Arc::new(InMemoryFamilyStore::new());
    let email = EmailClient::with_base_url(
        email_provider_url.to_string(),
        "test-api-key".to_string(),
        SenderProfile {
            from: "NourishPlate <invites@nourishplate.com>".to_string(),
            reply_to: None,
        },
    );

    let app = create_router_with_state(AppState {
        store: store.clone(),
        email,
        app_base_url: TEST_APP_BASE_URL.to_string(),
    });

    (app, store)
}

async fn seed_pending_invite(store: &InMemoryFamilyStore) {
    store
        .insert_family(Family {
            id: "fam-1".to_string(),
            name: "Smiths".to_string(),
            created_by: "owner-1".to_string(),
            created_at: now_str(),
        })
        .await;
    store
        .insert_membership(FamilyMembership {
            id: "mem-1".to_string(),
            family_id: "fam-1".to_string(),
            email: "a@b.com".to_string(),
            role: "member".to_string(),
            status: MembershipStatus::Pending,
            invited_at: now_str(),
            accepted_at: None,
            user_id: None,
        })
        .await;
}
