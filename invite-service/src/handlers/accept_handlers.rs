use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use log::info;

use nourishplate_shared::store::FamilyStore;
use nourishplate_shared::token::decode_invite_token;

use crate::error::Result;
use crate::models::AcceptInviteRequest;
use crate::routes::AppState;

/// POST /invites/accept
/// Decodes the invitation token, checks the referenced family and pending
/// membership, and performs the atomic accept: status flips to accepted and
/// the signed-in user's profile is linked to the family in one store
/// operation. A membership that already got accepted yields 409.
pub async fn accept_invite<S>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user_id): Extension<String>,
    Json(request): Json<AcceptInviteRequest>,
) -> Result<Json<serde_json::Value>>
where
    S: FamilyStore,
{
    let payload = decode_invite_token(&request.token)?;

    let family = state.store.get_family(&payload.family_id).await?;
    state
        .store
        .get_pending_membership(&family.id, &payload.email)
        .await?;

    let membership = state
        .store
        .accept_membership(&family.id, &payload.email, &user_id)
        .await?;

    info!(
        "User {} accepted invitation to family {} as {}",
        user_id, family.id, membership.role
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "familyId": family.id,
        "familyName": family.name,
        "role": membership.role,
        "acceptedAt": membership.accepted_at,
        "message": format!("Welcome to the {} family!", family.name),
    })))
}
