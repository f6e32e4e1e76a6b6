use std::sync::Arc;

use axum::{extract::State, Json};
use log::info;

use nourishplate_shared::models::{is_valid_email, EmailSendResult, InviteRequest};
use nourishplate_shared::store::FamilyStore;
use nourishplate_shared::token::{encode_invite_token, invite_link};

use crate::error::{AppError, Result};
use crate::models::{CreateInviteLinkRequest, InviteLinkResponse};
use crate::routes::AppState;

/// POST /invites/send
/// Renders and dispatches one invitation email. Single attempt, no retry;
/// calling it twice sends two emails.
pub async fn send_invite<S>(
    State(state): State<Arc<AppState<S>>>,
    Json(invite): Json<InviteRequest>,
) -> Result<Json<EmailSendResult>>
where
    S: FamilyStore,
{
    let message_id = state.email.send_invite(&invite).await?;

    Ok(Json(EmailSendResult {
        success: true,
        message_id: Some(message_id),
        message: Some("Invitation email sent".to_string()),
        error: None,
    }))
}

/// POST /invites/link
/// Mints the opaque token and acceptance link for a family/email pair, so
/// the codec has a single writer on the server side.
pub async fn create_invite_link<S>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateInviteLinkRequest>,
) -> Result<Json<InviteLinkResponse>>
where
    S: FamilyStore,
{
    if request.family_id.trim().is_empty() {
        return Err(AppError::bad_request("familyId is required".to_string()));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::bad_request(format!(
            "email is not a valid address: {}",
            request.email
        )));
    }

    let token = encode_invite_token(&request.family_id, &request.email);
    let link = invite_link(&state.app_base_url, &request.family_id, &request.email);

    info!(
        "Minted invite link for family {} -> {}",
        request.family_id, request.email
    );

    Ok(Json(InviteLinkResponse {
        success: true,
        token,
        invite_link: link,
    }))
}
