use serde::{Deserialize, Serialize};

// Request DTOs
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteLinkRequest {
    pub family_id: String,
    pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct AcceptInviteRequest {
    pub token: String,
}

// Response DTOs
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InviteLinkResponse {
    pub success: bool,
    pub token: String,
    pub invite_link: String,
}

// The send endpoint answers with the shared EmailSendResult contract.
