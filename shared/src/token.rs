use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

/// Reserved separator between the family id and the invited email inside a
/// token. Family ids are UUIDs and email addresses never carry a bare colon,
/// so the pair splits back unambiguously.
const TOKEN_DELIMITER: char = ':';

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid invitation token")]
    InvalidToken,
}

/// The pair an invite link carries, recovered from the token on acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitePayload {
    pub family_id: String,
    pub email: String,
}

/// Encodes a family id and target email into the opaque URL-safe token the
/// invite link carries.
pub fn encode_invite_token(family_id: &str, email: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{family_id}{TOKEN_DELIMITER}{email}"))
}

/// Decodes an invite token. The decoded text must split into exactly two
/// non-empty segments or the token is rejected.
pub fn decode_invite_token(token: &str) -> Result<InvitePayload, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|_| TokenError::InvalidToken)?;
    let decoded = String::from_utf8(bytes).map_err(|_| TokenError::InvalidToken)?;

    let parts: Vec<&str> = decoded.split(TOKEN_DELIMITER).collect();
    match parts.as_slice() {
        [family_id, email] if !family_id.is_empty() && !email.is_empty() => Ok(InvitePayload {
            family_id: family_id.to_string(),
            email: email.to_string(),
        }),
        _ => Err(TokenError::InvalidToken),
    }
}

/// Builds the acceptance URL the invite email points at.
pub fn invite_link(app_base_url: &str, family_id: &str, email: &str) -> String {
    format!(
        "{}/accept-invite?token={}",
        app_base_url.trim_end_matches('/'),
        encode_invite_token(family_id, email)
    )
}
