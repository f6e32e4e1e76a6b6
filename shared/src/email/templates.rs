//! Invitation email bodies. Pure string rendering, no I/O: absent optional
//! fields degrade to placeholder phrasing instead of failing.

use crate::models::InviteRequest;

pub fn invite_subject(inviter_name: Option<&str>) -> String {
    format!(
        "{} invited you to join their family on NourishPlate",
        display_name(inviter_name)
    )
}

/// HTML body. The call-to-action link appears twice: once as a styled
/// button anchor and once as raw text for clients that strip markup.
pub fn render_invite_html(invite: &InviteRequest) -> String {
    let inviter = display_name(invite.inviter_name.as_deref());
    let inviter_email = invite
        .inviter_email
        .as_deref()
        .map(|email| format!(" ({email})"))
        .unwrap_or_default();
    let role = display_role(invite.role.as_deref());
    let link = &invite.invite_link;
    let family = &invite.family_name;

    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="margin:0;padding:0;background-color:#f4f9f4;font-family:Arial,Helvetica,sans-serif;">
    <div style="max-width:560px;margin:0 auto;padding:32px 24px;">
      <div style="background-color:#ffffff;border-radius:12px;padding:32px;border:1px solid #dcefdc;">
        <h1 style="color:#2e7d32;font-size:22px;margin-top:0;">🥗 You're invited to NourishPlate!</h1>
        <p style="color:#333333;font-size:15px;line-height:1.6;">
          {inviter}{inviter_email} has invited you to join the
          <strong>{family}</strong> family as a <strong>{role}</strong>.
        </p>
        <p style="color:#333333;font-size:15px;line-height:1.6;">
          NourishPlate helps families plan healthy meals together.
        </p>
        <p style="text-align:center;margin:28px 0;">
          <a href="{link}"
             style="background-color:#2e7d32;color:#ffffff;padding:12px 28px;border-radius:6px;text-decoration:none;font-size:15px;display:inline-block;">
            Accept Invitation
          </a>
        </p>
        <p style="color:#777777;font-size:13px;line-height:1.6;">
          Or copy this link into your browser:<br>
          {link}
        </p>
        <p style="color:#999999;font-size:12px;">
          If you weren't expecting this invitation, you can safely ignore this email.
        </p>
      </div>
    </div>
  </body>
</html>"#
    )
}

/// Plain-text alternative body.
pub fn render_invite_text(invite: &InviteRequest) -> String {
    let inviter = display_name(invite.inviter_name.as_deref());
    let inviter_email = invite
        .inviter_email
        .as_deref()
        .map(|email| format!(" ({email})"))
        .unwrap_or_default();
    let role = display_role(invite.role.as_deref());

    format!(
        "You're invited to NourishPlate!\n\n\
         {inviter}{inviter_email} has invited you to join the {family} family as a {role}.\n\n\
         NourishPlate helps families plan healthy meals together.\n\n\
         Accept the invitation here:\n{link}\n\n\
         If you weren't expecting this invitation, you can safely ignore this email.\n",
        family = invite.family_name,
        link = invite.invite_link,
    )
}

fn display_name(inviter_name: Option<&str>) -> &str {
    match inviter_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => "Someone",
    }
}

fn display_role(role: Option<&str>) -> &str {
    match role {
        Some(role) if !role.trim().is_empty() => role,
        _ => "member",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite() -> InviteRequest {
        InviteRequest {
            inviter_name: Some("Ana".to_string()),
            inviter_email: Some("ana@example.com".to_string()),
            family_name: "Smiths".to_string(),
            invite_email: "a@b.com".to_string(),
            role: Some("parent".to_string()),
            invite_link: "https://x/accept-invite?token=abc".to_string(),
        }
    }

    #[test]
    fn html_contains_the_link_twice() {
        let html = render_invite_html(&invite());
        assert_eq!(html.matches("https://x/accept-invite?token=abc").count(), 2);
        assert!(html.contains("Smiths"));
        assert!(html.contains("parent"));
        assert!(html.contains("Ana (ana@example.com)"));
    }

    #[test]
    fn text_contains_the_link() {
        let text = render_invite_text(&invite());
        assert!(text.contains("https://x/accept-invite?token=abc"));
        assert!(text.contains("Smiths"));
    }

    #[test]
    fn absent_fields_degrade_to_placeholders() {
        let mut anonymous = invite();
        anonymous.inviter_name = None;
        anonymous.inviter_email = None;
        anonymous.role = None;

        assert_eq!(
            invite_subject(None),
            "Someone invited you to join their family on NourishPlate"
        );
        let html = render_invite_html(&anonymous);
        assert!(html.contains("Someone has invited you"));
        assert!(!html.contains("()"));
        assert!(html.contains("member"));

        let text = render_invite_text(&anonymous);
        assert!(text.contains("Someone has invited you"));
    }

    #[test]
    fn subject_uses_inviter_name() {
        assert_eq!(
            invite_subject(Some("Ana")),
            "Ana invited you to join their family on NourishPlate"
        );
    }
}
