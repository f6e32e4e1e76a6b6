use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::{FamilyStore, StoreError, StoreResult};
use crate::models::{Family, FamilyMembership};

/// Store backed by the managed database platform's PostgREST-style HTTP
/// interface. Reads filter by column; acceptance goes through one stored
/// procedure so the status flip and profile link commit in one transaction.
pub struct RestFamilyStore {
    http: Client,
    base_url: String,
    service_key: String,
}

impl RestFamilyStore {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        what: &str,
    ) -> StoreResult<T> {
        let response = self
            .http
            .get(format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(filters)
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(|e| StoreError::Internal(format!("database request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Database select on {} failed ({}): {}", table, status, body);
            return Err(StoreError::Internal(format!(
                "database returned status {}",
                status
            )));
        }

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Internal(format!("unreadable database response: {}", e)))?;

        debug!("Select on {} matched {} row(s)", table, rows.len());
        if rows.is_empty() {
            return Err(StoreError::NotFound(what.to_string()));
        }
        Ok(rows.remove(0))
    }
}

#[async_trait]
impl FamilyStore for RestFamilyStore {
    async fn get_family(&self, family_id: &str) -> StoreResult<Family> {
        self.select_one(
            "families",
            &[("id", format!("eq.{}", family_id))],
            &format!("family {}", family_id),
        )
        .await
    }

    async fn get_pending_membership(
        &self,
        family_id: &str,
        email: &str,
    ) -> StoreResult<FamilyMembership> {
        self.select_one(
            "family_members",
            &[
                ("family_id", format!("eq.{}", family_id)),
                ("email", format!("eq.{}", email)),
                ("status", "eq.pending".to_string()),
            ],
            &format!("pending membership for {} in {}", email, family_id),
        )
        .await
    }

    async fn accept_membership(
        &self,
        family_id: &str,
        email: &str,
        user_id: &str,
    ) -> StoreResult<FamilyMembership> {
        let response = self
            .http
            .post(format!("{}/rest/v1/rpc/accept_family_invite", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({
                "p_family_id": family_id,
                "p_email": email,
                "p_user_id": user_id,
            }))
            .send()
            .await
            .map_err(|e| StoreError::Internal(format!("database request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("accept_family_invite failed ({}): {}", status, body);
            return Err(match status {
                StatusCode::NOT_FOUND => {
                    StoreError::NotFound(format!("membership for {} in {}", email, family_id))
                }
                StatusCode::CONFLICT => {
                    StoreError::Conflict("invitation has already been accepted".to_string())
                }
                _ => StoreError::Internal(format!("database returned status {}", status)),
            });
        }

        // The procedure returns the updated membership row.
        let mut rows: Vec<FamilyMembership> = response
            .json()
            .await
            .map_err(|e| StoreError::Internal(format!("unreadable database response: {}", e)))?;
        if rows.is_empty() {
            return Err(StoreError::Internal(
                "accept_family_invite returned no row".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }
}
