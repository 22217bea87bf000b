use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use crate::model;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

// Error shape documented for the external /api/v1 surface. Third-party
// integrators see `error` plus optional per-field `details`, not the
// dashboard's title/message pair.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiV1Error {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub event: String,
    pub timestamp: DateTime<Utc>,
    pub data: model::Booking,
}

// Returned exactly once, at creation time. Afterwards only the prefix is
// retrievable.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatedApiKey {
    pub api_key: model::PublishApiKey,
    pub key: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWebhook {
    pub webhook: model::PublishWebhook,
    pub secret: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvitedUser {
    pub user: model::PublishUser,
    pub temporary_password: String,
    pub invitation_token: String,
    pub invitation_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    Missing,
    Invalid,
    Db,
}

// Optional ?organizationId= query used by super admins to pick a tenant
// context on org-scoped endpoints.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct OrgQuery {
    pub organization_id: Option<i32>,
}
