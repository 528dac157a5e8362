//! DTOs for the admin endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::LinkSummary;

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkSummary>,
}

/// Identifies the link to delete by its numeric id.
#[derive(Debug, Deserialize)]
pub struct DeleteLinkRequest {
    pub id: i64,
}
