//! Volunteer endpoints.

use crate::{ApiClient, ApiResult, ErrorKind};
use serde_json::Value;
use tracing::debug;

/// Result of the volunteer status probe.
#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerStatus {
    pub is_volunteer: bool,
    /// The volunteer record, when one exists.
    pub data: Option<Value>,
}

impl ApiClient {
    /// Check whether a user is an approved volunteer.
    ///
    /// `GET /voluntario/usuario/{id}` answers 404 for users who are not
    /// volunteers; that is an expected outcome here, not an error.
    pub async fn volunteer_status(&self, user_id: i64) -> ApiResult<VolunteerStatus> {
        match self
            .get_json::<Value>(&format!("/voluntario/usuario/{}", user_id))
            .await
        {
            Ok(data) => Ok(VolunteerStatus {
                is_volunteer: true,
                data: Some(data),
            }),
            Err(err) if err.kind == ErrorKind::NotFound => {
                debug!(user_id, "User is not a volunteer");
                Ok(VolunteerStatus {
                    is_volunteer: false,
                    data: None,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Apply to become a volunteer.
    pub async fn become_volunteer(&self, dados: &Value) -> ApiResult<Value> {
        self.post_json("/voluntario/tornar", dados).await
    }
}
