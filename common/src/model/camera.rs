use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    WaitingForApproval,
    PendingSetup,
    RunningNormal,
    Failed,
    SomethingFailed,
}

impl ProcessingStatus {
    /// Status of a freshly added camera. Cameras of unapproved organizations
    /// can be configured but are not processed until approval.
    pub fn initial(organization_approved: bool) -> Self {
        if organization_approved {
            ProcessingStatus::PendingSetup
        } else {
            ProcessingStatus::WaitingForApproval
        }
    }

    /// The value stored in the `processingStatus` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStatus::WaitingForApproval => "waiting_for_approval",
            ProcessingStatus::PendingSetup => "pending_setup",
            ProcessingStatus::RunningNormal => "running_normal",
            ProcessingStatus::Failed => "failed",
            ProcessingStatus::SomethingFailed => "something_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub camera_name: String,
    pub rtsp_url: String,
    #[serde(default)]
    pub rtsp_username: Option<String>,
    #[serde(default)]
    pub rtsp_password: Option<String>,
    pub organization_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub current_config_id: Option<String>,
    pub processing_status: ProcessingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_gcs_object_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_status_follows_approval() {
        assert_eq!(ProcessingStatus::initial(true), ProcessingStatus::PendingSetup);
        assert_eq!(ProcessingStatus::initial(false), ProcessingStatus::WaitingForApproval);
    }

    #[test]
    fn statuses_use_the_stored_spelling() {
        for status in [
            ProcessingStatus::WaitingForApproval,
            ProcessingStatus::PendingSetup,
            ProcessingStatus::RunningNormal,
            ProcessingStatus::Failed,
            ProcessingStatus::SomethingFailed,
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), status.as_str());
        }
    }
}
