use super::{CompletionModel, CompletionRequest, ModelError, PromptKind};
use async_trait::async_trait;
use serde_json::{json, Value};

pub const PLACEHOLDER_TARGETS: &str =
    "people, vehicles, packages, doors, windows, unauthorized activity";
pub const PLACEHOLDER_GROUP_ALERT_EVENTS: &str =
    "security: unauthorized zone entry, security: after-hours activity, safety: potential trespassing";
pub const PLACEHOLDER_SCENE: &str = "The image shows a busy warehouse floor. Several pallets are stacked with boxes. A forklift is visible in the background near a loading bay. A worker is walking across the floor near the center of the frame.";

/// Stand-in used when no model API key is configured. Answers every prompt
/// with a fixed, well-formed payload.
#[derive(Debug, Default, Clone)]
pub struct SimulatedModel;

#[async_trait]
impl CompletionModel for SimulatedModel {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn generate(&self, request: CompletionRequest) -> Result<Value, ModelError> {
        Ok(match request.kind {
            PromptKind::DetectionTargets => json!({ "suggestedTargets": PLACEHOLDER_TARGETS }),
            PromptKind::AlertEvents => json!({
                "suggestedAlerts": [
                    {
                        "name": "Suspicious Activity",
                        "condition": "Person loitering in a restricted area for an extended period"
                    },
                    {
                        "name": "Vehicle Entered Zone",
                        "condition": "A vehicle is detected entering the monitored zone without authorization"
                    },
                    {
                        "name": "Object Removed",
                        "condition": "A tracked object (e.g., package) is removed from its designated area"
                    }
                ]
            }),
            PromptKind::GroupAlertEvents => {
                json!({ "suggestedAlertEvents": PLACEHOLDER_GROUP_ALERT_EVENTS })
            }
            PromptKind::SceneDescription => json!({ "description": PLACEHOLDER_SCENE }),
            PromptKind::CameraFeedAnalysis => json!({
                "eventDetected": false,
                "alertMessage": "The described event was not detected in the camera feed."
            }),
        })
    }
}
