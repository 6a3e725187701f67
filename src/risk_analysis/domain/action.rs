use serde::Serialize;

/// The one prioritized remediation step recommended for a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    UpdateSecurity,
    Replace,
    PlanMigration,
    UpdateMajor,
    UpdateSafe,
    ReviewManual,
    Monitor,
}

impl ActionType {
    /// Urgency rank: 1 is most urgent, 4 is least.
    pub fn priority(self) -> u8 {
        match self {
            ActionType::UpdateSecurity | ActionType::Replace => 1,
            ActionType::PlanMigration | ActionType::UpdateMajor => 2,
            ActionType::UpdateSafe | ActionType::ReviewManual => 3,
            ActionType::Monitor => 4,
        }
    }
}

/// A recommended action together with its priority and display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub priority: u8,
    pub display_text: String,
}

impl RecommendedAction {
    pub fn new(action_type: ActionType, display_text: impl Into<String>) -> Self {
        Self {
            action_type,
            priority: action_type.priority(),
            display_text: display_text.into(),
        }
    }
}
