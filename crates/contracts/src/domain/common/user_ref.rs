use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expanded many-to-one reference to a Record Store user.
///
/// The Record Store returns whatever fields the query requested, so
/// everything except the id is optional. `first_name` carries the partner
/// company name and `last_name` the team-leader name in this deployment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserRef {
    /// `"회사명 팀장명"` display form, `-` when both parts are absent.
    pub fn display_name(&self) -> String {
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            "-".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let r = UserRef {
            first_name: Some("클린업".into()),
            last_name: Some("김팀장".into()),
            ..Default::default()
        };
        assert_eq!(r.display_name(), "클린업 김팀장");
        assert_eq!(UserRef::default().display_name(), "-");
    }
}
