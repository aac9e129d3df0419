use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role names accepted for back-office access.
pub const ADMIN_ROLES: [&str; 2] = ["Administrator", "관리자"];

/// POST /api/system/auth/login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Tokens issued by the Identity Provider, passed through to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in milliseconds.
    #[serde(default)]
    pub expires: Option<i64>,
}

/// The authenticated operator, as reported by the Identity Provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
}

impl CurrentUser {
    /// Back-office access is limited to administrator roles.
    pub fn is_admin(&self) -> bool {
        self.role_name
            .as_deref()
            .map(|r| ADMIN_ROLES.contains(&r))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_gate() {
        let mut user = CurrentUser {
            id: Uuid::nil(),
            email: None,
            first_name: None,
            last_name: None,
            role_name: Some("관리자".into()),
        };
        assert!(user.is_admin());
        user.role_name = Some("Partner".into());
        assert!(!user.is_admin());
        user.role_name = None;
        assert!(!user.is_admin());
    }
}
