use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Collection, YnFlag};

/// Role row from the Record Store role directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRole {
    pub id: Uuid,
    pub name: String,
}

/// Partner as shown in the directory: a Record Store user merged with the
/// active region from `usr_dtl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: Uuid,
    /// Company name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Team-leader name.
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    /// Active region free-text, merged from `usr_dtl`.
    #[serde(default)]
    pub actv_rgon: Option<String>,
}

/// `usr_dtl` row: per-user detail the user directory itself cannot hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(default)]
    pub actv_rgon: Option<String>,
    #[serde(default)]
    pub del_yn: Option<YnFlag>,
}

impl Collection for UserDetail {
    const NAME: &'static str = "usr_dtl";
}

/// Directory search filter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartnerListQuery {
    #[serde(default)]
    pub role: Option<Uuid>,
    /// Company-name substring.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Team-leader substring.
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Write payload for registering or editing a partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub email: String,
    /// Only set on create or on an explicit password change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Company name.
    pub first_name: String,
    /// Team-leader name.
    pub last_name: String,
    pub role: Uuid,
    /// Active region stored in `usr_dtl`.
    #[serde(default)]
    pub actv_rgon: Option<String>,
}

impl PartnerDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("이메일을 입력해주세요.".into());
        }
        if self.first_name.trim().is_empty() {
            return Err("회사명을 입력해주세요.".into());
        }
        Ok(())
    }
}
