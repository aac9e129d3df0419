use serde::{Deserialize, Serialize};

use crate::domain::common::{Collection, UserRef, YnFlag};

pub const CHANNEL_STATUS_ACTIVE: &str = "활성화";

/// Sales channel record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    #[serde(default)]
    pub channel_name: Option<String>,
    /// `활성화` or `비활성화`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub del_yn: Option<YnFlag>,
    #[serde(default)]
    pub user_created: Option<UserRef>,
    #[serde(default)]
    pub date_created: Option<String>,
}

impl Collection for Channel {
    const NAME: &'static str = "chnnl_mstr";
}

/// Write payload for creating or editing a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDraft {
    pub channel_name: String,
    pub status: String,
}

impl ChannelDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.channel_name.trim().is_empty() {
            return Err("채널명을 입력해주세요.".into());
        }
        Ok(())
    }
}

/// Directory search filter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelListQuery {
    /// Channel-name substring.
    #[serde(default)]
    pub channel_name: Option<String>,
    /// Exact status; `None` means all.
    #[serde(default)]
    pub status: Option<String>,
}
