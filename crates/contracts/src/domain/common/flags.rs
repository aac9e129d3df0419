use serde::{Deserialize, Serialize};

/// Soft-delete flag as stored in the Record Store (`del_yn` columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum YnFlag {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl YnFlag {
    pub fn is_set(&self) -> bool {
        matches!(self, YnFlag::Yes)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YnFlag::Yes => "Y",
            YnFlag::No => "N",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form() {
        assert_eq!(serde_json::to_string(&YnFlag::Yes).unwrap(), "\"Y\"");
        let n: YnFlag = serde_json::from_str("\"N\"").unwrap();
        assert!(!n.is_set());
    }
}
