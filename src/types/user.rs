//! Account information

use serde::{Deserialize, Serialize};

/// Account status returned by the `user` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfo {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub api_key: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub seconds_left: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversions_total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversions_consumed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_user_record() {
        let json = r#"{
            "Secret":"S","ApiKey":42,"Active":true,"FullName":"Jane Doe",
            "Email":"jane@example.com","SecondsLeft":1200,"ConversionsTotal":250
        }"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(user.api_key, 42);
        assert!(user.active);
        assert_eq!(user.seconds_left, 1200);
        assert_eq!(user.conversions_total, Some(250));
        assert_eq!(user.conversions_consumed, None);
    }
}
