use std::collections::BTreeMap;

/// Summary figures for the admin dashboard
///
/// Any figure the server adds that is not listed here is kept in `extra`
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInfo {
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default)]
    pub active_sensors: Option<u64>,
    #[serde(default)]
    pub measurements_today: Option<u64>,
    #[serde(default)]
    pub system_status: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
