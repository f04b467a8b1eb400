//! Arguments for the endpoints under `/admin`

use crate::id::DbId;

pub mod logs;
pub mod user_profiles;

/// Body of `POST /admin/assignLocation`
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignLocationReqArgs {
    pub user_id: DbId,
    pub location_id: DbId,
}
