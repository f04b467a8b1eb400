use crate::uac::{ActivityRole, Language, MeasurementSystem};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Language,
    pub measurement_system: MeasurementSystem,
    pub roles: Vec<ActivityRole>,
}

/// `None` fields are left unchanged
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_system: Option<MeasurementSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<ActivityRole>>,
}
