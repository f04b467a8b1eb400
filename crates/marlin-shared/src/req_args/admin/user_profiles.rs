use crate::{
    id::DbId,
    list::{QueryFilters, Sort},
    uac::{ActivityRole, Language, MeasurementSystem, UserAuthorityRole},
};

/// Filters for `GET /admin/user-profiles`. Pagination is supplied separately
/// through [`crate::list::ListQuery`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfileFilters {
    pub id: Option<DbId>,
    pub email: Option<String>,
    pub authority_role: Option<UserAuthorityRole>,
    pub activity_role: Option<ActivityRole>,
    pub verified: Option<bool>,
    pub language: Option<Language>,
    pub measurement_system: Option<MeasurementSystem>,
    pub user_created_at: Option<String>,
    pub profile_created_at: Option<String>,
    pub profile_updated_at: Option<String>,
    pub sort: Option<Sort>,
}

impl QueryFilters for UserProfileFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut result = Vec::new();
        if let Some(id) = self.id {
            result.push(("id", id.to_string()));
        }
        push_non_empty(&mut result, "email", self.email.as_deref());
        if let Some(role) = self.authority_role {
            result.push(("authorityRole", <&str>::from(role).to_string()));
        }
        if let Some(role) = self.activity_role {
            result.push(("activityRole", <&str>::from(role).to_string()));
        }
        if let Some(verified) = self.verified {
            result.push(("verified", verified.to_string()));
        }
        if let Some(language) = self.language {
            result.push(("language", <&str>::from(language).to_string()));
        }
        if let Some(system) = self.measurement_system {
            result.push(("measurementSystem", <&str>::from(system).to_string()));
        }
        push_non_empty(&mut result, "userCreatedAt", self.user_created_at.as_deref());
        push_non_empty(
            &mut result,
            "profileCreatedAt",
            self.profile_created_at.as_deref(),
        );
        push_non_empty(
            &mut result,
            "profileUpdatedAt",
            self.profile_updated_at.as_deref(),
        );
        if let Some(sort) = &self.sort {
            sort.push_query_pairs(&mut result);
        }
        result
    }
}

/// Empty strings are treated the same as unset
pub(crate) fn push_non_empty(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&str>,
) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

/// Body of `PUT /admin/user-profiles`
///
/// Fields left as `None` are not sent. For the names `Some(None)` sends `null`
/// which clears the value
#[derive(Debug, serde::Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserUpdate {
    pub user_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority_role: Option<UserAuthorityRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_system: Option<MeasurementSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<ActivityRole>>,
}

impl AdminUserUpdate {
    pub fn new(user_id: DbId) -> Self {
        Self {
            user_id,
            authority_role: None,
            verified: None,
            first_name: None,
            last_name: None,
            language: None,
            measurement_system: None,
            roles: None,
        }
    }

    pub fn authority_role(mut self, role: UserAuthorityRole) -> Self {
        self.authority_role = Some(role);
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    /// Empty strings clear the name
    pub fn names(mut self, first_name: &str, last_name: &str) -> Self {
        let to_field = |value: &str| Some(Some(value.to_string()).filter(|v| !v.is_empty()));
        self.first_name = to_field(first_name);
        self.last_name = to_field(last_name);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn measurement_system(mut self, system: MeasurementSystem) -> Self {
        self.measurement_system = Some(system);
        self
    }

    pub fn roles(mut self, roles: Vec<ActivityRole>) -> Self {
        self.roles = Some(roles);
        self
    }
}

/// Body of `POST /admin/user-profiles/block`
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserReqArgs {
    pub user_id: DbId,
}
