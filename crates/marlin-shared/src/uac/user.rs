use std::fmt::Display;

use crate::{errors::ConversionError, id::DbId, location::Location};

use super::{ActivityRole, Language, MeasurementSystem, UserAuthorityRole};

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
/// Represents an email address, only checked for the basic shape
pub struct Email(String);

impl Email {
    pub const MAX_LENGTH: usize = 254;
}

impl TryFrom<String> for Email {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(value)),
            _ => Err(ConversionError::InvalidEmail),
        }
    }
}

impl TryFrom<&str> for Email {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The server sends either the location itself or only its id
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AssignedLocation {
    Location(Location),
    Id(DbId),
}

impl AssignedLocation {
    pub fn id(&self) -> DbId {
        match self {
            AssignedLocation::Location(location) => location.id,
            AssignedLocation::Id(id) => *id,
        }
    }
}

impl Display for AssignedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignedLocation::Location(Location {
                name: Some(name), ..
            }) => write!(f, "{name}"),
            other => write!(f, "Location ID: {}", other.id()),
        }
    }
}

/// Stores a user's account and profile data as shown on management screens
///
/// Timestamps are kept as sent by the server
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub authority_role: UserAuthorityRole,
    #[serde(default)]
    pub activity_roles: Vec<ActivityRole>,
    #[serde(default)]
    pub user_created_at: Option<String>,
    pub verified: bool,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub measurement_system: Option<MeasurementSystem>,
    #[serde(default)]
    pub profile_created_at: Option<String>,
    #[serde(default)]
    pub profile_updated_at: Option<String>,
    #[serde(default)]
    pub assigned_location: Option<AssignedLocation>,
}

impl UserProfile {
    /// First and last name if any are set, otherwise the email
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }

    pub fn is_harbor_master(&self) -> bool {
        self.authority_role == UserAuthorityRole::HarborMaster
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::whitespace("   ", ConversionError::Empty)]
    #[case::no_at("admin.marlin-live.com", ConversionError::InvalidEmail)]
    #[case::no_local("@marlin-live.com", ConversionError::InvalidEmail)]
    #[case::no_domain("admin@", ConversionError::InvalidEmail)]
    fn illegal_emails(#[case] input: &str, #[case] expected: ConversionError) {
        let actual: Result<Email, ConversionError> = input.try_into();
        assert_eq!(actual.unwrap_err(), expected);
    }

    #[test]
    fn email_is_trimmed() {
        let actual: Email = " admin@marlin-live.com ".try_into().unwrap();
        assert_eq!(actual.as_ref(), "admin@marlin-live.com");
    }

    #[test]
    fn minimal_profile_deserializes() {
        // Arrange
        let json = serde_json::json!({
            "id": 5,
            "email": "jane@marlin-live.com",
            "authorityRole": "HARBOR_MASTER",
            "verified": true,
            "assignedLocation": { "id": 9, "name": "North Pier" }
        });

        // Act
        let actual: UserProfile = serde_json::from_value(json).unwrap();

        // Assert
        assert_eq!(actual.id, DbId::from(5_u64));
        assert!(actual.is_harbor_master());
        assert!(actual.activity_roles.is_empty());
        assert_eq!(actual.display_name(), "jane@marlin-live.com");
        assert_eq!(
            actual.assigned_location.unwrap().to_string(),
            "North Pier".to_string()
        );
    }

    #[test]
    fn assigned_location_as_bare_id() {
        let actual: AssignedLocation = serde_json::from_str("12").unwrap();
        assert_eq!(actual, AssignedLocation::Id(12.into()));
        assert_eq!(actual.to_string(), "Location ID: 12");
    }
}
