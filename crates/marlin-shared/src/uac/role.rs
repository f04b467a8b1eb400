use serde::{Deserialize, Serialize};

/// Role carried by the session. Only [`AuthorityRole::Admin`] may use the
/// admin portal
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AuthorityRole {
    #[serde(rename = "ADMIN")]
    #[strum(serialize = "ADMIN")]
    Admin,
    #[serde(rename = "USER")]
    #[strum(serialize = "USER")]
    User,
    /// The profile endpoints spell this one differently
    #[serde(rename = "HARBOURMASTER", alias = "HARBOR_MASTER")]
    #[strum(to_string = "HARBOURMASTER", serialize = "HARBOR_MASTER")]
    HarbourMaster,
    /// Any role name this client does not recognise
    #[serde(rename = "UNKNOWN", other)]
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

/// Role as reported on user profiles
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum UserAuthorityRole {
    #[serde(rename = "ADMIN")]
    #[strum(serialize = "ADMIN")]
    Admin,
    #[serde(rename = "HARBOR_MASTER")]
    #[strum(serialize = "HARBOR_MASTER")]
    HarborMaster,
    #[serde(rename = "USER")]
    #[strum(serialize = "USER")]
    User,
}

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActivityRole {
    Swimmer,
    Sailor,
    Fisherman,
}

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Language {
    En,
    De,
}

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum MeasurementSystem {
    Metric,
    Imperial,
}

impl From<UserAuthorityRole> for AuthorityRole {
    fn from(value: UserAuthorityRole) -> Self {
        match value {
            UserAuthorityRole::Admin => Self::Admin,
            UserAuthorityRole::HarborMaster => Self::HarbourMaster,
            UserAuthorityRole::User => Self::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::str::FromStr;

    use super::*;

    #[rstest]
    #[case("\"ADMIN\"", AuthorityRole::Admin)]
    #[case("\"USER\"", AuthorityRole::User)]
    #[case("\"HARBOURMASTER\"", AuthorityRole::HarbourMaster)]
    #[case::profile_spelling("\"HARBOR_MASTER\"", AuthorityRole::HarbourMaster)]
    #[case::unrecognised("\"SUPERUSER\"", AuthorityRole::Unknown)]
    fn authority_role_from_json(#[case] json: &str, #[case] expected: AuthorityRole) {
        let actual: AuthorityRole = serde_json::from_str(json).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn authority_role_serializes_canonical_spelling() {
        assert_eq!(
            serde_json::to_string(&AuthorityRole::HarbourMaster).unwrap(),
            "\"HARBOURMASTER\""
        );
    }

    #[rstest]
    #[case("admin", UserAuthorityRole::Admin)]
    #[case("HARBOR_MASTER", UserAuthorityRole::HarborMaster)]
    fn user_authority_role_from_cli_input(#[case] input: &str, #[case] expected: UserAuthorityRole) {
        assert_eq!(UserAuthorityRole::from_str(input).unwrap(), expected);
    }

    #[test]
    fn wire_names() {
        let wire: &'static str = ActivityRole::Fisherman.into();
        assert_eq!(wire, "FISHERMAN");
        let wire: &'static str = MeasurementSystem::Imperial.into();
        assert_eq!(wire, "IMPERIAL");
        assert_eq!(serde_json::to_string(&Language::De).unwrap(), "\"DE\"");
    }
}
