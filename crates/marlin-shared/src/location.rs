use crate::id::DbId;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// The server uses (0, 0) when no real position was recorded
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

/// Location as it appears in lists
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Location {
    pub id: DbId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

impl Location {
    pub fn has_valid_coordinates(&self) -> bool {
        self.coordinates.is_some_and(|point| !point.is_unset())
    }
}

/// Opening and closing times are local times of day like `08:30:00`
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetailedLocation {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
}
