/// Body of `PUT /location/{id}`. Every field is sent, `None` clears it
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
}

impl From<&crate::location::DetailedLocation> for UpdateLocationRequest {
    fn from(value: &crate::location::DetailedLocation) -> Self {
        Self {
            name: value.name.clone(),
            address: value.address.clone(),
            description: value.description.clone(),
            opening_time: value.opening_time.clone(),
            closing_time: value.closing_time.clone(),
        }
    }
}
