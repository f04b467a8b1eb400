use marlin_client_core::Client;
use marlin_shared::{
    id::DbId,
    location::{DetailedLocation, Location},
    req_args::{admin::AssignLocationReqArgs, location::UpdateLocationRequest},
};
use tracing::error;

use super::{no_wake, receive, server_message_or, Outcome};
use crate::Notifier;

#[derive(Debug)]
pub struct LocationsState {
    client: Client,
    notifier: Notifier,
    locations: Vec<Location>,
    is_loading: bool,
    error: Option<String>,
}

impl LocationsState {
    pub fn new(client: Client, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            locations: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_locations(&mut self) -> Outcome<Vec<Location>> {
        self.is_loading = true;
        self.error = None;
        let result = receive(self.client.get_locations(no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(locations) => {
                self.locations = locations.clone();
                Outcome::Success(locations)
            }
            Err(err) => {
                let message = "Failed to load locations";
                error!(?err, message);
                self.locations.clear();
                self.error = Some(message.to_string());
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_location_details(&mut self, id: DbId) -> Outcome<DetailedLocation> {
        match receive(self.client.get_location(id, no_wake)).await {
            Ok(location) => Outcome::Success(location),
            Err(err) => {
                let message = "Failed to load location details";
                error!(?err, message);
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    /// Local list is reloaded from the server afterwards
    #[tracing::instrument(skip(self))]
    pub async fn update_location(
        &mut self,
        id: DbId,
        request: UpdateLocationRequest,
    ) -> Outcome<DetailedLocation> {
        self.is_loading = true;
        let result = receive(self.client.update_location(id, request, no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(location) => {
                // Failure to reload is already reported by load_locations
                let _ = self.load_locations().await;
                self.notifier.success("Location updated successfully");
                Outcome::Success(location)
            }
            Err(err) => {
                let message = "Failed to update location";
                error!(?err, message);
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_location_image(&mut self, id: DbId) -> Outcome<()> {
        match receive(self.client.delete_location_image(id, no_wake)).await {
            Ok(()) => {
                self.notifier.success("Location image deleted successfully");
                Outcome::Success(())
            }
            Err(err) => {
                let message = "Failed to delete location image";
                error!(?err, message);
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn assign_harbor_master(&mut self, user_id: DbId, location_id: DbId) -> Outcome<()> {
        let args = AssignLocationReqArgs {
            user_id,
            location_id,
        };
        match receive(self.client.assign_harbor_master(args, no_wake)).await {
            Ok(()) => {
                self.notifier
                    .success("Location assigned to harbor master successfully");
                Outcome::Success(())
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to assign location");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    pub async fn refresh_locations(&mut self) -> Outcome<Vec<Location>> {
        self.load_locations().await
    }

    /// Case insensitive match on the name, or a substring of the id
    pub fn search_locations(&self, query: &str) -> Vec<&Location> {
        let query = query.to_lowercase();
        self.locations
            .iter()
            .filter(|location| {
                location
                    .name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&query))
                    || location.id.to_string().contains(&query)
            })
            .collect()
    }

    pub fn has_valid_coordinates(location: &Location) -> bool {
        location.has_valid_coordinates()
    }

    pub fn locations_with_coordinates(&self) -> Vec<&Location> {
        self.locations
            .iter()
            .filter(|location| location.has_valid_coordinates())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use marlin_shared::location::GeoPoint;

    use super::*;

    fn location(id: u64, name: Option<&str>, lat: f64, lon: f64) -> Location {
        Location {
            id: id.into(),
            name: name.map(str::to_string),
            coordinates: Some(GeoPoint { lat, lon }),
        }
    }

    fn state_with(locations: Vec<Location>) -> LocationsState {
        let mut result = LocationsState::new(Client::default(), Notifier::new());
        result.locations = locations;
        result
    }

    #[test]
    fn search_by_name_or_id() {
        let state = state_with(vec![
            location(12, Some("North Pier"), 54.3, 10.1),
            location(7, None, 0.0, 0.0),
        ]);
        assert_eq!(state.search_locations("pier").len(), 1);
        assert_eq!(state.search_locations("7")[0].id, DbId::from(7_u64));
        assert_eq!(state.search_locations("1")[0].id, DbId::from(12_u64));
    }

    #[test]
    fn origin_is_not_a_coordinate() {
        let state = state_with(vec![
            location(1, Some("Harbor"), 54.3, 10.1),
            location(2, Some("Unknown"), 0.0, 0.0),
        ]);
        let actual: Vec<_> = state
            .locations_with_coordinates()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(actual, [DbId::from(1_u64)]);
        assert!(!LocationsState::has_valid_coordinates(&state.locations()[1]));
    }
}
