use marlin_client_core::Client;
use marlin_shared::{id::DbId, sensor::PotentialSensor};
use tracing::error;

use super::{no_wake, receive, Outcome};
use crate::Notifier;

#[derive(Debug)]
pub struct SensorsState {
    client: Client,
    notifier: Notifier,
    sensors: Vec<PotentialSensor>,
    is_loading: bool,
    error: Option<String>,
}

impl SensorsState {
    pub fn new(client: Client, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            sensors: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn sensors(&self) -> &[PotentialSensor] {
        &self.sensors
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_sensors(&mut self) -> Outcome<Vec<PotentialSensor>> {
        self.is_loading = true;
        self.error = None;
        let result = receive(self.client.get_potential_sensors(no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(sensors) => {
                self.sensors = sensors.clone();
                Outcome::Success(sensors)
            }
            Err(err) => {
                let message = "Failed to load sensors";
                error!(?err, message);
                self.sensors.clear();
                self.error = Some(message.to_string());
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    /// The server answers with the whole list which replaces the local one
    #[tracing::instrument(skip(self))]
    pub async fn toggle_sensor_status(&mut self, id: DbId) -> Outcome<Vec<PotentialSensor>> {
        self.is_loading = true;
        let result = receive(self.client.toggle_sensor_active(id, no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(sensors) => {
                self.sensors = sensors.clone();
                if let Some(sensor) = self.sensor_by_id(id) {
                    let state = if sensor.is_active {
                        "activated"
                    } else {
                        "deactivated"
                    };
                    let message = format!("Sensor {} {state}", sensor.display_name());
                    self.notifier.success(message);
                }
                Outcome::Success(sensors)
            }
            Err(err) => {
                let message = "Failed to toggle sensor status";
                error!(?err, message);
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    pub async fn refresh_sensors(&mut self) -> Outcome<Vec<PotentialSensor>> {
        self.load_sensors().await
    }

    pub fn total_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn active_count(&self) -> usize {
        self.sensors.iter().filter(|s| s.is_active).count()
    }

    pub fn inactive_count(&self) -> usize {
        self.total_count() - self.active_count()
    }

    pub fn active_sensors(&self) -> Vec<&PotentialSensor> {
        self.sensors.iter().filter(|s| s.is_active).collect()
    }

    pub fn inactive_sensors(&self) -> Vec<&PotentialSensor> {
        self.sensors.iter().filter(|s| !s.is_active).collect()
    }

    pub fn sensor_by_id(&self, id: DbId) -> Option<&PotentialSensor> {
        self.sensors.iter().find(|s| s.id == id)
    }

    /// Case insensitive match on name or description
    pub fn search_sensors(&self, query: &str) -> Vec<&PotentialSensor> {
        let query = query.to_lowercase();
        self.sensors.iter().filter(|s| s.matches(&query)).collect()
    }
}
