use futures::channel::oneshot;
use marlin_shared::{
    const_config::path::{PATH_ADMIN_POTENTIAL_SENSORS, PATH_ADMIN_POTENTIAL_SENSOR_TOGGLE},
    id::DbId,
    sensor::PotentialSensor,
};

use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_potential_sensors<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<PotentialSensor>>> {
        self.send_request_expect_json(PATH_ADMIN_POTENTIAL_SENSORS, &NO_ARGS, ui_notify)
    }

    /// Flips the active flag and returns the complete updated list
    #[tracing::instrument(skip(ui_notify))]
    pub fn toggle_sensor_active<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<PotentialSensor>>> {
        self.send_request_expect_json(
            PATH_ADMIN_POTENTIAL_SENSOR_TOGGLE.with_id(id),
            &NO_ARGS,
            ui_notify,
        )
    }
}
