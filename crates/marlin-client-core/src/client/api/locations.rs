use futures::channel::oneshot;
use marlin_shared::{
    const_config::path::{
        PATH_ADMIN_ASSIGN_LOCATION, PATH_LOCATION, PATH_LOCATIONS, PATH_LOCATION_IMAGE_DELETE,
        PATH_LOCATION_UPDATE,
    },
    id::DbId,
    location::{DetailedLocation, Location},
    req_args::{admin::AssignLocationReqArgs, location::UpdateLocationRequest},
};

use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_locations<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Location>>> {
        self.send_request_expect_json(PATH_LOCATIONS, &NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_location<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<DetailedLocation>> {
        self.send_request_expect_json(PATH_LOCATION.with_id(id), &NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_location<F: UiCallBack>(
        &self,
        id: DbId,
        args: UpdateLocationRequest,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<DetailedLocation>> {
        self.send_request_expect_json(PATH_LOCATION_UPDATE.with_id(id), &args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_location_image<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_LOCATION_IMAGE_DELETE.with_id(id), &NO_ARGS, ui_notify)
    }

    /// Makes the user the harbor master of the location
    #[tracing::instrument(skip(ui_notify))]
    pub fn assign_harbor_master<F: UiCallBack>(
        &self,
        args: AssignLocationReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_ADMIN_ASSIGN_LOCATION, &args, ui_notify)
    }
}
