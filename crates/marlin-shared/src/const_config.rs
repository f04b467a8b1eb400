//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

use marlin_time::Seconds;

pub mod client {
    use super::*;

    pub const CLIENT_DEFAULT_API_BASE_URL: &str = "https://test.marlin-live.com/api";

    /// Key that the serialized session is stored under
    pub const CLIENT_SESSION_STORAGE_KEY: &str = "session";

    /// Route the client is sent to when the session is no longer valid
    pub const CLIENT_ROUTE_LOGIN: &str = "/login";
    pub const CLIENT_ROUTE_DASHBOARD: &str = "/dashboard";

    pub mod token {
        use super::Seconds;

        /// Access tokens are re-issued once they are this old
        pub const TOKEN_REFRESH_THRESHOLD: Seconds = Seconds::from_hours(3);

        /// Refresh slightly before the threshold so in flight requests don't
        /// arrive with an expired token
        pub const TOKEN_REFRESH_TOLERANCE: Seconds = Seconds::from_mins(1);
    }

    pub mod pagination {
        pub const PAGINATION_DEFAULT_LIMIT: u32 = 10;
    }

    pub mod notification {
        use super::Seconds;

        pub const NOTIFICATION_TIMEOUT: Seconds = Seconds::new(5);
    }
}

pub mod path {
    mod path_spec;
    pub use path_spec::{PathSpec, ResolvedPath};
    pub const PATH_ADMIN_ASSIGN_LOCATION: PathSpec = PathSpec::post("/admin/assignLocation");
    pub const PATH_ADMIN_DASHBOARD_INFO: PathSpec = PathSpec::get("/admin/dashboardInfo");
    pub const PATH_ADMIN_LOG: PathSpec = PathSpec::get("/admin/logs/{id}");
    pub const PATH_ADMIN_LOGS: PathSpec = PathSpec::get("/admin/logs");
    pub const PATH_ADMIN_LOGS_CLEAR: PathSpec = PathSpec::delete("/admin/logs");
    pub const PATH_ADMIN_LOGS_EXPORT: PathSpec = PathSpec::get("/admin/logs/export");
    pub const PATH_ADMIN_LOGS_SERVICES: PathSpec = PathSpec::get("/admin/logs/services");
    pub const PATH_ADMIN_POTENTIAL_SENSORS: PathSpec = PathSpec::get("/admin/potential-sensors");
    pub const PATH_ADMIN_POTENTIAL_SENSOR_TOGGLE: PathSpec =
        PathSpec::get("/admin/potential-sensors-toggle/{id}");
    pub const PATH_ADMIN_USER_PROFILE: PathSpec = PathSpec::get("/admin/user-profiles/{id}");
    pub const PATH_ADMIN_USER_PROFILE_BLOCK: PathSpec =
        PathSpec::post("/admin/user-profiles/block");
    pub const PATH_ADMIN_USER_PROFILE_DELETE: PathSpec =
        PathSpec::delete("/admin/user-profiles/{id}");
    pub const PATH_ADMIN_USER_PROFILE_RECENT_ACTIVITY: PathSpec =
        PathSpec::get("/admin/user-profiles/{id}/recent-activity");
    pub const PATH_ADMIN_USER_PROFILE_UPDATE: PathSpec = PathSpec::put("/admin/user-profiles");
    pub const PATH_ADMIN_USER_PROFILES: PathSpec = PathSpec::get("/admin/user-profiles");
    pub const PATH_AUTH_REFRESH: PathSpec = PathSpec::post("/auth/refresh");
    pub const PATH_LOCATION: PathSpec = PathSpec::get("/location/{id}");
    pub const PATH_LOCATION_IMAGE_DELETE: PathSpec = PathSpec::delete("/location/{id}/image");
    pub const PATH_LOCATION_UPDATE: PathSpec = PathSpec::put("/location/{id}");
    pub const PATH_LOCATIONS: PathSpec = PathSpec::get("/locations");
    pub const PATH_LOGIN: PathSpec = PathSpec::post("/login");
    pub const PATH_REGISTER: PathSpec = PathSpec::post("/register");
    pub const PATH_USER_PROFILE: PathSpec = PathSpec::get("/user-profile");
    pub const PATH_USER_PROFILE_CREATE: PathSpec = PathSpec::post("/user-profile");
    pub const PATH_USER_PROFILE_DELETE: PathSpec = PathSpec::delete("/user-profile");
    pub const PATH_USER_PROFILE_UPDATE: PathSpec = PathSpec::put("/user-profile");
}
