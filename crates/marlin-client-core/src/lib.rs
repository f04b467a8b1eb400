//! Client side of the Marlin admin portal: the stored session, the request
//! pipeline and one method per API operation
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]

#[cfg(target_arch = "wasm32")]
mod suppress_wasm_warnings {
    // Needed because we need to enable js feature on this crate
    use getrandom as _;
}

#[cfg(test)] // Only used by the integration tests
mod warning_suppress {
    use tokio as _;
    use wiremock as _;
}

mod client;
pub mod logs_mock;
pub mod session_store;

pub use client::{
    api::admin::user_profiles::UserProfilesResponse, Client, LoginOutcome, Navigator,
    NoopNavigator, ResponseError, UiCallBack, NO_ARGS,
};
pub use logs_mock::{LogSource, MockLogStore};
pub use session_store::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
