//! Shared items related to user account control

mod responses;
mod role;
mod user;

pub use responses::{LoginProfile, LoginResponse};
pub use role::{ActivityRole, AuthorityRole, Language, MeasurementSystem, UserAuthorityRole};
pub use user::{AssignedLocation, Email, UserProfile};
