//! Application services over the canonical store.

mod profiles;

pub use profiles::{
    ProfileService, ProfileServiceError, ProfileServiceResult, apply_profile_logged,
};
