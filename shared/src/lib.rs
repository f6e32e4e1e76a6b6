pub mod auth;
pub mod config;
pub mod email;
pub mod models;
pub mod store;
pub mod token;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
