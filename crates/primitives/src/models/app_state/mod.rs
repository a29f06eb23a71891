pub mod app_config;
pub mod paypal_details;

pub use app_config::*;
pub use paypal_details::*;
