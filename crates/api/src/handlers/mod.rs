pub mod capture_order;
pub mod card_charge;
pub mod client_config;
pub mod create_order;
pub mod health;
