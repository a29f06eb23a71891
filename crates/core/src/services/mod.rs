pub mod normalizer;
pub mod order_builder;
pub mod paypal_service;
