pub mod checkout_dto;
pub mod health_dto;
pub mod providers;

pub use checkout_dto::*;
pub use health_dto::*;
pub use providers::*;
