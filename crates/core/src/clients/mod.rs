pub mod direct;
pub mod oauth;
pub mod orders;
pub mod paypal;

pub use direct::DirectOrdersClient;
pub use oauth::{get_access_token, AccessToken, PaypalCredentials};
pub use orders::OrdersApi;
pub use paypal::{get_client, PaypalClient};
