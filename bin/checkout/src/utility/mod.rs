pub mod logging;
pub mod server;
pub mod shutdown;
pub mod tasks;
