pub mod config;
pub mod dispatch;
pub mod inbox;
pub mod schema;
pub mod serve;
