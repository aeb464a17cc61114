pub mod connection;
pub mod transaction;
