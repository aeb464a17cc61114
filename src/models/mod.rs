pub mod account;
pub mod instructor;
pub mod parent;
pub mod student;
pub mod user;
