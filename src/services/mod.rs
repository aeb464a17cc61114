pub mod account;
pub mod instructor;
pub mod parent;
pub mod registration;
pub mod student;
