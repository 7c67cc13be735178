pub mod chance;
pub mod compare;
pub mod init;
pub mod quiz;
pub mod search;
pub mod validate;
