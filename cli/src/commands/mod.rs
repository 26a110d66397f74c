pub mod cli;
pub mod init;
pub mod metrics;
pub mod validate;
