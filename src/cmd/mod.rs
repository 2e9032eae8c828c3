pub mod init;
pub mod print;
pub mod root;
pub mod setup;
