pub mod calendar;
pub mod init;
pub mod root;
