pub mod helper;
pub mod hover;
pub mod init;
pub mod scan;
