pub mod init;
pub mod interview;
pub mod rank;
pub mod render;
pub mod validate;
