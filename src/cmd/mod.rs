pub mod init;
pub mod label;
pub mod presets;
pub mod root;
