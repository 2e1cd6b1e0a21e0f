pub mod credential;
pub mod settings;
pub mod settings_io;
