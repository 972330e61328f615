pub mod config;
pub mod logging;

pub mod collector;
pub mod command;
pub mod notice;
pub mod plugin;
pub mod transcribe;
pub mod validator;
