pub use app::App;
pub use config::Settings;

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod extension;
pub mod router;
pub mod screen;
pub mod service;
