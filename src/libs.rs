pub mod app;
pub mod compose;
pub mod config;
pub mod core;
pub mod logging;
pub mod media;
pub mod models;
pub mod storage;
pub mod uniffi;
pub mod views;
