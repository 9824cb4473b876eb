pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod local_state;
pub mod routes;
pub mod ui;
pub mod views;
