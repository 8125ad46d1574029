pub mod api;
pub mod banner;
pub mod client;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod logging;
pub mod render;
pub mod review;
pub mod session;
