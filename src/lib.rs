pub mod auth;
pub mod config;
pub mod db;
pub mod jobs;
pub mod logging;
pub mod model;
pub mod service;
pub mod utils;
pub mod viacep;
