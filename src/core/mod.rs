pub mod access;
pub mod export;
pub mod models;
pub mod ports;
pub mod resolver;
pub mod services;
pub mod summary;
