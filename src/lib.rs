pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod db;
pub mod domain;
pub mod scheduler;
pub mod services;
pub mod tasks;
pub mod views;
