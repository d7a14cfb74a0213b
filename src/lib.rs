pub mod api;
pub mod auth;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod feeds;
pub mod listing;
pub mod repository;
pub mod service;
pub mod uploads;
