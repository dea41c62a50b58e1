pub mod actors;
pub mod auth;
pub mod config;
pub mod engine;
pub mod messages;
pub mod models;
pub mod remote;
pub mod storage;
pub mod types;
