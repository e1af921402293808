//! PropDesk Backend Library
//!
//! Account sign-up/sign-in, password-reset email and property setup with a
//! logo upload, served over HTTP.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod upload;
