// src/services/mod.rs
pub mod auth_services;
pub mod post_filter;
