// src/repositories/mod.rs
pub mod local_store;
pub mod post_repository;
pub mod seed;
