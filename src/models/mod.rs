// src/models/mod.rs
pub mod post;
pub mod user;

pub use post::{Category, NewPost, Post};
pub use user::{AuthSession, SignUp, User};
