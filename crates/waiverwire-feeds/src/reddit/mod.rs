pub mod client;
pub mod types;

pub use client::RedditClient;
pub use types::{Comment, Post, TopWindow};
