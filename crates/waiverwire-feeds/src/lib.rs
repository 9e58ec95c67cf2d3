pub mod directory;
pub mod error;
pub mod feed;
pub mod http;
pub mod reddit;
pub mod sentiment_source;
pub mod sleeper;

#[cfg(test)]
mod mock_http;

pub use directory::RemotePlayerDirectory;
pub use error::FetchError;
pub use feed::{DiscussionFeed, LeagueFeed};
pub use reddit::RedditClient;
pub use sentiment_source::SentimentSource;
pub use sleeper::SleeperClient;
