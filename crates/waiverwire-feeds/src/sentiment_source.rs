// Forum sentiment lookups, paced for the upstream's rate limit.

use tracing::{debug, warn};
use waiverwire_core::config::SentimentConfig;
use waiverwire_core::pacer::Pacer;
use waiverwire_core::sentiment::{score_corpus, DiscussionLink, Lexicon, SentimentResult};

use crate::error::FetchError;
use crate::feed::DiscussionFeed;
use crate::reddit::{Comment, Post};

const TOP_DISCUSSIONS: usize = 3;

/// Searches a discussion feed and scores what it finds.
///
/// Every upstream request, searches and comment fetches alike, waits on the
/// pacer first. Lookups take `&mut self`, so they never overlap.
pub struct SentimentSource<D> {
    feed: D,
    lexicon: Lexicon,
    search_limit: u32,
    include_comments: bool,
    comment_posts: usize,
    comment_limit: u32,
    pacer: Pacer,
}

impl<D: DiscussionFeed> SentimentSource<D> {
    pub fn new(feed: D, config: &SentimentConfig) -> Self {
        Self {
            feed,
            lexicon: config.lexicon(),
            search_limit: config.search_limit,
            include_comments: config.include_comments,
            comment_posts: config.comment_posts,
            comment_limit: config.comment_limit,
            pacer: Pacer::new(config.min_interval()),
        }
    }

    pub fn feed(&self) -> &D {
        &self.feed
    }

    /// Sentiment for `query` across matching posts and, optionally, their
    /// comment threads. A failed search is an error; a failed comment fetch
    /// is logged and skipped.
    pub async fn analyze(&mut self, query: &str) -> Result<SentimentResult, FetchError> {
        self.pacer.wait().await;
        let posts = self.feed.search_posts(query, self.search_limit).await?;

        let mut comments: Vec<Comment> = Vec::new();
        if self.include_comments {
            for post in posts.iter().take(self.comment_posts) {
                self.pacer.wait().await;
                match self.feed.post_comments(&post.id, self.comment_limit).await {
                    Ok(mut batch) => comments.append(&mut batch),
                    Err(e) => warn!(post_id = %post.id, error = %e, "skipping comments"),
                }
            }
        }

        let result = summarize(query, &posts, &comments, &self.lexicon);
        debug!(
            query,
            posts = result.posts_found,
            comments = result.comments_scanned,
            score = result.score(),
            "sentiment lookup complete"
        );
        Ok(result)
    }

    pub async fn hot_posts(&mut self, limit: u32) -> Result<Vec<Post>, FetchError> {
        self.pacer.wait().await;
        self.feed.hot_posts(limit).await
    }
}

fn summarize(query: &str, posts: &[Post], comments: &[Comment], lexicon: &Lexicon) -> SentimentResult {
    let corpus = posts
        .iter()
        .map(|p| format!("{} {}", p.title, p.selftext))
        .chain(comments.iter().map(|c| c.body.clone()))
        .collect::<Vec<_>>()
        .join(" ");

    SentimentResult {
        query: query.to_string(),
        posts_found: posts.len(),
        total_score: posts.iter().map(|p| p.score).sum(),
        total_comments: posts.iter().map(|p| p.num_comments).sum(),
        comments_scanned: comments.len(),
        verdict: score_corpus(&corpus, lexicon),
        top_discussions: posts
            .iter()
            .take(TOP_DISCUSSIONS)
            .map(|p| DiscussionLink {
                title: p.title.clone(),
                score: p.score,
                url: p.url.clone(),
            })
            .collect(),
    }
}
