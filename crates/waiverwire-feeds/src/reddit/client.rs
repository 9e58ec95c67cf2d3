// Reddit public JSON client, scoped to one subreddit.
//
// No auth; Reddit rejects requests without a descriptive User-Agent, which
// `from_config` sets on the underlying client. Callers are responsible for
// pacing.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use waiverwire_core::config::{HttpConfig, SentimentConfig};

use crate::error::FetchError;
use crate::feed::DiscussionFeed;
use crate::http::{build_client, get_json};
use crate::reddit::types::{flatten_comments, flatten_posts, Comment, Listing, Post, RawPost, TopWindow};

const WDIS_QUERY: &str = r#"WDIS OR "Who Do I Start" OR "Official Index""#;
const WDIS_LIMIT: u32 = 10;

pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
    subreddit: String,
}

impl RedditClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, subreddit: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            subreddit: subreddit.into(),
        }
    }

    pub fn from_config(http: &HttpConfig, sentiment: &SentimentConfig) -> Result<Self, FetchError> {
        let client = build_client(&http.user_agent, http.timeout())?;
        Ok(Self::new(client, http.reddit_base_url.clone(), sentiment.subreddit.clone()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/r/{}{}", self.base_url, self.subreddit, path)
    }

    async fn listing(&self, endpoint: &str, path: &str, query: &[(&str, String)]) -> Result<Vec<Post>, FetchError> {
        let listing: Listing<RawPost> = get_json(&self.http, endpoint, &self.url(path), query).await?;
        let posts = flatten_posts(listing, &self.base_url);
        debug!(endpoint, posts = posts.len(), "fetched listing");
        Ok(posts)
    }

    pub async fn hot_posts(&self, limit: u32) -> Result<Vec<Post>, FetchError> {
        self.listing("hot posts", "/hot.json", &[("limit", limit.to_string())])
            .await
    }

    pub async fn top_posts(&self, window: TopWindow, limit: u32) -> Result<Vec<Post>, FetchError> {
        self.listing(
            "top posts",
            "/top.json",
            &[("t", window.as_str().to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// Relevance-sorted search within the subreddit over the past week.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Post>, FetchError> {
        self.listing(
            "post search",
            "/search.json",
            &[
                ("q", query.to_string()),
                ("restrict_sr", "1".to_string()),
                ("limit", limit.to_string()),
                ("sort", "relevance".to_string()),
                ("t", "week".to_string()),
            ],
        )
        .await
    }

    /// This week's "who do I start" index threads, newest first.
    pub async fn wdis_threads(&self) -> Result<Vec<Post>, FetchError> {
        self.listing(
            "WDIS threads",
            "/search.json",
            &[
                ("q", WDIS_QUERY.to_string()),
                ("restrict_sr", "1".to_string()),
                ("limit", WDIS_LIMIT.to_string()),
                ("sort", "new".to_string()),
                ("t", "week".to_string()),
            ],
        )
        .await
    }

    pub async fn comments(&self, post_id: &str, limit: u32) -> Result<Vec<Comment>, FetchError> {
        let response: Value = get_json(
            &self.http,
            "post comments",
            &self.url(&format!("/comments/{post_id}.json")),
            &[("limit", limit.to_string())],
        )
        .await?;
        Ok(flatten_comments(&response))
    }
}

#[async_trait]
impl DiscussionFeed for RedditClient {
    async fn search_posts(&self, query: &str, limit: u32) -> Result<Vec<Post>, FetchError> {
        self.search(query, limit).await
    }

    async fn post_comments(&self, post_id: &str, limit: u32) -> Result<Vec<Comment>, FetchError> {
        self.comments(post_id, limit).await
    }

    async fn hot_posts(&self, limit: u32) -> Result<Vec<Post>, FetchError> {
        RedditClient::hot_posts(self, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_http::{route, serve};

    const LISTING: &str = r#"{"kind":"Listing","data":{"children":[
        {"kind":"t3","data":{"id":"p1","title":"Nacua breakout?","author":"a","score":40,"num_comments":12,"permalink":"/r/fantasyfootball/comments/p1/x/","selftext":"huge volume"}},
        {"kind":"t3","data":{"id":"p2","title":"Nacua injury","author":"b","score":10,"num_comments":3,"permalink":"/r/fantasyfootball/comments/p2/y/","selftext":""}}
    ]}}"#;

    fn client(base_url: &str) -> RedditClient {
        RedditClient::new(reqwest::Client::new(), base_url, "fantasyfootball")
    }

    #[tokio::test]
    async fn search_is_scoped_and_encoded() {
        let server = serve(vec![route("/r/fantasyfootball/search.json", 200, LISTING)]).await;

        let posts = client(&server.base_url).search("Puka Nacua", 15).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].url, format!("{}/r/fantasyfootball/comments/p1/x/", server.base_url));

        let requests = server.requests();
        assert_eq!(
            requests,
            vec!["/r/fantasyfootball/search.json?q=Puka+Nacua&restrict_sr=1&limit=15&sort=relevance&t=week".to_string()]
        );
    }

    #[tokio::test]
    async fn hot_and_top_hit_their_listings() {
        let server = serve(vec![
            route("/r/fantasyfootball/hot.json", 200, LISTING),
            route("/r/fantasyfootball/top.json", 200, LISTING),
        ])
        .await;
        let c = client(&server.base_url);

        assert_eq!(c.hot_posts(50).await.unwrap().len(), 2);
        assert_eq!(c.top_posts(TopWindow::Week, 5).await.unwrap().len(), 2);
        assert_eq!(
            server.requests(),
            vec![
                "/r/fantasyfootball/hot.json?limit=50".to_string(),
                "/r/fantasyfootball/top.json?t=week&limit=5".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn wdis_search_sorts_by_new() {
        let server = serve(vec![route("/r/fantasyfootball/search.json", 200, LISTING)]).await;
        client(&server.base_url).wdis_threads().await.unwrap();
        let target = &server.requests()[0];
        assert!(target.contains("sort=new"));
        assert!(target.contains("limit=10"));
        assert!(target.contains("WDIS"));
    }

    #[tokio::test]
    async fn comments_are_flattened() {
        let body = r#"[{"kind":"Listing","data":{"children":[]}},
            {"kind":"Listing","data":{"children":[
                {"kind":"t1","data":{"id":"c1","body":"must start","score":3,"parent_id":"t3_p1","replies":""}}
            ]}}]"#;
        let server = serve(vec![route("/r/fantasyfootball/comments/p1.json", 200, body)]).await;

        let comments = client(&server.base_url).comments("p1", 30).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "must start");
        assert_eq!(
            server.requests(),
            vec!["/r/fantasyfootball/comments/p1.json?limit=30".to_string()]
        );
    }

    #[tokio::test]
    async fn rate_limited_response_is_status_error() {
        let server = serve(vec![route("/r/fantasyfootball/hot.json", 429, "{}")]).await;
        let err = client(&server.base_url).hot_posts(10).await.unwrap_err();
        assert_eq!(err.status(), Some(429));
    }
}
