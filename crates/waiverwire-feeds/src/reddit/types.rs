// Reddit listing shapes.
//
// Listings arrive as `{data:{children:[{kind, data:{...}}]}}`; posts are
// flattened out of that envelope. Comment trees nest replies under
// `data.replies`, which is either an empty string or another listing, so
// they are walked as untyped JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reddit's type prefix for comments.
const COMMENT_KIND: &str = "t1";

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub author: String,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
    pub created_utc: f64,
    /// Absolute link to the thread.
    pub url: String,
    pub selftext: String,
    pub flair: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Listing<T> {
    #[serde(default)]
    data: Option<ListingData<T>>,
}

#[derive(Debug, Deserialize)]
struct ListingData<T> {
    #[serde(default)]
    children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
struct Thing<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPost {
    id: String,
    title: String,
    author: String,
    score: i64,
    upvote_ratio: f64,
    num_comments: u64,
    created_utc: f64,
    permalink: String,
    selftext: String,
    link_flair_text: Option<String>,
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        self.data
            .map(|d| d.children.into_iter().map(|c| c.data).collect())
            .unwrap_or_default()
    }
}

/// Flatten a post listing, turning permalinks into absolute URLs.
pub(crate) fn flatten_posts(listing: Listing<RawPost>, base_url: &str) -> Vec<Post> {
    listing
        .into_items()
        .into_iter()
        .map(|raw| Post {
            url: format!("{base_url}{}", raw.permalink),
            id: raw.id,
            title: raw.title,
            author: raw.author,
            score: raw.score,
            upvote_ratio: raw.upvote_ratio,
            num_comments: raw.num_comments,
            created_utc: raw.created_utc,
            selftext: raw.selftext,
            flair: raw.link_flair_text,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub created_utc: f64,
    pub parent_id: String,
}

fn str_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn comment_from(data: &Value) -> Comment {
    Comment {
        id: str_field(data, "id"),
        author: str_field(data, "author"),
        body: str_field(data, "body"),
        score: data.get("score").and_then(|v| v.as_i64()).unwrap_or(0),
        created_utc: data.get("created_utc").and_then(|v| v.as_f64()).unwrap_or(0.0),
        parent_id: str_field(data, "parent_id"),
    }
}

fn walk_comments(listing: &Value, out: &mut Vec<Comment>) {
    let Some(children) = listing.pointer("/data/children").and_then(|c| c.as_array()) else {
        return;
    };
    for child in children {
        if child.get("kind").and_then(|k| k.as_str()) != Some(COMMENT_KIND) {
            continue;
        }
        let Some(data) = child.get("data") else {
            continue;
        };
        out.push(comment_from(data));
        if let Some(replies) = data.get("replies") {
            walk_comments(replies, out);
        }
    }
}

/// Flatten a comments response (`[post listing, comment listing]`)
/// depth-first, parents before their replies. Non-comment children such as
/// "load more" stubs are skipped.
pub(crate) fn flatten_comments(response: &Value) -> Vec<Comment> {
    let mut out = Vec::new();
    if let Some(listing) = response.as_array().and_then(|parts| parts.get(1)) {
        walk_comments(listing, &mut out);
    }
    out
}

// ---------------------------------------------------------------------------
// Top-post windows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TopWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopWindow::Hour => "hour",
            TopWindow::Day => "day",
            TopWindow::Week => "week",
            TopWindow::Month => "month",
            TopWindow::Year => "year",
            TopWindow::All => "all",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn posts_are_flattened_with_absolute_urls() {
        let listing: Listing<RawPost> = serde_json::from_value(json!({
            "kind": "Listing",
            "data": {"children": [
                {"kind": "t3", "data": {
                    "id": "abc", "title": "Waiver wire week 10", "author": "mod",
                    "score": 512, "upvote_ratio": 0.97, "num_comments": 88,
                    "created_utc": 1700000000.0, "permalink": "/r/fantasyfootball/comments/abc/ww/",
                    "selftext": "", "link_flair_text": "Discussion"
                }},
                {"kind": "t3", "data": {"id": "def", "title": "Sparse"}}
            ]}
        }))
        .unwrap();

        let posts = flatten_posts(listing, "https://www.reddit.com");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].url, "https://www.reddit.com/r/fantasyfootball/comments/abc/ww/");
        assert_eq!(posts[0].flair.as_deref(), Some("Discussion"));
        assert_eq!(posts[1].score, 0);
        assert_eq!(posts[1].num_comments, 0);
    }

    #[test]
    fn missing_envelope_is_empty() {
        let listing: Listing<RawPost> = serde_json::from_value(json!({})).unwrap();
        assert!(flatten_posts(listing, "").is_empty());
    }

    #[test]
    fn comment_tree_is_depth_first() {
        let response = json!([
            {"kind": "Listing", "data": {"children": [{"kind": "t3", "data": {"id": "p"}}]}},
            {"kind": "Listing", "data": {"children": [
                {"kind": "t1", "data": {
                    "id": "c1", "body": "start him", "score": 5, "parent_id": "t3_p",
                    "replies": {"kind": "Listing", "data": {"children": [
                        {"kind": "t1", "data": {"id": "c1a", "body": "agreed", "score": 2, "parent_id": "t1_c1", "replies": ""}},
                        {"kind": "more", "data": {"id": "m1", "children": ["x"]}}
                    ]}}
                }},
                {"kind": "t1", "data": {"id": "c2", "body": "fade", "score": -1, "parent_id": "t3_p", "replies": ""}}
            ]}}
        ]);

        let comments = flatten_comments(&response);
        let ids: Vec<&str> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c1a", "c2"]);
        assert_eq!(comments[1].parent_id, "t1_c1");
        assert_eq!(comments[2].score, -1);
    }

    #[test]
    fn short_comment_response_is_empty() {
        assert!(flatten_comments(&json!([])).is_empty());
        assert!(flatten_comments(&json!(null)).is_empty());
    }
}
