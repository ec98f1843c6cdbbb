use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{error::Error, models::macros::str_opt_ref};

/// Content rating of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "s")]
    Safe,
    #[serde(rename = "q")]
    Questionable,
    #[serde(rename = "e")]
    Explicit,
}

impl Rating {
    /// The one-letter form used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Safe => "s",
            Rating::Questionable => "q",
            Rating::Explicit => "e",
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "safe" => Ok(Rating::Safe),
            "q" | "questionable" => Ok(Rating::Questionable),
            "e" | "explicit" => Ok(Rating::Explicit),
            other => Err(Error::invalid(format!("unknown rating {other:?}"))),
        }
    }
}

/// Envelope of `posts.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostList {
    posts: Vec<Post>,
}

impl std::ops::Deref for PostList {
    type Target = Vec<Post>;

    fn deref(&self) -> &Self::Target {
        &self.posts
    }
}

impl PostList {
    pub fn into_inner(self) -> Vec<Post> {
        self.posts
    }
}

/// A single post. Only the commonly used fields are mapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    id: u64,
    created_at: DateTime<FixedOffset>,
    #[serde(default)]
    updated_at: Option<DateTime<FixedOffset>>,
    file: File,
    score: Score,
    /// Tags grouped by category name (`general`, `species`, ...).
    tags: BTreeMap<String, Vec<String>>,
    rating: Rating,
    fav_count: u64,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    pools: Vec<u64>,
    relationships: Relationships,
    #[serde(default)]
    description: String,
    uploader_id: u64,
    #[serde(default)]
    comment_count: u64,
}

impl Post {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Tags grouped by category name.
    pub fn tags(&self) -> &BTreeMap<String, Vec<String>> {
        &self.tags
    }

    /// Every tag of the post, regardless of category.
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.tags.values().flatten().map(String::as_str)
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn fav_count(&self) -> u64 {
        self.fav_count
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn pools(&self) -> &[u64] {
        &self.pools
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn uploader_id(&self) -> u64 {
        self.uploader_id
    }

    pub fn comment_count(&self) -> u64 {
        self.comment_count
    }
}

/// The uploaded file behind a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    width: u32,
    height: u32,
    ext: String,
    size: u64,
    md5: String,
    /// Absent when the post is hidden from the current user.
    #[serde(default)]
    url: Option<String>,
}

impl File {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn md5(&self) -> &str {
        &self.md5
    }

    pub fn url(&self) -> Option<&str> {
        str_opt_ref!(self.url)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Score {
    up: i64,
    down: i64,
    total: i64,
}

impl Score {
    pub fn up(&self) -> i64 {
        self.up
    }

    /// Always zero or negative.
    pub fn down(&self) -> i64 {
        self.down
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationships {
    #[serde(default)]
    parent_id: Option<u64>,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    children: Vec<u64>,
}

impl Relationships {
    pub fn parent_id(&self) -> Option<u64> {
        self.parent_id
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }

    pub fn children(&self) -> &[u64] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTS: &str = r#"{"posts": [{
        "id": 123,
        "created_at": "2023-07-01T10:00:00.000-04:00",
        "updated_at": null,
        "file": {"width": 800, "height": 600, "ext": "png", "size": 51234,
                 "md5": "d41d8cd98f00b204e9800998ecf8427e", "url": null},
        "preview": {"width": 150, "height": 112},
        "score": {"up": 10, "down": -2, "total": 8},
        "tags": {"general": ["solo", "smile"], "species": ["horse"]},
        "rating": "s",
        "fav_count": 4,
        "sources": ["https://example.com/art"],
        "pools": [77],
        "relationships": {"parent_id": null, "has_children": true, "children": [124]},
        "description": "",
        "uploader_id": 9
    }]}"#;

    #[test]
    fn decodes_post_list() {
        let list: PostList = serde_json::from_str(POSTS).unwrap();
        assert_eq!(list.len(), 1);

        let post = &list[0];
        assert_eq!(post.id(), 123);
        assert_eq!(post.rating(), Rating::Safe);
        assert_eq!(post.file().url(), None);
        assert_eq!(post.score().total(), 8);
        assert_eq!(post.relationships().children(), &[124]);
        assert_eq!(post.comment_count(), 0);

        let tags: Vec<_> = post.all_tags().collect();
        assert_eq!(tags, vec!["solo", "smile", "horse"]);
    }

    #[test]
    fn ratings_parse_short_and_long() {
        assert_eq!("q".parse::<Rating>().unwrap(), Rating::Questionable);
        assert_eq!("Explicit".parse::<Rating>().unwrap(), Rating::Explicit);
        assert!("x".parse::<Rating>().is_err());
        assert_eq!(Rating::Safe.to_string(), "s");
    }
}
