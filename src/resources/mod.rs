//! Thin per-resource bindings.
//!
//! Each client turns its argument struct into [`QueryArgs`] and hands a
//! [`RequestSpec`] to the shared [`Model`]. Write-class calls check the
//! session's credentials before doing anything else.
//!
//! [`QueryArgs`]: crate::request::QueryArgs
//! [`RequestSpec`]: crate::request::RequestSpec
//! [`Model`]: crate::request::Model

use std::fmt::{self, Display, Formatter};

pub mod notes;
pub mod pools;
pub mod posts;
pub mod tag_aliases;
pub mod tags;

/// Highest page number the API serves for numbered pagination.
pub const MAX_PAGE: u32 = 750;

/// Most list endpoints cap `limit` at this value.
pub const MAX_LIMIT: u32 = 1000;

/// Which slice of a listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Plain page number, `page=3`.
    Number(u32),
    /// Only ids lower than the given one, `page=b1234`.
    Before(u64),
    /// Only ids higher than the given one, `page=a1234`.
    After(u64),
}

impl Page {
    /// Caps numbered pages at [`MAX_PAGE`]; id cursors pass through.
    pub(crate) fn capped(self) -> Self {
        match self {
            Page::Number(n) => Page::Number(n.min(MAX_PAGE)),
            cursor => cursor,
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Page::Number(n) => write!(f, "{n}"),
            Page::Before(id) => write!(f, "b{id}"),
            Page::After(id) => write!(f, "a{id}"),
        }
    }
}

pub(crate) fn clamp_limit(limit: Option<u32>, max: u32) -> Option<u32> {
    limit.map(|limit| limit.min(max))
}

/// Returns the `"1"`/`"0"` form some write endpoints expect for flags.
pub(crate) fn flag(value: bool) -> u8 {
    u8::from(value)
}

pub(crate) fn join<T: Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
