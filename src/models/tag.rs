use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{error::Error, models::macros::str_opt_ref};

/// Category a tag belongs to.
///
/// Travels as a number on the wire; [`Display`] writes that number, which is
/// what the `search[category]` filters expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TagCategory {
    General,
    Artist,
    Copyright,
    Character,
    Species,
    Invalid,
    Meta,
    Lore,
}

impl TagCategory {
    /// Numeric code used by the API.
    pub fn code(self) -> u8 {
        match self {
            TagCategory::General => 0,
            TagCategory::Artist => 1,
            TagCategory::Copyright => 3,
            TagCategory::Character => 4,
            TagCategory::Species => 5,
            TagCategory::Invalid => 6,
            TagCategory::Meta => 7,
            TagCategory::Lore => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TagCategory::General => "general",
            TagCategory::Artist => "artist",
            TagCategory::Copyright => "copyright",
            TagCategory::Character => "character",
            TagCategory::Species => "species",
            TagCategory::Invalid => "invalid",
            TagCategory::Meta => "meta",
            TagCategory::Lore => "lore",
        }
    }
}

impl TryFrom<u8> for TagCategory {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => TagCategory::General,
            1 => TagCategory::Artist,
            3 => TagCategory::Copyright,
            4 => TagCategory::Character,
            5 => TagCategory::Species,
            6 => TagCategory::Invalid,
            7 => TagCategory::Meta,
            8 => TagCategory::Lore,
            other => return Err(format!("unknown tag category code {other}")),
        })
    }
}

impl From<TagCategory> for u8 {
    fn from(category: TagCategory) -> Self {
        category.code()
    }
}

impl FromStr for TagCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(TagCategory::General),
            "artist" => Ok(TagCategory::Artist),
            "copyright" => Ok(TagCategory::Copyright),
            "character" => Ok(TagCategory::Character),
            "species" => Ok(TagCategory::Species),
            "invalid" => Ok(TagCategory::Invalid),
            "meta" => Ok(TagCategory::Meta),
            "lore" => Ok(TagCategory::Lore),
            other => Err(Error::invalid(format!("unknown tag category {other:?}"))),
        }
    }
}

impl Display for TagCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A tag as returned by `tags.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    id: u64,
    name: String,
    post_count: u64,
    /// Space separated `tag weight` pairs.
    #[serde(default)]
    related_tags: Option<String>,
    #[serde(default)]
    related_tags_updated_at: Option<DateTime<FixedOffset>>,
    category: TagCategory,
    is_locked: bool,
    created_at: DateTime<FixedOffset>,
    updated_at: DateTime<FixedOffset>,
}

impl Tag {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn post_count(&self) -> u64 {
        self.post_count
    }

    pub fn related_tags(&self) -> Option<&str> {
        str_opt_ref!(self.related_tags)
    }

    pub fn related_tags_updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.related_tags_updated_at
    }

    pub fn category(&self) -> TagCategory {
        self.category
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<FixedOffset> {
        self.updated_at
    }
}
