use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A translation note: a box drawn on a post with some text attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    id: u64,
    created_at: DateTime<FixedOffset>,
    updated_at: DateTime<FixedOffset>,
    creator_id: u64,
    #[serde(default)]
    creator_name: String,
    post_id: u64,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    version: u32,
    is_active: bool,
    body: String,
}

impl Note {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<FixedOffset> {
        self.updated_at
    }

    pub fn creator_id(&self) -> u64 {
        self.creator_id
    }

    pub fn creator_name(&self) -> &str {
        &self.creator_name
    }

    pub fn post_id(&self) -> u64 {
        self.post_id
    }

    /// Position of the box's top-left corner, in image pixels.
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Size of the box as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_note() {
        let note: Note = serde_json::from_str(
            r#"{
                "id": 5,
                "created_at": "2022-05-01T08:00:00.000-04:00",
                "updated_at": "2022-05-01T08:00:00.000-04:00",
                "creator_id": 9,
                "creator_name": "someone",
                "post_id": 123,
                "x": 10, "y": 20, "width": 100, "height": 50,
                "version": 2,
                "is_active": true,
                "body": "hello"
            }"#,
        )
        .unwrap();

        assert_eq!(note.position(), (10, 20));
        assert_eq!(note.size(), (100, 50));
        assert_eq!(note.body(), "hello");
    }
}
