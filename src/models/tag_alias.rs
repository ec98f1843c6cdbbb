use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::macros::str_opt_ref;

/// An alias mapping one tag (the antecedent) onto another (the consequent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAlias {
    id: u64,
    antecedent_name: String,
    consequent_name: String,
    #[serde(default)]
    reason: Option<String>,
    creator_id: u64,
    #[serde(default)]
    approver_id: Option<u64>,
    #[serde(default)]
    forum_post_id: Option<u64>,
    #[serde(default)]
    forum_topic_id: Option<u64>,
    created_at: DateTime<FixedOffset>,
    #[serde(default)]
    updated_at: Option<DateTime<FixedOffset>>,
    /// `approved`, `active`, `pending`, `deleted`, `retired`, `processing`,
    /// `queued` or an error message.
    status: String,
    #[serde(default)]
    post_count: u64,
}

impl TagAlias {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn antecedent_name(&self) -> &str {
        &self.antecedent_name
    }

    pub fn consequent_name(&self) -> &str {
        &self.consequent_name
    }

    pub fn reason(&self) -> Option<&str> {
        str_opt_ref!(self.reason)
    }

    pub fn creator_id(&self) -> u64 {
        self.creator_id
    }

    pub fn approver_id(&self) -> Option<u64> {
        self.approver_id
    }

    pub fn forum_post_id(&self) -> Option<u64> {
        self.forum_post_id
    }

    pub fn forum_topic_id(&self) -> Option<u64> {
        self.forum_topic_id
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn post_count(&self) -> u64 {
        self.post_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_alias_with_missing_optionals() {
        let alias: TagAlias = serde_json::from_str(
            r#"{
                "id": 1,
                "antecedent_name": "horsey",
                "consequent_name": "horse",
                "creator_id": 9,
                "created_at": "2019-01-01T00:00:00.000-05:00",
                "status": "active"
            }"#,
        )
        .unwrap();

        assert_eq!(alias.consequent_name(), "horse");
        assert_eq!(alias.reason(), None);
        assert_eq!(alias.approver_id(), None);
        assert_eq!(alias.status(), "active");
    }
}
