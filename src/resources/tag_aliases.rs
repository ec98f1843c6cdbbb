use std::fmt::{self, Display, Formatter};

use crate::{
    models::tag::TagCategory,
    request::{Model, QueryArgs, RequestSpec},
    resources::{clamp_limit, Page, MAX_LIMIT},
    result::Result,
    transport::Reply,
};

/// Sort order of [`TagAliases::list`]. The server defaults to `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAliasOrder {
    Status,
    CreatedAt,
    UpdatedAt,
    Name,
    TagCount,
}

impl Display for TagAliasOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagAliasOrder::Status => "status",
            TagAliasOrder::CreatedAt => "created_at",
            TagAliasOrder::UpdatedAt => "updated_at",
            TagAliasOrder::Name => "name",
            TagAliasOrder::TagCount => "tag_count",
        })
    }
}

/// Filters for [`TagAliases::list`].
#[derive(Debug, Clone, Default)]
pub struct TagAliasListArgs {
    /// Capped at [`MAX_LIMIT`].
    pub limit: Option<u32>,
    /// Numbered pages are capped at [`MAX_PAGE`](super::MAX_PAGE).
    pub page: Option<Page>,
    /// Category of the tag being aliased away.
    pub antecedent_tag_category: Option<TagCategory>,
    /// Category of the tag being aliased to.
    pub consequent_tag_category: Option<TagCategory>,
    pub name_matches: Option<String>,
    pub order: Option<TagAliasOrder>,
    /// `approved`, `active`, `pending`, `deleted`, `retired`, `processing`,
    /// `queued` or `blank`.
    pub status: Option<String>,
}

/// Binding for tag aliases.
#[derive(Debug, Clone)]
pub struct TagAliases {
    model: Model,
}

impl TagAliases {
    pub(crate) fn new(model: Model) -> Self {
        TagAliases { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Searches tag aliases.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx replies.
    pub async fn list(&self, args: TagAliasListArgs) -> Result<Reply> {
        let mut query = QueryArgs::new();
        query
            .push_opt("limit", clamp_limit(args.limit, MAX_LIMIT))
            .push_opt("page", args.page.map(Page::capped))
            .push_opt(
                "search[antecedent_tag][category]",
                args.antecedent_tag_category,
            )
            .push_opt(
                "search[consequent_tag][category]",
                args.consequent_tag_category,
            )
            .push_opt("search[name_matches]", args.name_matches)
            .push_opt("search[order]", args.order)
            .push_opt("search[status]", args.status);

        self.model
            .submit(RequestSpec::get("tag_aliases.json").query(query))
            .await
    }
}
