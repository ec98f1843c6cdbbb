use std::fmt::{self, Display, Formatter};

use crate::{
    models::tag::TagCategory,
    request::{Model, QueryArgs, RequestSpec},
    resources::{clamp_limit, Page, MAX_LIMIT},
    result::Result,
    transport::Reply,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOrder {
    Date,
    Count,
    Name,
}

impl Display for TagOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagOrder::Date => "date",
            TagOrder::Count => "count",
            TagOrder::Name => "name",
        })
    }
}

/// Filters for [`Tags::list`].
#[derive(Debug, Clone, Default)]
pub struct TagListArgs {
    /// Capped at [`MAX_LIMIT`].
    pub limit: Option<u32>,
    pub page: Option<Page>,
    pub category: Option<TagCategory>,
    pub has_artist: Option<bool>,
    pub has_wiki: Option<bool>,
    pub hide_empty: Option<bool>,
    /// Accepts `*` wildcards, e.g. `horse*`.
    pub name_matches: Option<String>,
    pub order: Option<TagOrder>,
}

/// Binding for tags.
#[derive(Debug, Clone)]
pub struct Tags {
    model: Model,
}

impl Tags {
    pub(crate) fn new(model: Model) -> Self {
        Tags { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Searches tags.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx replies.
    pub async fn list(&self, args: TagListArgs) -> Result<Reply> {
        let mut query = QueryArgs::new();
        query
            .push_opt("limit", clamp_limit(args.limit, MAX_LIMIT))
            .push_opt("page", args.page)
            .push_opt("search[category]", args.category)
            .push_opt("search[has_artist]", args.has_artist)
            .push_opt("search[has_wiki]", args.has_wiki)
            .push_opt("search[hide_empty]", args.hide_empty)
            .push_opt("search[name_matches]", args.name_matches)
            .push_opt("search[order]", args.order);

        self.model
            .submit(RequestSpec::get("tags.json").query(query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{client_with, pairs, RecordingTransport};

    #[tokio::test]
    async fn list_without_arguments() {
        let transport = RecordingTransport::new();
        let client = client_with(&transport, false);

        client.tags().list(TagListArgs::default()).await.unwrap();
        assert_eq!(transport.single().url.as_str(), "https://e621.net/tags.json");
    }

    #[tokio::test]
    async fn list_sends_category_code() {
        let transport = RecordingTransport::new();
        let client = client_with(&transport, false);

        client
            .tags()
            .list(TagListArgs {
                limit: Some(10),
                name_matches: Some("horse*".into()),
                category: Some(TagCategory::Species),
                hide_empty: Some(true),
                order: Some(TagOrder::Count),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(
            transport.single().url.query(),
            Some(
                "limit=10&search[category]=5&search[hide_empty]=true\
                 &search[name_matches]=horse*&search[order]=count"
            )
        );
    }

    #[tokio::test]
    async fn page_is_not_capped_for_tags() {
        let transport = RecordingTransport::new();
        let client = client_with(&transport, false);

        client
            .tags()
            .list(TagListArgs {
                page: Some(Page::Number(1000)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(transport.single().query(), pairs(&[("page", "1000")]));
    }
}
