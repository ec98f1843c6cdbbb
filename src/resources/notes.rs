use crate::{
    request::{Model, QueryArgs, RequestSpec},
    resources::{clamp_limit, MAX_LIMIT},
    result::Result,
    transport::Reply,
};

/// Filters for [`Notes::list`].
#[derive(Debug, Clone, Default)]
pub struct NoteListArgs {
    /// Capped at [`MAX_LIMIT`].
    pub limit: Option<u32>,
    pub body_matches: Option<String>,
    pub creator_id: Option<u64>,
    pub creator_name: Option<String>,
    pub is_active: Option<bool>,
    pub post_id: Option<u64>,
    /// Tags the noted post must carry; sent space separated.
    pub post_tags_match: Vec<String>,
}

/// Geometry and text of a note, in image pixels.
#[derive(Debug, Clone, Default)]
pub struct NoteCreateArgs {
    pub post_id: u64,
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct NoteUpdateArgs {
    pub note_id: u64,
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub body: String,
}

/// Binding for notes.
#[derive(Debug, Clone)]
pub struct Notes {
    model: Model,
}

impl Notes {
    pub(crate) fn new(model: Model) -> Self {
        Notes { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Searches notes.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx replies.
    pub async fn list(&self, args: NoteListArgs) -> Result<Reply> {
        let mut query = QueryArgs::new();
        query
            .push_opt("limit", clamp_limit(args.limit, MAX_LIMIT))
            .push_opt("search[body_matches]", args.body_matches)
            .push_opt("search[creator_id]", args.creator_id)
            .push_opt("search[creator_name]", args.creator_name)
            .push_opt("search[is_active]", args.is_active)
            .push_opt("search[post_id]", args.post_id);
        if !args.post_tags_match.is_empty() {
            query.push("search[post_tags_match]", args.post_tags_match.join(" "));
        }

        self.model
            .submit(RequestSpec::get("notes.json").query(query))
            .await
    }

    /// Adds a note to a post.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::error::Error::NotAuthenticated)
    /// without credentials; transport failures.
    pub async fn create(&self, args: NoteCreateArgs) -> Result<Reply> {
        const ACTION: &str = "create a note";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query
            .push("note[body]", args.body)
            .push("note[height]", args.height)
            .push("note[post_id]", args.post_id)
            .push("note[width]", args.width)
            .push("note[x]", args.x)
            .push("note[y]", args.y);

        let spec = RequestSpec::post("notes.json")
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }

    /// Moves, resizes or rewrites a note.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::error::Error::NotAuthenticated)
    /// without credentials; transport failures.
    pub async fn update(&self, args: NoteUpdateArgs) -> Result<Reply> {
        const ACTION: &str = "update a note";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query
            .push("note[body]", args.body)
            .push("note[height]", args.height)
            .push("note[width]", args.width)
            .push("note[x]", args.x)
            .push("note[y]", args.y);

        let spec = RequestSpec::put(format!("notes/{}.json", args.note_id))
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }

    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::error::Error::NotAuthenticated)
    /// without credentials; transport failures.
    pub async fn delete(&self, note_id: u64) -> Result<Reply> {
        const ACTION: &str = "delete a note";
        self.model.require_auth(ACTION)?;

        let spec = RequestSpec::delete(format!("notes/{note_id}.json")).requires_auth(ACTION);
        self.model.submit(spec).await
    }

    /// Restores the note to an earlier version.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::error::Error::NotAuthenticated)
    /// without credentials; transport failures.
    pub async fn revert(&self, note_id: u64, version_id: u64) -> Result<Reply> {
        const ACTION: &str = "revert a note";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query.push("version_id", version_id);

        let spec = RequestSpec::put(format!("notes/{note_id}/revert.json"))
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }
}
