use std::{
    fmt::{self, Display, Formatter},
    path::Path,
};

use crate::{
    error::Error,
    models::post::Rating,
    request::{Model, Multipart, QueryArgs, RequestSpec},
    resources::{clamp_limit, join, Page},
    result::Result,
    transport::Reply,
};

/// `posts.json` refuses to return more than this many posts at once.
pub const MAX_POST_LIMIT: u32 = 320;

/// Form field the file of an upload is sent under.
pub const UPLOAD_FIELD: &str = "upload[file]";

/// Filters for [`Posts::list`].
#[derive(Debug, Clone, Default)]
pub struct PostListArgs {
    /// Capped at [`MAX_POST_LIMIT`].
    pub limit: Option<u32>,
    /// Numbered pages are capped at [`MAX_PAGE`](super::MAX_PAGE).
    pub page: Option<Page>,
    /// Search tags as typed on the site; metatags like `order:score` work.
    pub tags: Vec<String>,
}

/// Where the content of a new post comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upload {
    /// File contents sent with the request.
    File { filename: String, bytes: Vec<u8> },
    /// A URL the server downloads the file from.
    Url(String),
}

impl Upload {
    /// Reads the file at `path` into an [`Upload::File`].
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or its path has no file name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::invalid(format!("{} has no usable file name", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        Ok(Upload::File { filename, bytes })
    }

    fn validate(&self) -> Result<()> {
        match self {
            Upload::File { filename, .. } if filename.trim().is_empty() => Err(Error::invalid(
                "a file upload needs a file name including its extension, e.g. 'image.png'",
            )),
            Upload::Url(url) if url.trim().is_empty() => {
                Err(Error::invalid("a url upload needs a non-empty direct_url"))
            }
            _ => Ok(()),
        }
    }
}

/// Arguments of [`Posts::create`].
#[derive(Debug, Clone)]
pub struct PostCreateArgs {
    pub upload: Upload,
    pub rating: Rating,
    pub tags: Vec<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<u64>,
    pub referer_url: Option<String>,
    /// MD5 of the file, checked by the server.
    pub md5_confirmation: Option<String>,
    pub as_pending: Option<bool>,
}

impl PostCreateArgs {
    /// The three required pieces of an upload, everything else unset.
    pub fn new(upload: Upload, rating: Rating, tags: Vec<String>) -> Self {
        PostCreateArgs {
            upload,
            rating,
            tags,
            source: None,
            description: None,
            parent_id: None,
            referer_url: None,
            md5_confirmation: None,
            as_pending: None,
        }
    }
}

/// Arguments of [`Posts::update`]; only the fields set are changed.
#[derive(Debug, Clone, Default)]
pub struct PostUpdateArgs {
    pub post_id: u64,
    pub description: Option<String>,
    pub edit_reason: Option<String>,
    pub has_embedded_notes: Option<bool>,
    pub is_note_locked: Option<bool>,
    pub is_rating_locked: Option<bool>,
    pub old_description: Option<String>,
    pub old_parent_id: Option<u64>,
    pub old_rating: Option<Rating>,
    pub parent_id: Option<u64>,
    pub rating: Option<Rating>,
    /// Source changes, one per line; prefix with `-` to remove.
    pub source_diff: Option<Vec<String>>,
    /// Tag changes; prefix with `-` to remove.
    pub tag_string_diff: Option<Vec<String>>,
}

/// Filters for [`Posts::list_flags`].
#[derive(Debug, Clone, Default)]
pub struct PostFlagListArgs {
    pub creator_id: Option<u64>,
    pub creator_name: Option<String>,
    pub post_id: Option<u64>,
}

/// Arguments of [`Posts::create_flag`].
#[derive(Debug, Clone, Default)]
pub struct PostFlagCreateArgs {
    pub post_id: u64,
    /// e.g. `inferior`
    pub reason_name: String,
    /// The superior post when flagging as `inferior`.
    pub parent_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteScore {
    Up,
    Down,
}

impl Display for VoteScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VoteScore::Up => "1",
            VoteScore::Down => "-1",
        })
    }
}

/// Arguments of [`Posts::vote`].
#[derive(Debug, Clone, Copy)]
pub struct PostVoteArgs {
    pub post_id: u64,
    pub score: VoteScore,
    /// When true the vote replaces an earlier one instead of toggling it off.
    pub no_unvote: Option<bool>,
}

/// Binding for posts, uploads, post flags and votes.
#[derive(Debug, Clone)]
pub struct Posts {
    model: Model,
}

impl Posts {
    pub(crate) fn new(model: Model) -> Self {
        Posts { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Lists posts matching `args`.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx replies.
    pub async fn list(&self, args: PostListArgs) -> Result<Reply> {
        let mut query = QueryArgs::new();
        query
            .push_opt("limit", clamp_limit(args.limit, MAX_POST_LIMIT))
            .push_opt("page", args.page.map(Page::capped));
        if !args.tags.is_empty() {
            query.push("tags", args.tags.join(" "));
        }

        self.model
            .submit(RequestSpec::get("posts.json").query(query))
            .await
    }

    /// Uploads a new post, either from file contents or from a URL.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] without credentials.
    /// - [`Error::InvalidParameter`] for an upload without file name or URL.
    /// - Transport failures and non-2xx replies.
    pub async fn create(&self, args: PostCreateArgs) -> Result<Reply> {
        const ACTION: &str = "create a post";
        self.model.require_auth(ACTION)?;
        args.upload.validate()?;

        let (direct_url, multipart) = match args.upload {
            Upload::Url(url) => (Some(url), None),
            Upload::File { filename, bytes } => {
                (None, Some(Multipart::new(UPLOAD_FIELD, filename, bytes)))
            }
        };

        let mut query = QueryArgs::new();
        query
            .push_opt("upload[as_pending]", args.as_pending)
            .push_opt("upload[description]", args.description)
            .push_opt("upload[direct_url]", direct_url)
            .push_opt("upload[md5_confirmation]", args.md5_confirmation)
            .push_opt("upload[parent_id]", args.parent_id)
            .push("upload[rating]", args.rating)
            .push_opt("upload[referer_url]", args.referer_url)
            .push("upload[source]", args.source.unwrap_or_default())
            .push("upload[tag_string]", args.tags.join(" "));

        let mut spec = RequestSpec::post("uploads.json")
            .query(query)
            .requires_auth(ACTION);
        if let Some(multipart) = multipart {
            spec = spec.multipart(multipart);
        }
        self.model.submit(spec).await
    }

    /// Edits a post. Unset fields are left alone.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`] without credentials; transport failures.
    pub async fn update(&self, args: PostUpdateArgs) -> Result<Reply> {
        const ACTION: &str = "update a post";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query
            .push_opt("post[description]", args.description)
            .push_opt("post[edit_reason]", args.edit_reason)
            .push_opt("post[has_embedded_notes]", args.has_embedded_notes)
            .push_opt("post[is_note_locked]", args.is_note_locked)
            .push_opt("post[is_rating_locked]", args.is_rating_locked)
            .push_opt("post[old_description]", args.old_description)
            .push_opt("post[old_parent_id]", args.old_parent_id)
            .push_opt("post[old_rating]", args.old_rating)
            .push_opt("post[parent_id]", args.parent_id)
            .push_opt("post[rating]", args.rating)
            .push_opt("post[source_diff]", args.source_diff.map(|d| join(&d, "\n")))
            .push_opt("post[tag_string_diff]", args.tag_string_diff.map(|d| join(&d, " ")));

        let spec = RequestSpec::patch(format!("posts/{}.json", args.post_id))
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }

    /// Lists flags, filtered by post and/or flag creator.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx replies.
    pub async fn list_flags(&self, args: PostFlagListArgs) -> Result<Reply> {
        let mut query = QueryArgs::new();
        query
            .push_opt("search[creator_id]", args.creator_id)
            .push_opt("search[creator_name]", args.creator_name)
            .push_opt("search[post_id]", args.post_id);

        self.model
            .submit(RequestSpec::get("post_flags.json").query(query))
            .await
    }

    /// Flags a post.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`] without credentials; transport failures.
    pub async fn create_flag(&self, args: PostFlagCreateArgs) -> Result<Reply> {
        const ACTION: &str = "flag a post";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query
            .push("post_flag[post_id]", args.post_id)
            .push_opt("post_flag[parent_id]", args.parent_id)
            .push("post_flag[reason_name]", args.reason_name);

        let spec = RequestSpec::post("post_flags.json")
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }

    /// Votes a post up or down.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`] without credentials; transport failures.
    pub async fn vote(&self, args: PostVoteArgs) -> Result<Reply> {
        const ACTION: &str = "vote on a post";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query
            .push_opt("no_unvote", args.no_unvote)
            .push("score", args.score);

        let spec = RequestSpec::post(format!("posts/{}/votes.json", args.post_id))
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }
}
