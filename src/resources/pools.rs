use std::fmt::{self, Display, Formatter};

use crate::{
    models::pool::PoolCategory,
    request::{Model, QueryArgs, RequestSpec},
    resources::{clamp_limit, flag, join, MAX_LIMIT},
    result::Result,
    transport::Reply,
};

/// Sort order of [`Pools::list`]. The server defaults to `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolOrder {
    Name,
    CreatedAt,
    UpdatedAt,
    PostCount,
}

impl Display for PoolOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PoolOrder::Name => "name",
            PoolOrder::CreatedAt => "created_at",
            PoolOrder::UpdatedAt => "updated_at",
            PoolOrder::PostCount => "post_count",
        })
    }
}

/// Filters for [`Pools::list`]. `*_matches` fields accept `*` wildcards.
#[derive(Debug, Clone, Default)]
pub struct PoolListArgs {
    pub category: Option<PoolCategory>,
    pub creator_id: Option<u64>,
    pub creator_name: Option<String>,
    pub description_matches: Option<String>,
    pub id: Option<u64>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
    pub name_matches: Option<String>,
    pub order: Option<PoolOrder>,
    /// Capped at [`MAX_LIMIT`].
    pub limit: Option<u32>,
}

/// Arguments of [`Pools::create`].
#[derive(Debug, Clone, Default)]
pub struct PoolCreateArgs {
    pub name: String,
    pub description: String,
    pub category: Option<PoolCategory>,
    pub is_locked: Option<bool>,
}

/// Arguments of [`Pools::update`]; only the fields set are changed.
#[derive(Debug, Clone, Default)]
pub struct PoolUpdateArgs {
    pub id: u64,
    pub category: Option<PoolCategory>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub name: Option<String>,
    /// Replaces the pool's posts, in this order.
    pub post_ids: Option<Vec<u64>>,
}

/// Binding for pools.
#[derive(Debug, Clone)]
pub struct Pools {
    model: Model,
}

impl Pools {
    pub(crate) fn new(model: Model) -> Self {
        Pools { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Searches pools.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx replies.
    pub async fn list(&self, args: PoolListArgs) -> Result<Reply> {
        let mut query = QueryArgs::new();
        query
            .push_opt("limit", clamp_limit(args.limit, MAX_LIMIT))
            .push_opt("search[category]", args.category)
            .push_opt("search[creator_id]", args.creator_id)
            .push_opt("search[creator_name]", args.creator_name)
            .push_opt("search[description_matches]", args.description_matches)
            .push_opt("search[id]", args.id)
            .push_opt("search[is_active]", args.is_active)
            .push_opt("search[is_deleted]", args.is_deleted)
            .push_opt("search[name_matches]", args.name_matches)
            .push_opt("search[order]", args.order);

        self.model
            .submit(RequestSpec::get("pools.json").query(query))
            .await
    }

    /// Creates a pool.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::error::Error::NotAuthenticated)
    /// without credentials; transport failures.
    pub async fn create(&self, args: PoolCreateArgs) -> Result<Reply> {
        const ACTION: &str = "create a pool";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query
            .push_opt("pool[category]", args.category)
            .push("pool[description]", args.description)
            .push_opt("pool[is_locked]", args.is_locked.map(flag))
            .push("pool[name]", args.name);

        let spec = RequestSpec::post("pools.json")
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }

    /// Edits a pool.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::error::Error::NotAuthenticated)
    /// without credentials; transport failures.
    pub async fn update(&self, args: PoolUpdateArgs) -> Result<Reply> {
        const ACTION: &str = "update a pool";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query
            .push_opt("pool[category]", args.category)
            .push_opt("pool[description]", args.description)
            .push_opt("pool[is_active]", args.is_active.map(flag))
            .push_opt("pool[name]", args.name)
            .push_opt("pool[post_ids]", args.post_ids.map(|ids| join(&ids, " ")));

        let spec = RequestSpec::put(format!("pools/{}.json", args.id))
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }

    /// Restores the pool to an earlier version.
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`](crate::error::Error::NotAuthenticated)
    /// without credentials; transport failures.
    pub async fn revert(&self, id: u64, version_id: u64) -> Result<Reply> {
        const ACTION: &str = "revert a pool";
        self.model.require_auth(ACTION)?;

        let mut query = QueryArgs::new();
        query.push("version_id", version_id);

        let spec = RequestSpec::put(format!("pools/{id}/revert.json"))
            .query(query)
            .requires_auth(ACTION);
        self.model.submit(spec).await
    }
}
