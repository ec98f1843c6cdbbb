//! Typed shapes of the API's JSON replies.
//!
//! Nothing in the request path parses responses; decode a
//! [`Reply`](crate::transport::Reply) with [`Reply::json`](crate::transport::Reply::json)
//! into one of these when you want typed access. Unknown fields are ignored.

pub mod note;
pub mod pool;
pub mod post;
pub mod tag;
pub mod tag_alias;

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}
