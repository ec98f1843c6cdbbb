//! This example shows:
//! - Creating a dot621 client
//! - Searching tags by name pattern
//! - Decoding the reply into tag models

use dot621::models::tag::Tag;
use dot621::resources::tags::{TagListArgs, TagOrder};
use dot621::Client;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new().init()?;

    // The site asks every client to identify itself with a descriptive user agent.
    let client = Client::new("dot621-demo/0.1 (by anonymous)")?;

    let reply = client
        .tags()
        .list(TagListArgs {
            limit: Some(10),
            name_matches: Some("horse*".into()),
            hide_empty: Some(true),
            order: Some(TagOrder::Count),
            ..Default::default()
        })
        .await?;

    for tag in reply.json::<Vec<Tag>>()? {
        let category = tag.category().name();
        println!("{:<32} {:>8} ({category})", tag.name(), tag.post_count());
    }

    Ok(())
}
