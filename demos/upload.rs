//! This example shows:
//! - Logging in with a username and API key
//! - Reading a file from disk into an upload
//! - Creating a post from it
//!
//! Run with `E621_USERNAME`, `E621_API_KEY` set and the file path as the first argument.

use dot621::models::post::Rating;
use dot621::resources::posts::{PostCreateArgs, Upload};
use dot621::Client;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new().init()?;

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: upload <file>"))?;

    let client = Client::new("dot621-demo/0.1 (by anonymous)")?;
    client.login(std::env::var("E621_USERNAME")?, std::env::var("E621_API_KEY")?)?;

    let upload = Upload::from_path(&path).await?;
    let mut args = PostCreateArgs::new(upload, Rating::Safe, vec!["tagme".into()]);
    args.as_pending = Some(true);

    let reply = client.posts().create(args).await?;
    println!("{}", reply.text());

    Ok(())
}
