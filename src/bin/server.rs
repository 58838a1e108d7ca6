use anyhow::Result;
use blog_pages::{app, config};

#[tokio::main]
async fn main() -> Result<()> {
    app::init_tracing();

    let config = config::load()?;

    app::run(config).await
}
