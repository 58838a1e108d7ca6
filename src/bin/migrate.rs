use anyhow::Result;
use blog_pages::{app, config, db};

#[tokio::main]
async fn main() -> Result<()> {
    app::init_tracing();

    let config = config::load()?;
    let _ = db::connect_to_db(config.database_url.as_str()).await?;
    tracing::info!("DB successfully initialized");

    Ok(())
}
