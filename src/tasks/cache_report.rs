use anyhow::Result;

use crate::app::AppState;

pub async fn report_cache_usage(app: AppState) -> Result<()> {
    let (cache_hits, cache_misses) = app.diag.snapshot();
    tracing::info!(
        "eff={}, cache_hits={}, cache_misses={}, cached_pages={}",
        app.diag.efficiency(),
        cache_hits,
        cache_misses,
        app.pages.len()
    );
    Ok(())
}
