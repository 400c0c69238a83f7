//! The `wordquiz serve` command.

use std::sync::Arc;

use anyhow::Result;

use wordquiz_server::{router, serve, AppState};

use super::{build_engine, ProviderArgs};

pub async fn execute(bind: Option<String>, args: ProviderArgs) -> Result<()> {
    let config = args.load_config()?;
    let engine = build_engine(&config, &args)?;

    let app = router(
        AppState::new(Arc::new(engine)),
        &config.server.cors_origins,
    );
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    serve(&addr, app).await
}
