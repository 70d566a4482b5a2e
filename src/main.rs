use anyhow::Context;
use folio_app::modules;
use folio_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = folio_kernel::settings::Settings::load()
        .with_context(|| "failed to load folio settings")?;

    folio_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        "folio-app bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("folio-app bootstrap complete");

    folio_http::start_server(&registry, &settings)
        .await
        .with_context(|| "HTTP server exited with an error")?;

    registry.stop_all().await?;
    Ok(())
}
