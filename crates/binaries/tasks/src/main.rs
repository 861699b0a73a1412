mod reindex;

use app_state::settings;
use color_eyre::Result;
use common_services::ai::AiClient;
use common_services::database::get_db_pool;
use common_types::Taxonomy;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    color_eyre::install()?;

    let pool = get_db_pool().await?;
    let ai = AiClient::from_settings(&settings().ai, Taxonomy::default())?;
    reindex::run(&pool, &ai).await?;
    Ok(())
}
