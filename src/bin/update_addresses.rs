use dotenvy::dotenv;
use std::time::Duration;

use rh_admin::config::Config;
use rh_admin::db::init_db;
use rh_admin::jobs::address_update;
use rh_admin::logging;
use rh_admin::viacep::ViaCepClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();
    let _guard = logging::init("update_addresses");

    let pool = init_db(&config.database_url).await;
    let client = ViaCepClient::new(config.viacep_base_url.clone())?;

    address_update::run(
        &pool,
        &client,
        Duration::from_millis(config.lookup_pause_ms),
    )
    .await?;

    Ok(())
}
