use dotenvy::dotenv;
use std::path::Path;

use rh_admin::config::Config;
use rh_admin::db::init_db;
use rh_admin::jobs::import;
use rh_admin::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();
    let _guard = logging::init("import_employees");

    let pool = init_db(&config.database_url).await;

    import::run(
        &pool,
        Path::new(&config.import_file),
        config.csv_delimiter,
        &config.default_password,
    )
    .await?;

    Ok(())
}
