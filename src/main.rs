use std::env;

use anyhow::Context;
use dotenvy::dotenv;
use order_console::{console, create_pool, run_migrations};

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    log::info!("Catalog ready, starting the order console");

    console::run(pool)
}
