mod api;
mod db;
mod helper_model;
mod methods;
mod model;
mod schema;

use once_cell::sync::Lazy;
use std::env;
use warp::Filter;

pub static POOL: Lazy<db::PgPool> = Lazy::new(db::get_connection_pool);

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dumpsterpro_httpd=info,warp=info".into()),
        )
        .init();

    // SESSION_SECRET signs invitation tokens; refuse to boot without it in
    // production.
    if methods::environment::is_production() && env::var("SESSION_SECRET").is_err() {
        panic!("SESSION_SECRET must be set in production");
    }

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3030);

    // routing for the server
    let httpd = api::api().and(warp::path::end());
    tracing::info!(port, "starting dumpsterpro-httpd");
    warp::serve(httpd).run(([0, 0, 0, 0], port)).await;
}
