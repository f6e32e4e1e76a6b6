use lambda_http::Error;
use log::info;

use nourishplate_shared::auth;
use nourishplate_shared::config::InviteConfig;

mod error;
mod handlers;
mod models;
mod routes;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize env_logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting NourishPlate Invite Service");

    // Fail fast on missing credentials; nothing is defaulted.
    let config = InviteConfig::from_env()?;
    auth::init_auth(config.jwt_secret.clone());

    let app = routes::create_router(config);

    lambda_http::run(app).await
}
