use lambda_http::Error;
use log::info;

use nourishplate_shared::config::NutritionConfig;

mod cache;
mod error;
mod facts;
mod genai;
mod handlers;
mod models;
mod plan;
mod routes;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize env_logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting NourishPlate Nutrition Service");

    // Fail fast on a missing model credential; nothing is defaulted.
    let config = NutritionConfig::from_env()?;

    let app = routes::create_router(config);

    lambda_http::run(app).await
}
