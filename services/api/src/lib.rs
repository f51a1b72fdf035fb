mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use difficult_ai_core::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
