mod cli;
mod infra;
mod report;
mod routes;
mod server;

use biomarker_insights::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
