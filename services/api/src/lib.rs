mod cli;
mod infra;
mod report;
mod routes;
mod server;

use recruitment_map::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
