mod cli;
mod infra;
mod report;
mod routes;
mod server;

use org_dashboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
