mod cli;
mod infra;
mod report;
mod routes;
mod server;

use freebie_calendar::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
