mod allocate;
mod cli;
mod infra;
mod routes;
mod server;

use line_bid::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
