mod cli;
mod infra;
mod quote;
mod routes;
mod server;

use wiria_engage::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
