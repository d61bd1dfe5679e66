mod cli;
mod commands;
mod infra;

use medfit::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
