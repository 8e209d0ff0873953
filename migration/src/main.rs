use sea_orm_migration::prelude::*;

/// Apply or roll back schema changes from the command line
#[async_std::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
