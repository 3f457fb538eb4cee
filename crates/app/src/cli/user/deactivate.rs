use clap::Args;
use pantry_app::{
    auth::PasswordHasherConfig,
    domain::users::{PgUsersService, UsersService, records::UserId},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct DeactivateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Numeric user id
    #[arg(long)]
    id: i64,
}

pub(crate) async fn run(args: DeactivateUserArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let service = PgUsersService::new(pool, PasswordHasherConfig::default());

    service
        .deactivate_user(UserId::new(args.id), None)
        .await
        .map_err(|error| format!("failed to deactivate user {}: {error}", args.id))?;

    println!("user {} deactivated", args.id);

    Ok(())
}
