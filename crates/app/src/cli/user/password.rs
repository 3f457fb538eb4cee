use clap::Args;
use pantry_app::domain::users::{PgUsersService, UsersService, records::UserId};

use crate::cli::{DatabaseArgs, HasherArgs};

#[derive(Debug, Args)]
pub(crate) struct UpdatePasswordArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    hasher: HasherArgs,

    /// Numeric user id
    #[arg(long)]
    id: i64,

    /// New password
    #[arg(long, env = "PANTRY_USER_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: UpdatePasswordArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let service = PgUsersService::new(pool, args.hasher.config());

    service
        .update_password(UserId::new(args.id), &args.password, None)
        .await
        .map_err(|error| format!("failed to update password for user {}: {error}", args.id))?;

    println!("password updated for user {}", args.id);

    Ok(())
}
