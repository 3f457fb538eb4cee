use clap::Args;
use pantry_app::domain::users::{PgUsersService, UsersService, data::NewUser};

use crate::cli::{DatabaseArgs, HasherArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    hasher: HasherArgs,

    /// Login name; must be unique
    #[arg(long)]
    username: String,

    /// Initial password
    #[arg(long, env = "PANTRY_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Optional contact address
    #[arg(long)]
    email: Option<String>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let service = PgUsersService::new(pool, args.hasher.config());

    let user = service
        .create_user(NewUser {
            username: args.username,
            password: args.password,
            email: args.email,
            is_active: true,
            created_by: None,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);

    Ok(())
}
