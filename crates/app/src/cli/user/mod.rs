use clap::{Args, Subcommand};

mod create;
mod deactivate;
mod password;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Create an active account
    Create(create::CreateUserArgs),

    /// Soft-delete an account
    Deactivate(deactivate::DeactivateUserArgs),

    /// Replace an account's password
    Password(password::UpdatePasswordArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Deactivate(args) => deactivate::run(args).await,
        UserSubcommand::Password(args) => password::run(args).await,
    }
}
