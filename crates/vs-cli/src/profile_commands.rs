use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Fetch the profile and refresh the stored identity
    Show,

    /// Change personal fields
    Update {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Change the password
    Password {
        #[arg(long)]
        current: String,

        #[arg(long)]
        new: String,
    },

    /// Upload a new avatar image (at most 5MB)
    Avatar { file: PathBuf },
}
