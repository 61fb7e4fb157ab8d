use crate::profile_commands::ProfileCommands;

use clap::Subcommand;
use vs_core::Role;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account (does not sign in)
    Register {
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// consumer or creator
        #[arg(long, default_value = "consumer")]
        role: Role,
    },

    /// Forget the current session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Profile of the signed-in user
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Check whether a location may be visited in the current session
    Guard {
        /// Location being visited, e.g. /my-videos
        path: String,

        /// Location is a sign-in/sign-up entry point
        #[arg(long)]
        guest_only: bool,

        /// Restrict to these roles (repeatable)
        #[arg(long = "role", conflicts_with = "guest_only")]
        roles: Vec<Role>,
    },

    /// Fetch any backend resource with the session's credential
    Get {
        /// Resource path, e.g. /videos/
        path: String,
    },
}
