use crate::commands::Commands;
use crate::error::{CliError, Result as CliResult};
use crate::profile_commands::ProfileCommands;
use crate::views::{IdentityView, ProfileOutput, RegisteredOutput, SessionView};

use std::path::Path;
use std::process::ExitCode;

use log::info;
use serde::Serialize;
use serde_json::Value;
use vs_client::Client;
use vs_config::Config;
use vs_core::{
    CoreError, Credentials, PasswordChange, ProfilePicture, ProfileUpdate, RegistrationForm,
};
use vs_session::{
    AuthRejection, FileSessionStorage, NavigationTargets, Redirect, RouteGuard, SessionSnapshot,
    SessionStore, Settled, settle,
};

/// Exit code when the backend ended the session.
pub const SESSION_ENDED_EXIT_CODE: u8 = 2;

pub type Store = SessionStore<Client, FileSessionStorage>;

/// What a command produced.
#[derive(Debug)]
pub enum Outcome {
    Output(Value),
    /// Credential rejected; the user has to sign in again
    SessionEnded(Redirect),
}

#[derive(Serialize)]
struct SessionEndedOutput<'a> {
    session_ended: bool,
    redirect: &'a Redirect,
}

impl Outcome {
    pub fn render(&self, pretty: bool) -> serde_json::Result<String> {
        match self {
            Self::Output(value) if pretty => serde_json::to_string_pretty(value),
            Self::Output(value) => serde_json::to_string(value),
            Self::SessionEnded(redirect) => {
                let output = SessionEndedOutput {
                    session_ended: true,
                    redirect,
                };
                if pretty {
                    serde_json::to_string_pretty(&output)
                } else {
                    serde_json::to_string(&output)
                }
            }
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Output(_) => ExitCode::SUCCESS,
            Self::SessionEnded(_) => ExitCode::from(SESSION_ENDED_EXIT_CODE),
        }
    }
}

/// Application root: owns the session store and turns commands into output.
pub struct App {
    store: Store,
    targets: NavigationTargets,
}

impl App {
    pub fn new(client: Client, storage: FileSessionStorage, targets: NavigationTargets) -> Self {
        Self {
            store: SessionStore::new(client, storage),
            targets,
        }
    }

    pub fn from_config(config: &Config) -> CliResult<Self> {
        let storage = FileSessionStorage::new(config.session_dir()?);
        let targets = NavigationTargets {
            sign_in_path: config.session.sign_in_path.clone(),
            landing_path: config.session.landing_path.clone(),
        };

        Ok(Self::new(Client::new(&config.api.base_url), storage, targets))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Restores the saved session. Must run before any command.
    pub fn initialize(&self) -> SessionView {
        self.store.initialize();
        SessionView::from(&self.store.snapshot())
    }

    pub async fn run(&self, command: Commands) -> CliResult<Outcome> {
        match command {
            Commands::Login { username, password } => {
                let identity = self
                    .store
                    .sign_in(&Credentials::new(username, password))
                    .await?;
                output(IdentityView::from(&identity))
            }

            Commands::Register {
                username,
                email,
                password,
                confirm_password,
                first_name,
                last_name,
                role,
            } => {
                let registration = RegistrationForm {
                    username,
                    email,
                    password,
                    confirm_password,
                    first_name,
                    last_name,
                    role,
                }
                .validate()?;

                self.store.sign_up(&registration).await?;

                output(RegisteredOutput {
                    registered: registration.username.clone(),
                    role: registration.role,
                    sign_in_path: self.targets.sign_in_path.clone(),
                })
            }

            Commands::Logout => {
                self.store.sign_out().await;
                output(SessionView::from(&self.store.snapshot()))
            }

            Commands::Whoami => output(SessionView::from(&self.store.snapshot())),

            Commands::Profile { action } => self.run_profile(action).await,

            Commands::Guard {
                path,
                guest_only,
                roles,
            } => {
                let guard = if guest_only {
                    RouteGuard::guest_only()
                } else {
                    RouteGuard::authenticated()
                };
                let guard = if roles.is_empty() {
                    guard
                } else {
                    guard.with_roles(roles)
                };

                output(guard.evaluate(&self.store.snapshot(), &path, &self.targets))
            }

            Commands::Get { path } => {
                let snapshot = self.store.snapshot();
                let result = self
                    .store
                    .backend()
                    .get_json(&path, snapshot.token())
                    .await
                    .map(|envelope| envelope.data.unwrap_or(Value::Null));

                self.finish(&snapshot, Some(&path), result)
            }
        }
    }

    async fn run_profile(&self, action: ProfileCommands) -> CliResult<Outcome> {
        let client = self.store.backend();
        let snapshot = self.store.snapshot();

        let result = match action {
            ProfileCommands::Show => self.store.refresh_profile(client).await.map(identity_output),

            ProfileCommands::Update {
                username,
                email,
                first_name,
                last_name,
            } => {
                let update = ProfileUpdate {
                    username,
                    email,
                    first_name,
                    last_name,
                };
                self.store
                    .update_profile(client, &update)
                    .await
                    .map(identity_output)
            }

            ProfileCommands::Password { current, new } => self
                .store
                .change_password(client, &PasswordChange::new(current, new))
                .await
                .map(|()| ProfileOutput::PasswordChanged {
                    password_changed: true,
                }),

            ProfileCommands::Avatar { file } => {
                let picture = read_picture(&file)?;
                self.store
                    .update_avatar(client, &picture)
                    .await
                    .map(identity_output)
            }
        };

        self.finish(&snapshot, None, result)
    }

    /// Routes an authenticated result through the session-ending handler.
    fn finish<T, E>(
        &self,
        issued_under: &SessionSnapshot,
        return_to: Option<&str>,
        result: Result<T, E>,
    ) -> CliResult<Outcome>
    where
        T: Serialize,
        E: AuthRejection,
        CliError: From<E>,
    {
        match settle(&self.store, issued_under, &self.targets, return_to, result) {
            Settled::Completed(value) => output(value),
            Settled::Failed(e) => Err(e.into()),
            Settled::SessionEnded(redirect) => {
                info!("Session ended, sign in again at {}", redirect.to);
                Ok(Outcome::SessionEnded(redirect))
            }
        }
    }
}

fn identity_output(identity: vs_core::Identity) -> ProfileOutput {
    ProfileOutput::Identity(IdentityView::from(&identity))
}

fn output(value: impl Serialize) -> CliResult<Outcome> {
    serde_json::to_value(value)
        .map(Outcome::Output)
        .map_err(CliError::output)
}

/// Loads an avatar file; the type comes from the extension.
fn read_picture(path: &Path) -> CliResult<ProfilePicture> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    let Some(mime_type) = ProfilePicture::mime_for_extension(extension) else {
        return Err(CoreError::validation(format!(
            "{} is not a supported image (png, jpg, gif, webp, bmp, svg)",
            path.display()
        ))
        .into());
    };

    let bytes = std::fs::read(path).map_err(|e| CliError::io(path.to_path_buf(), e))?;
    Ok(ProfilePicture::from_bytes(mime_type, &bytes)?)
}
