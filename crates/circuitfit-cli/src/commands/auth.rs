use clap::Subcommand;
use circuitfit_core::{Database, IdentityProvider, User};
use serde::Serialize;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in (resolves to the guest user until a provider is wired in)
    Login {
        /// Token or credential payload
        #[arg(long)]
        token: Option<String>,
    },
    /// Sign out and return to the guest user
    Logout,
    /// Print the current user as JSON
    Whoami,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Status<'a> {
    user: &'a User,
    is_guest: bool,
    is_authenticated: bool,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut identity = IdentityProvider::load(&db);

    match action {
        AuthAction::Login { token } => {
            let user = identity.login(token.as_deref());
            println!("Signed in as {} ({})", user.nombre, user.id);
        }
        AuthAction::Logout => {
            identity.logout();
            println!("Signed out");
        }
        AuthAction::Whoami => {
            let status = Status {
                user: identity.current(),
                is_guest: identity.is_guest(),
                is_authenticated: identity.is_authenticated(),
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
