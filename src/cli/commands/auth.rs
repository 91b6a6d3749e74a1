use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::client::ApiClient;
use crate::session::store::{FileCredentialStore, TOKEN_KEY};
use crate::session::SessionContext;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the API and persist the session")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        senha: Option<String>,
    },

    #[command(about = "Logout and clear stored credentials")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show the stored user profile")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, senha } => login(email, senha, &output_format).await,
        AuthCommands::Logout => logout(&output_format),
        AuthCommands::Status => status(&output_format),
        AuthCommands::Whoami => whoami(&output_format),
    }
}

async fn login(
    email: String,
    senha: Option<String>,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let senha = match senha {
        Some(senha) => senha,
        None => prompt_senha()?,
    };

    let client = ApiClient::from_config();
    match client.login(&email, &senha).await {
        Ok(payload) => {
            let store = FileCredentialStore::open_default()?;
            let mut session = SessionContext::new(store);
            session.login(payload.user, payload.token)?;

            output_success(
                output_format,
                &format!("Logged in as {}", email),
                Some(json!({ "email": email })),
            )
        }
        Err(e) => {
            // Credential failure stays a user-facing message; the stored
            // session, if any, is left untouched.
            output_error(output_format, &e.to_string(), Some("LOGIN_FAILED"))
        }
    }
}

fn logout(output_format: &OutputFormat) -> anyhow::Result<()> {
    let store = FileCredentialStore::open_default()?;
    let mut session = SessionContext::new(store);
    session.init();
    session.logout()?;

    output_success(output_format, "Logged out", None)
}

fn status(output_format: &OutputFormat) -> anyhow::Result<()> {
    let store = FileCredentialStore::open_default()?;
    let token_path = store.path_for(TOKEN_KEY);
    let mut session = SessionContext::new(store);
    session.init();

    if session.is_authenticated() {
        let saved_at = std::fs::metadata(&token_path)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .ok();

        let email = session
            .user()
            .and_then(|u| u.email.clone())
            .unwrap_or_else(|| "<unknown>".to_string());

        output_success(
            output_format,
            &format!("Authenticated as {}", email),
            Some(json!({
                "authenticated": true,
                "email": email,
                "credentials_saved_at": saved_at,
            })),
        )
    } else {
        output_error(output_format, "Not authenticated", Some("UNAUTHENTICATED"))
    }
}

fn whoami(output_format: &OutputFormat) -> anyhow::Result<()> {
    let store = FileCredentialStore::open_default()?;
    let mut session = SessionContext::new(store);
    session.init();

    match session.user() {
        Some(user) => match output_format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(user)?);
                Ok(())
            }
            OutputFormat::Text => {
                let name = user
                    .nome_completo
                    .as_deref()
                    .or(user.nome.as_deref())
                    .or(user.email.as_deref())
                    .unwrap_or("<unknown>");
                println!("{}", name);
                if let Some(email) = &user.email {
                    println!("Email: {}", email);
                }
                if let Some(loja_id) = user.loja_id {
                    println!("Loja: {}", loja_id);
                }
                Ok(())
            }
        },
        None => output_error(output_format, "Not authenticated", Some("UNAUTHENTICATED")),
    }
}

fn prompt_senha() -> anyhow::Result<String> {
    print!("Senha: ");
    std::io::stdout().flush()?;

    let mut senha = String::new();
    std::io::stdin().lock().read_line(&mut senha)?;
    let senha = senha.trim_end_matches(['\r', '\n']).to_string();

    if senha.is_empty() {
        return Err(anyhow::anyhow!("empty password"));
    }
    Ok(senha)
}
