use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::client::ApiClient;
use crate::guard::RouteGuard;
use crate::resolver::StoreLabelResolver;
use crate::session::store::FileCredentialStore;
use crate::session::SessionContext;

#[derive(Subcommand)]
pub enum LojaCommands {
    #[command(about = "Resolve and show the current store label")]
    Current,
}

pub async fn handle(cmd: LojaCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        LojaCommands::Current => current(&output_format).await,
    }
}

async fn current(output_format: &OutputFormat) -> anyhow::Result<()> {
    // The guard is advisory; the real gate is the session check below.
    RouteGuard::new().evaluate("/loja/current");

    let store = FileCredentialStore::open_default()?;
    let mut session = SessionContext::new(store);
    session.init();

    let (Some(user), Some(token)) = (session.user(), session.token()) else {
        return output_error(output_format, "Not authenticated", Some("UNAUTHENTICATED"));
    };

    let resolver = StoreLabelResolver::new(ApiClient::from_config());
    let label = resolver.resolve(user, token).await;

    output_success(
        output_format,
        &format!("Current store: {}", label),
        Some(json!({ "loja": label })),
    )
}
