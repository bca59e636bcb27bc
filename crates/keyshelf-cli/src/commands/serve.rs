//! `keyshelf serve`.

use clap::Args;
use console::style;
use keyshelf_core::env::{self, vars};
use keyshelf_server::{ApiKey, Server, ServerConfig};

use crate::Context;

/// Server command arguments.
#[derive(Args)]
pub struct ServeArgs {
    /// Host to bind to [default: localhost]
    #[arg(long, env = vars::HOST)]
    pub host: Option<String>,

    /// Port to listen on [default: 8000]
    #[arg(short, long, env = vars::PORT)]
    pub port: Option<u16>,

    /// API key clients must send as a bearer token
    /// (falls back to KEYSHELF_API_KEY, then a generated key)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Resolve host and port: flag or env var, then config file, then defaults.
pub fn resolve_bind(ctx: &Context, args: &ServeArgs) -> (String, u16) {
    let host = args
        .host
        .clone()
        .unwrap_or_else(|| ctx.config.server.host.clone());
    let port = args.port.unwrap_or(ctx.config.server.port);
    (host, port)
}

/// Run the HTTP server until interrupted.
pub async fn run(ctx: &Context, args: ServeArgs) -> anyhow::Result<()> {
    let (host, port) = resolve_bind(ctx, &args);
    let api_key = ApiKey::resolve_from(args.api_key, env::get_var(vars::API_KEY));

    if api_key.is_ephemeral() {
        eprintln!(
            "{} No API key provided or found in {}.",
            style("!").yellow().bold(),
            vars::API_KEY
        );
        eprintln!(
            "{} Generated temporary API key: {}",
            style("!").yellow().bold(),
            style(api_key.expose()).bold()
        );
        eprintln!(
            "{} This key is valid only for this server instance.",
            style("!").yellow().bold()
        );
    }

    let server = Server::new(ServerConfig::new(host, port, api_key), ctx.store.clone());
    eprintln!(
        "Serving {} on http://{} (Ctrl+C to stop)",
        style(ctx.store.service()).bold(),
        server.bind_address()
    );
    server.run().await?;
    Ok(())
}
