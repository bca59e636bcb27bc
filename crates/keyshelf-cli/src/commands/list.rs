//! `keyshelf list`.

use std::io::{self, Write};

use console::style;

use crate::Context;

/// Print every stored credential with its masked value.
pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let count = write_list(ctx, &mut io::stdout().lock()).await?;

    if count == 0 {
        eprintln!(
            "  Run {} to add one.",
            style("keyshelf store <NAME>").bold()
        );
    } else {
        eprintln!("\n{count} credential(s) stored.");
    }
    Ok(())
}

/// Write the service line and one masked line per stored credential.
/// Returns the number of credentials listed.
pub async fn write_list(ctx: &Context, out: &mut impl Write) -> anyhow::Result<usize> {
    let entries = ctx.store.entries().await?;

    writeln!(out, "Service: {}", ctx.store.service())?;

    if entries.is_empty() {
        writeln!(out, "No credentials found.")?;
        return Ok(0);
    }

    for (name, value) in &entries {
        writeln!(out, "{:<20} {}", name.as_str(), value.masked())?;
    }
    Ok(entries.len())
}
