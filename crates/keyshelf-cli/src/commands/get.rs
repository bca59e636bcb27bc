//! `keyshelf get`.

use std::io::{self, Write};

use crate::Context;

/// Print the raw value of one credential.
pub async fn run(ctx: &Context, name: &str) -> anyhow::Result<()> {
    write_value(ctx, name, &mut io::stdout().lock()).await
}

/// Write the raw value of `name` followed by a newline.
pub async fn write_value(ctx: &Context, name: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let value = ctx.store.get(name).await?;
    writeln!(out, "{}", value.expose_secret())?;
    Ok(())
}
