//! `keyshelf store`.

use console::style;
use keyshelf_core::{CredentialName, SecretString};
use keyshelf_store::StoreError;

use crate::Context;

/// Store one credential, prompting for the value when none is given.
pub async fn run(ctx: &Context, name: &str, value: Option<String>) -> anyhow::Result<()> {
    // Validate before prompting so a typo doesn't cost the user a secret.
    let name: CredentialName = name.parse().map_err(StoreError::from)?;

    let value = match value {
        Some(v) => SecretString::new(v),
        None => {
            let prompt = format!("Enter value for {name}: ");
            rpassword::prompt_password(prompt)
                .map(SecretString::new)
                .map_err(|e| anyhow::anyhow!("Failed to read value: {}", e))?
        }
    };

    if value.is_empty() {
        anyhow::bail!("Value cannot be empty");
    }

    ctx.store.set_credential(name, &value).await?;

    eprintln!(
        "{} Stored {} in {}.",
        style("*").green(),
        style(name).bold(),
        ctx.store.service()
    );
    Ok(())
}
