//! `keyshelf store-file`.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context as _;
use console::style;

use crate::import::{parse_credentials, LineFailure};
use crate::Context;

/// Outcome of a bulk import.
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Number of credentials written.
    pub stored: usize,
    /// Lines that failed to parse or store.
    pub failures: Vec<LineFailure>,
    /// The operator declined the confirmation prompt.
    pub cancelled: bool,
}

/// Import credentials from `path`, then fail if any line failed.
pub async fn run(ctx: &Context, path: &Path, yes: bool) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let summary = import_file(ctx, path, yes, &mut stdin.lock()).await?;

    if summary.cancelled {
        return Ok(());
    }

    if summary.failures.is_empty() {
        eprintln!(
            "\n{} All {} credential(s) stored.",
            style("*").green(),
            summary.stored
        );
        return Ok(());
    }

    eprintln!(
        "\n{} Stored {} credential(s); {} line(s) failed:",
        style("!").yellow().bold(),
        summary.stored,
        summary.failures.len()
    );
    for failure in &summary.failures {
        eprintln!("  line {}: {}", failure.line, failure.reason);
    }
    anyhow::bail!(
        "{} of {} line(s) could not be stored",
        summary.failures.len(),
        summary.stored + summary.failures.len()
    )
}

/// Parse `path`, preview and confirm, then store every valid assignment.
///
/// Confirmation is read from `input` unless `yes` is set. Per-line failures
/// are collected in the summary rather than aborting the batch.
pub async fn import_file(
    ctx: &Context,
    path: &Path,
    yes: bool,
    input: &mut impl BufRead,
) -> anyhow::Result<ImportSummary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = parse_credentials(&content);

    let mut summary = ImportSummary {
        failures: parsed.failures,
        ..Default::default()
    };

    if parsed.assignments.is_empty() {
        for failure in &summary.failures {
            eprintln!("  line {}: {}", failure.line, failure.reason);
        }
        anyhow::bail!("No valid credentials found in {}", path.display());
    }

    eprintln!(
        "Found {} credential(s) to store in {}:",
        parsed.assignments.len(),
        ctx.store.service()
    );
    for assignment in &parsed.assignments {
        eprintln!("  - {}: {}", assignment.name, assignment.value.masked());
    }

    if !yes && !confirm(input)? {
        eprintln!("Operation cancelled.");
        summary.cancelled = true;
        return Ok(summary);
    }

    for assignment in &parsed.assignments {
        match ctx
            .store
            .set_credential(assignment.name, &assignment.value)
            .await
        {
            Ok(()) => {
                tracing::debug!(name = %assignment.name, "imported credential");
                summary.stored += 1;
            }
            Err(e) => summary.failures.push(LineFailure {
                line: assignment.line,
                reason: e.to_string(),
            }),
        }
    }

    summary.failures.sort_by_key(|f| f.line);
    Ok(summary)
}

fn confirm(input: &mut impl BufRead) -> anyhow::Result<bool> {
    eprint!("\nStore these credentials? (y/n): ");
    std::io::stderr().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
