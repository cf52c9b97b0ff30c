//! Text printed by the `lookup` and `responses` subcommands.

use std::io::{self, Write};
use std::path::Path;
use triage_core::TriggerResponse;
use triage_memory::LookupHit;

/// Print the answer to one lookup. With `explain`, the matched trigger and
/// its distance come first; `(none)` stands in when nothing matched.
pub fn write_lookup(
    out: &mut impl Write,
    hit: Option<&LookupHit<'_>>,
    fallback: &str,
    explain: bool,
) -> io::Result<()> {
    match hit {
        Some(hit) => {
            if explain {
                writeln!(out, "trigger:  {}", hit.trigger)?;
                writeln!(out, "distance: {:.6}", hit.distance)?;
            }
            writeln!(out, "{}", hit.response)
        }
        None => {
            if explain {
                writeln!(out, "trigger:  (none)")?;
            }
            writeln!(out, "{fallback}")
        }
    }
}

/// Print the configured table, or a hint pointing at `config_path` when it
/// is empty.
pub fn write_responses(
    out: &mut impl Write,
    entries: &[TriggerResponse],
    config_path: &Path,
) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No responses configured.")?;
        return writeln!(out, "Add [[responses]] entries to {}", config_path.display());
    }

    writeln!(out, "Configured responses:")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "  {}. {} — {}", i + 1, entry.trigger, entry.response)?;
    }
    writeln!(out, "\nTotal: {} response(s)", entries.len())
}
