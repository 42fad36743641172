//! Output formatting for the inspector commands.

use lineage::record::{Origin, OwnEntries, VisibleEntry};
use serde_json::{Map, Value};
use std::io::{self, Write};

/// `key: value` per line; values are printed as JSON.
pub(crate) fn own_text(out: &mut impl Write, entries: OwnEntries<'_>) -> io::Result<()> {
    for (key, value) in entries {
        writeln!(out, "{key}: {value}")?;
    }
    Ok(())
}

/// A pretty-printed JSON object in enumeration order.
pub(crate) fn own_json(out: &mut impl Write, entries: OwnEntries<'_>) -> io::Result<()> {
    let object: Map<String, Value> =
        entries.map(|(key, value)| (key.into_owned(), value.clone())).collect();
    serde_json::to_writer_pretty(&mut *out, &object)?;
    writeln!(out)
}

pub(crate) fn visible_text(
    out: &mut impl Write,
    entries: impl IntoIterator<Item = VisibleEntry>,
) -> io::Result<()> {
    for VisibleEntry { key, value, origin } in entries {
        match origin {
            Origin::Own => writeln!(out, "{key}: {value}")?,
            Origin::Inherited { template, .. } => {
                writeln!(out, "{key}: {value} (inherited from {template})")?;
            },
        }
    }
    Ok(())
}

pub(crate) fn visible_json(out: &mut impl Write, entries: &[VisibleEntry]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, entries)?;
    writeln!(out)
}
