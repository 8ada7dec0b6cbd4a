//! # Plain-Text Report Renderer
//!
//! The output-formatting seam of the pipeline: given the summary count
//! mapping, the two field-alias mappings, and the two projected record
//! collections, produce the formatted report. This renderer emits a plain
//! text summary followed by YAML dumps of the record collections; richer
//! output formats would replace this module without touching the pipeline.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;

use lib_msr::{FieldAliasMap, ProjectedAction, TimeWindow};

/// Renders the complete report as plain text.
pub fn render_text(
    window: &TimeWindow,
    summary: &BTreeMap<String, u64>,
    fields: &FieldAliasMap,
    gerrit_fields: &FieldAliasMap,
    actions: &[ProjectedAction],
    wip: &[ProjectedAction],
) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "Monthly status report: {} .. {}", window.start, window.end)?;
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    for (kind, count) in summary {
        writeln!(out, "  {kind}: {count}")?;
    }

    writeln!(out)?;
    writeln!(out, "Actions ({}):", field_list(fields))?;
    out.push_str(&serde_yml::to_string(&actions)?);

    writeln!(out)?;
    writeln!(out, "Work in progress ({}):", field_list(gerrit_fields))?;
    out.push_str(&serde_yml::to_string(&wip)?);

    Ok(out)
}

/// Comma-joined canonical field names of an alias map.
fn field_list(fields: &FieldAliasMap) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}
