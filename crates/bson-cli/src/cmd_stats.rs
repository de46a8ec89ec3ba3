/// Implementation of `bson stats`.
///
/// Decodes every document and prints size and element-type figures.
/// Element counts include nested documents and array items.
///
/// # Example output
///
/// ```text
/// File:       /tmp/users.bson  (1204 bytes)
/// Documents:  12 total, 12 with _id
/// Size:       min 61, max 144, avg 100 bytes
/// Depth:      3 levels max
///
/// Type          Count
/// ───────────────────
/// string           36
/// objectId         12
/// int              24
/// array             6
/// ───────────────────
/// Total            78
/// ```
use std::collections::BTreeMap;

use anyhow::Result;
use bson_decoder::ID_KEY;
use bson_types::{Document, ElementType, Value};
use serde::Serialize;

use crate::input::{Documents, read_file};
use crate::{GlobalArgs, StatsArgs};

#[derive(Debug, Default, Serialize)]
struct StatsReport {
    file: String,
    file_bytes: usize,
    documents: usize,
    with_id: usize,
    min_size: usize,
    max_size: usize,
    avg_size: usize,
    max_depth: usize,
    elements: Vec<TypeCount>,
    total_elements: usize,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct TypeCount {
    #[serde(rename = "type")]
    name: &'static str,
    count: usize,
}

/// Run the `bson stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a document fails to
/// decode.
pub fn run(args: &StatsArgs, global: &GlobalArgs) -> Result<()> {
    let bytes = read_file(&args.file)?;

    let mut report = StatsReport {
        file: args.file.display().to_string(),
        file_bytes: bytes.len(),
        min_size: usize::MAX,
        ..StatsReport::default()
    };
    let mut counts: BTreeMap<ElementType, usize> = BTreeMap::new();

    for located in Documents::new(&bytes, global.decoder()) {
        let located = located?;
        report.documents += 1;
        report.min_size = report.min_size.min(located.size);
        report.max_size = report.max_size.max(located.size);
        if located.document.contains_key(ID_KEY) {
            report.with_id += 1;
        }
        let depth = tally_document(&located.document, 1, &mut counts);
        report.max_depth = report.max_depth.max(depth);
    }

    if report.documents == 0 {
        report.min_size = 0;
    } else {
        report.avg_size = report.file_bytes / report.documents;
    }
    report.total_elements = counts.values().sum();
    report.elements = counts
        .into_iter()
        .map(|(ty, count)| TypeCount {
            name: ty.name(),
            count,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Count elements under `doc`, returning the deepest level reached.
fn tally_document(doc: &Document, depth: usize, counts: &mut BTreeMap<ElementType, usize>) -> usize {
    doc.iter()
        .map(|(_, value)| tally_value(value, depth, counts))
        .fold(depth, usize::max)
}

fn tally_value(value: &Value, depth: usize, counts: &mut BTreeMap<ElementType, usize>) -> usize {
    *counts.entry(value.element_type()).or_default() += 1;
    match value {
        Value::Document(doc) => tally_document(doc, depth + 1, counts),
        Value::Array(items) => items
            .iter()
            .map(|item| tally_value(item, depth + 1, counts))
            .fold(depth + 1, usize::max),
        _ => depth,
    }
}

fn print_report(report: &StatsReport) {
    println!("File:       {}  ({} bytes)", report.file, report.file_bytes);
    println!(
        "Documents:  {} total, {} with {ID_KEY}",
        report.documents, report.with_id
    );
    println!(
        "Size:       min {}, max {}, avg {} bytes",
        report.min_size, report.max_size, report.avg_size
    );
    println!("Depth:      {} levels max", report.max_depth);
    println!();
    println!("{:<12} {:>6}", "Type", "Count");
    println!("{}", "─".repeat(19));
    for entry in &report.elements {
        println!("{:<12} {:>6}", entry.name, entry.count);
    }
    println!("{}", "─".repeat(19));
    println!("{:<12} {:>6}", "Total", report.total_elements);
}
