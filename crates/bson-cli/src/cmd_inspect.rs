/// Implementation of `bson inspect`.
///
/// # Example output
///
/// ```text
/// document 0  (22 bytes @ 0)
///   { "hello": "world" }
/// document 1  (45 bytes @ 22)
///   { "_id": ObjectId("000102030405060708090a0b"), "n": NumberLong(7) }
///
/// 2 documents, 67 bytes
/// ```
///
/// With `--json` each document is printed as pretty extended JSON
/// instead.
use anyhow::{Result, bail};

use crate::input::{Documents, read_file};
use crate::{GlobalArgs, InspectArgs, ext_json};

/// Run the `bson inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a document fails to
/// decode, or `--doc` is out of range.
pub fn run(args: &InspectArgs, global: &GlobalArgs) -> Result<()> {
    let bytes = read_file(&args.file)?;

    let mut shown = 0usize;
    let mut count = 0usize;
    for located in Documents::new(&bytes, global.decoder()) {
        let located = located?;
        count += 1;
        if args.doc.is_some_and(|want| want != located.index) {
            continue;
        }

        println!(
            "document {}  ({} bytes @ {})",
            located.index, located.size, located.offset
        );
        if args.json {
            let json = ext_json::document_to_json(&located.document);
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else {
            println!("  {}", located.document);
        }
        shown += 1;
    }

    if let Some(want) = args.doc {
        if shown == 0 {
            bail!("document index {want} out of range (file has {count} documents)");
        }
        return Ok(());
    }

    println!();
    println!(
        "{count} document{}, {} bytes",
        if count == 1 { "" } else { "s" },
        bytes.len()
    );
    Ok(())
}
