/// Implementation of `bson id`.
///
/// Streams the file one document at a time and prints each `_id`,
/// scanning no further into a document than the `_id` element.
///
/// ```text
/// 0	ObjectId("000102030405060708090a0b")
/// 1	42
/// 2	-
/// ```
///
/// A `-` marks a document without an `_id`.
use anyhow::{Context, Result};
use bson_decoder::DocumentStream;
use tokio::fs::File;
use tokio::io::BufReader;
use tracing::debug;

use crate::{GlobalArgs, IdArgs};

/// Run the `bson id` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a document fails
/// before its `_id` is reached.
pub fn run(args: &IdArgs, global: &GlobalArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start runtime")?;
    runtime.block_on(print_ids(args, global))
}

async fn print_ids(args: &IdArgs, global: &GlobalArgs) -> Result<()> {
    let file = File::open(&args.file)
        .await
        .with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut stream = DocumentStream::with_decoder(BufReader::new(file), global.decoder());

    let mut index = 0usize;
    while let Some(raw) = stream.next_raw().await {
        let raw = raw.with_context(|| format!("document {index}"))?;
        match raw.id() {
            Some(id) => println!("{index}\t{id}"),
            None => println!("{index}\t-"),
        }
        index += 1;
    }
    debug!(documents = stream.documents_read(), "id scan complete");
    Ok(())
}
