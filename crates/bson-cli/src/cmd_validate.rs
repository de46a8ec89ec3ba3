/// Implementation of `bson validate`.
///
/// Fully decodes every document in the file and reports either success
/// checkmarks (`✓`) or a diagnostic failure line (`✗`).
///
/// # Success output
///
/// ```text
/// ✓ Documents: 3 documents parsed successfully
/// ✓ Framing: 118 bytes, every length prefix matches its terminator
/// ✓ Arrays: all array keys are sequential
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: document 1 at offset 22: boolean byte 0x02 (expected 0x00 or 0x01)
/// ```
use anyhow::{Result, anyhow};
use bson_decoder::{DecodeError, ErrorKind};

use crate::input::{Documents, LocatedError, read_file};
use crate::{GlobalArgs, ValidateArgs};

/// Run the `bson validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any document fails
/// to decode.
pub fn run(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let bytes = read_file(&args.file)?;

    let mut count = 0usize;
    for located in Documents::new(&bytes, global.decoder()) {
        match located {
            Ok(_) => count += 1,
            Err(e) => {
                println!("✗ Error: {}", located_diagnostic(&e));
                return Err(anyhow!("validation failed"));
            }
        }
    }

    println!(
        "✓ Documents: {count} document{} parsed successfully",
        if count == 1 { "" } else { "s" }
    );
    println!(
        "✓ Framing: {} bytes, every length prefix matches its terminator",
        bytes.len()
    );
    println!("✓ Arrays: all array keys are sequential");
    Ok(())
}

// ── Error formatting ──────────────────────────────────────────────────────────

fn located_diagnostic(e: &LocatedError) -> String {
    format!(
        "document {} at offset {}: {}",
        e.index,
        e.offset,
        decode_error_diagnostic(&e.source)
    )
}

/// Human-readable diagnostic for a decode failure.
///
/// ```text
/// ┌──────────────────────┬─────────────────────────────────────────────┐
/// │ Kind                 │ Diagnostic                                  │
/// ├──────────────────────┼─────────────────────────────────────────────┤
/// │ TruncatedInput       │ "truncated: <wire detail>"                  │
/// │ InvalidBooleanByte   │ "boolean byte 0x.. (expected 0x00 or 0x01)" │
/// │ UnsupportedTypeTag   │ "unknown element type 0x.."                 │
/// │ everything else      │ "<error Display>"                           │
/// └──────────────────────┴─────────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::InvalidBooleanByte { value } => {
            format!("boolean byte {value:#04x} (expected 0x00 or 0x01)")
        }
        DecodeError::UnsupportedTypeTag { tag } => format!("unknown element type {tag:#04x}"),
        other if other.kind() == ErrorKind::TruncatedInput => format!("truncated: {other}"),
        other => other.to_string(),
    }
}
