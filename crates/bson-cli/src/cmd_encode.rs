/// Implementation of `bson encode`.
///
/// Reads extended JSON and writes the documents back-to-back to the
/// output file.
///
/// ```text
/// $ echo '[{"_id": {"$oid": "000102030405060708090a0b"}, "n": 1}, {}]' > in.json
/// $ bson encode in.json -o out.bson
/// Wrote 2 documents (45 bytes) to out.bson
/// ```
use std::fs;

use anyhow::{Context, Result, bail};
use bson_types::Document;
use serde_json::Value as Json;

use crate::{EncodeArgs, GlobalArgs, ext_json};

/// Run the `bson encode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, a document
/// cannot be encoded, or the output cannot be written.
pub fn run(args: &EncodeArgs, global: &GlobalArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let json: Json = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let documents = parse_documents(&json)?;

    let encoder = global.encoder();
    let mut out = Vec::new();
    for (index, doc) in documents.iter().enumerate() {
        encoder
            .encode_into(doc, &mut out)
            .with_context(|| format!("cannot encode document {index}"))?;
    }

    fs::write(&args.output, &out)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Wrote {} document{} ({} bytes) to {}",
        documents.len(),
        if documents.len() == 1 { "" } else { "s" },
        out.len(),
        args.output.display()
    );
    Ok(())
}

/// One object, or an array of objects.
fn parse_documents(json: &Json) -> Result<Vec<Document>> {
    match json {
        Json::Object(_) => Ok(vec![ext_json::json_to_document(json)?]),
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                ext_json::json_to_document(item).with_context(|| format!("document {index}"))
            })
            .collect(),
        _ => bail!("input must be a JSON object or an array of objects"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_object_is_one_document() {
        let docs = parse_documents(&json!({ "a": 1 })).unwrap();
        assert_eq!(docs, [Document::new().with("a", 1)]);
    }

    #[test]
    fn array_yields_documents_in_order() {
        let docs = parse_documents(&json!([{ "n": 1 }, {}, { "n": 3 }])).unwrap();
        assert_eq!(docs.len(), 3);
        assert!(docs[1].is_empty());
    }

    #[test]
    fn scalars_rejected() {
        assert!(parse_documents(&json!(5)).is_err());
        assert!(parse_documents(&json!([{ "ok": true }, 2])).is_err());
    }
}
