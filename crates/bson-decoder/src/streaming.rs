use bson_types::Document;
use bson_wire::WireError;
use bson_wire::frame::{LENGTH_PREFIX_SIZE, MIN_DOCUMENT_SIZE};
use bson_wire::primitives::read_u32;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::decoder::BsonDecoder;
use crate::error::DecodeError;
use crate::raw::RawDocument;

/// Asynchronous reader of back-to-back documents.
///
/// Each document is framed by its own length prefix, so the stream
/// reads the 4-byte prefix, checks it against the decoder's limits,
/// then waits for exactly that many bytes before decoding. Nothing is
/// read ahead of the current document, and the frame buffer is reused
/// across documents.
///
/// ```text
///   ┌────────┬──────────────┐┌────────┬──────────────┐
///   │ size 1 │ body 1 │ 00  ││ size 2 │ body 2 │ 00  │  ... EOF
///   └────────┴──────────────┘└────────┴──────────────┘
///     next() ─► Document      next() ─► Document      next() ─► None
/// ```
///
/// End of input exactly at a document boundary ends the stream. End of
/// input anywhere else is an [`DecodeError::Io`] with
/// `UnexpectedEof`. After any error the stream is finished and keeps
/// returning `None`.
///
/// # Example
///
/// ```rust,no_run
/// use bson_decoder::DocumentStream;
/// use tokio::io::AsyncRead;
///
/// async fn count(reader: impl AsyncRead + Unpin) -> usize {
///     let mut stream = DocumentStream::new(reader);
///     let mut n = 0;
///     while let Some(doc) = stream.next().await {
///         if doc.is_ok() {
///             n += 1;
///         }
///     }
///     n
/// }
/// ```
pub struct DocumentStream<R> {
  reader: R,
  decoder: BsonDecoder,
  state: StreamState,
  /// Bytes of the current document, prefix included.
  buf: Vec<u8>,
  documents_read: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
  Reading,
  Done,
}

impl<R: AsyncRead + Unpin> DocumentStream<R> {
  /// Stream documents from `reader` with default decoder options.
  #[must_use]
  pub fn new(reader: R) -> Self {
    Self::with_decoder(reader, BsonDecoder::default())
  }

  #[must_use]
  pub fn with_decoder(reader: R, decoder: BsonDecoder) -> Self {
    Self {
      reader,
      decoder,
      state: StreamState::Reading,
      buf: Vec::with_capacity(4096),
      documents_read: 0,
    }
  }

  /// Read and fully decode the next document.
  ///
  /// Returns `None` once the input is exhausted or after an error.
  pub async fn next(&mut self) -> Option<Result<Document, DecodeError>> {
    match self.read_frame().await? {
      Ok(()) => {
        let decoded = self.decoder.decode_document(&self.buf);
        Some(self.finish(decoded))
      }
      Err(e) => Some(self.finish(Err(e))),
    }
  }

  /// Read the next document and extract only its `_id`.
  ///
  /// The returned document borrows the stream's frame buffer; call
  /// [`RawDocument::into_owned`] to keep it past the next read.
  pub async fn next_raw(&mut self) -> Option<Result<RawDocument<'_>, DecodeError>> {
    if let Err(e) = self.read_frame().await? {
      return Some(self.finish(Err(e)));
    }
    match self.decoder.read_raw_document(&self.buf) {
      Ok((raw, _)) => {
        self.documents_read += 1;
        Some(Ok(raw))
      }
      Err(e) => {
        warn!(error = %e, documents_read = self.documents_read, "document stream failed");
        self.state = StreamState::Done;
        Some(Err(e))
      }
    }
  }

  /// Number of documents successfully returned so far.
  #[must_use]
  pub fn documents_read(&self) -> u64 {
    self.documents_read
  }

  /// Consume the stream, returning the underlying reader.
  pub fn into_inner(self) -> R {
    self.reader
  }

  /// Record the outcome of one document.
  fn finish<T>(&mut self, result: Result<T, DecodeError>) -> Result<T, DecodeError> {
    match &result {
      Ok(_) => self.documents_read += 1,
      Err(e) => {
        warn!(error = %e, documents_read = self.documents_read, "document stream failed");
        self.state = StreamState::Done;
      }
    }
    result
  }

  /// Fill `buf` with the next complete document frame.
  ///
  /// Returns `None` on a clean end of input.
  async fn read_frame(&mut self) -> Option<Result<(), DecodeError>> {
    if self.state == StreamState::Done {
      return None;
    }

    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    let mut filled = 0;
    while filled < LENGTH_PREFIX_SIZE {
      match self.reader.read(&mut prefix[filled..]).await {
        Ok(0) if filled == 0 => {
          debug!(documents_read = self.documents_read, "document stream finished");
          self.state = StreamState::Done;
          return None;
        }
        Ok(0) => {
          return Some(Err(DecodeError::Io(std::io::ErrorKind::UnexpectedEof.into())));
        }
        Ok(n) => filled += n,
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
        Err(e) => return Some(Err(e.into())),
      }
    }

    Some(self.read_body(prefix).await)
  }

  async fn read_body(&mut self, prefix: [u8; LENGTH_PREFIX_SIZE]) -> Result<(), DecodeError> {
    let (declared, _) = read_u32(&prefix)?;
    let size = declared as usize;
    if size < MIN_DOCUMENT_SIZE {
      return Err(WireError::MalformedLength { declared }.into());
    }
    let limit = self.decoder.options().max_document_size;
    if size > limit {
      return Err(DecodeError::DocumentTooLarge { size, limit });
    }

    debug!(size, "reading document frame");
    self.buf.clear();
    self.buf.extend_from_slice(&prefix);
    self.buf.resize(size, 0);
    self.reader.read_exact(&mut self.buf[LENGTH_PREFIX_SIZE..]).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::DecoderOptions;
  use crate::error::ErrorKind;
  use bson_encoder::BsonEncoder;
  use bson_types::{ObjectId, Value};

  fn encode_all(docs: &[Document]) -> Vec<u8> {
    let encoder = BsonEncoder::new();
    docs
      .iter()
      .flat_map(|d| encoder.encode(d).unwrap())
      .collect()
  }

  async fn drain<R: AsyncRead + Unpin>(
    stream: &mut DocumentStream<R>,
  ) -> Vec<Result<Document, DecodeError>> {
    let mut out = Vec::new();
    while let Some(result) = stream.next().await {
      out.push(result);
    }
    out
  }

  #[tokio::test]
  async fn yields_each_document_in_order() {
    let docs = [
      Document::new().with("n", 1),
      Document::new(),
      Document::new().with("s", "three").with("nested", Document::new().with("x", true)),
    ];
    let bytes = encode_all(&docs);
    let mut stream = DocumentStream::new(bytes.as_slice());

    let decoded: Vec<_> = drain(&mut stream).await.into_iter().map(Result::unwrap).collect();
    assert_eq!(decoded, docs);
    assert_eq!(stream.documents_read(), 3);
  }

  #[tokio::test]
  async fn empty_input_ends_immediately() {
    let mut stream = DocumentStream::new(&[][..]);
    assert!(stream.next().await.is_none());
    assert_eq!(stream.documents_read(), 0);
  }

  #[tokio::test]
  async fn eof_inside_document_is_io_error() {
    let mut bytes = encode_all(&[Document::new().with("k", "value")]);
    bytes.truncate(bytes.len() - 2);
    let mut stream = DocumentStream::new(bytes.as_slice());

    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(stream.next().await.is_none());
  }

  #[tokio::test]
  async fn eof_inside_prefix_is_io_error() {
    let mut stream = DocumentStream::new(&[0x10, 0x00][..]);
    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
  }

  #[tokio::test]
  async fn short_declared_length_rejected() {
    let mut stream = DocumentStream::new(&[0x04, 0x00, 0x00, 0x00, 0x00][..]);
    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLength);
  }

  #[tokio::test]
  async fn oversized_frame_rejected_before_reading_body() {
    let bytes = encode_all(&[Document::new().with("s", "x".repeat(100))]);
    let decoder = BsonDecoder::new(DecoderOptions::default().with_max_document_size(64));
    let mut stream = DocumentStream::with_decoder(bytes.as_slice(), decoder);

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, DecodeError::DocumentTooLarge { limit: 64, .. }));
  }

  #[tokio::test]
  async fn decode_error_fuses_stream() {
    // {"b": <bool byte 2>} followed by a valid document.
    let mut bytes = vec![0x09, 0x00, 0x00, 0x00, 0x08, b'b', 0x00, 0x02, 0x00];
    bytes.extend(encode_all(&[Document::new().with("ok", 1)]));
    let mut stream = DocumentStream::new(bytes.as_slice());

    let results = drain(&mut stream).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap_err().kind(), ErrorKind::InvalidBooleanByte);
  }

  #[tokio::test]
  async fn raw_documents_carry_ids() {
    let oid = ObjectId::from_bytes([3; 12]);
    let bytes = encode_all(&[
      Document::new().with("_id", oid).with("v", 1),
      Document::new().with("v", 2),
    ]);
    let mut stream = DocumentStream::new(bytes.as_slice());

    let first = stream.next_raw().await.unwrap().unwrap().into_owned();
    assert_eq!(first.id(), Some(&Value::ObjectId(oid)));

    let second = stream.next_raw().await.unwrap().unwrap();
    assert!(second.id().is_none());
    assert_eq!(second.to_document().unwrap().get("v"), Some(&Value::Int32(2)));

    assert!(stream.next_raw().await.is_none());
    assert_eq!(stream.documents_read(), 2);
  }
}
