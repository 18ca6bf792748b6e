use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64;

use crate::error::ContentError;
use crate::model::ContentEnvelope;

const BASE64_ENCODING: &str = "base64";

/// Unwraps a content envelope and decodes its base64 payload.
pub(crate) fn decode(envelope_bytes: &[u8]) -> Result<Vec<u8>, ContentError> {
    let envelope = parse_envelope(envelope_bytes)?;
    decode_payload(&envelope.content)
}

pub(crate) fn parse_envelope(envelope_bytes: &[u8]) -> Result<ContentEnvelope, ContentError> {
    let envelope: ContentEnvelope = serde_json::from_slice(envelope_bytes)
        .map_err(|err| ContentError::EnvelopeParse(err.to_string()))?;
    match envelope.encoding.as_deref() {
        None | Some(BASE64_ENCODING) => Ok(envelope),
        Some(other) => Err(ContentError::UnsupportedEncoding(other.to_string())),
    }
}

pub(crate) fn decode_payload(content: &str) -> Result<Vec<u8>, ContentError> {
    // Payloads arrive wrapped at a fixed column width.
    let compact: String = content.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    Base64
        .decode(compact.as_bytes())
        .map_err(|err| ContentError::Base64Decode(err.to_string()))
}
