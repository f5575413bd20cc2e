//! Payload codec: zstd-compressed JSON records
//!
//! Every stored record uses the same representation — a JSON document
//! compressed with zstd. [`decode_record`] is the single decompress+decode
//! primitive shared by every transform callback; [`encode_record`] is its
//! write-side counterpart used by loaders and test fixtures.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Zstd compression level for stored records
pub const ZSTD_LEVEL: i32 = 3;

/// Encode a record: JSON-serialize, then zstd-compress
pub fn encode_record<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(value)?;
    zstd::encode_all(json.as_slice(), ZSTD_LEVEL)
        .map_err(|e| Error::codec(format!("zstd compression failed: {}", e)))
}

/// Decompress a raw stored payload
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let _span = tracing::debug_span!("record_decompress", compressed_bytes = bytes.len()).entered();
    zstd::decode_all(bytes).map_err(|e| Error::codec(format!("zstd decompression failed: {}", e)))
}

/// Decode a record: zstd-decompress, then JSON-deserialize
pub fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let json = decompress(bytes)?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct TestRecord {
        entity: String,
        value: f64,
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let record = TestRecord {
            entity: "p1".to_string(),
            value: 42.5,
        };
        let bytes = encode_record(&record).unwrap();
        let decoded: TestRecord = decode_record(&bytes).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_truncated_payload_is_codec_error() {
        let record = TestRecord {
            entity: "p1".to_string(),
            value: 1.0,
        };
        let mut bytes = encode_record(&record).unwrap();
        bytes.truncate(bytes.len() / 2);

        let result = decode_record::<TestRecord>(&bytes);
        assert!(matches!(result, Err(Error::Codec(_))));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let bytes = zstd::encode_all(b"not json".as_slice(), ZSTD_LEVEL).unwrap();
        let result = decode_record::<TestRecord>(&bytes);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
