use crate::error::{ProtocolError, ProtocolResult};
use crate::message::{WireMessage, FRAME_HEADER_SIZE, MAX_MESSAGE_SIZE};

/// Codec for encoding/decoding wire messages.
pub struct AcasCodec;

impl AcasCodec {
    /// Encode a message with framing: [4 bytes len][1 byte tag][payload]
    ///
    /// `len` counts the tag byte plus the payload.
    pub fn encode(msg: &WireMessage) -> ProtocolResult<Vec<u8>> {
        let payload = Self::encode_payload(msg)?;
        if payload.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: payload.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        let len = (payload.len() + 1) as u32;
        let mut buf = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
        buf.extend_from_slice(&len.to_be_bytes());
        buf.push(msg.type_tag());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode a framed message. Returns (message, bytes_consumed).
    pub fn decode(data: &[u8]) -> ProtocolResult<(WireMessage, usize)> {
        if data.len() < FRAME_HEADER_SIZE {
            return Err(ProtocolError::FramingError("too short".into()));
        }
        let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if len < 1 {
            return Err(ProtocolError::FramingError("zero-length frame".into()));
        }
        if len - 1 > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: len - 1,
                max: MAX_MESSAGE_SIZE,
            });
        }
        let total = 4 + len;
        if data.len() < total {
            return Err(ProtocolError::FramingError(format!(
                "incomplete: have {}, need {}",
                data.len(),
                total
            )));
        }
        let tag = data[4];
        if !matches!(tag, 1 | 2) {
            return Err(ProtocolError::InvalidMessageType(tag));
        }
        let msg = Self::decode_payload(&data[FRAME_HEADER_SIZE..total])?;
        if msg.type_tag() != tag {
            return Err(ProtocolError::FramingError(format!(
                "tag {tag} does not match {} payload",
                msg.type_name()
            )));
        }
        Ok((msg, total))
    }

    /// Encode payload only (no framing).
    pub fn encode_payload(msg: &WireMessage) -> ProtocolResult<Vec<u8>> {
        bincode::serialize(msg).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }

    /// Decode payload only (no framing).
    pub fn decode_payload(data: &[u8]) -> ProtocolResult<WireMessage> {
        bincode::deserialize(data).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Response;
    use crate::message::Invocation;

    #[test]
    fn invoke_roundtrip() {
        let msg = WireMessage::Invoke(Invocation::new(
            "anchorBatch",
            [b"batchdata".to_vec(), b"anchordata".to_vec()],
        ));
        let encoded = AcasCodec::encode(&msg).unwrap();
        let (decoded, consumed) = AcasCodec::decode(&encoded).unwrap();
        assert_eq!(consumed, encoded.len());
        assert_eq!(decoded, msg);
    }

    #[test]
    fn result_roundtrip_keeps_not_found() {
        let msg = WireMessage::Result(Response::not_found("content not found"));
        let encoded = AcasCodec::encode(&msg).unwrap();
        let (decoded, _) = AcasCodec::decode(&encoded).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn decode_consumes_one_frame_only() {
        let first = AcasCodec::encode(&WireMessage::Result(Response::success_empty())).unwrap();
        let second = AcasCodec::encode(&WireMessage::Invoke(Invocation::default())).unwrap();
        let mut both = first.clone();
        both.extend_from_slice(&second);

        let (_, consumed) = AcasCodec::decode(&both).unwrap();
        assert_eq!(consumed, first.len());
        let (msg, _) = AcasCodec::decode(&both[consumed..]).unwrap();
        assert_eq!(msg.type_name(), "Invoke");
    }

    #[test]
    fn decode_truncated() {
        let err = AcasCodec::decode(&[0, 0, 0]).unwrap_err();
        assert!(matches!(err, ProtocolError::FramingError(_)));
    }

    #[test]
    fn decode_zero_length() {
        let err = AcasCodec::decode(&[0u8, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, ProtocolError::FramingError(_)));
    }

    #[test]
    fn decode_incomplete_frame() {
        let encoded = AcasCodec::encode(&WireMessage::Invoke(Invocation::new("warmup", Vec::new()))).unwrap();
        let err = AcasCodec::decode(&encoded[..encoded.len() - 1]).unwrap_err();
        assert!(matches!(err, ProtocolError::FramingError(_)));
    }

    #[test]
    fn decode_rejects_oversized_length() {
        let len = (MAX_MESSAGE_SIZE as u32 + 2).to_be_bytes();
        let data = [len[0], len[1], len[2], len[3], 1];
        let err = AcasCodec::decode(&data).unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLarge { .. }));
    }

    #[test]
    fn decode_rejects_unknown_tag() {
        let mut encoded = AcasCodec::encode(&WireMessage::Invoke(Invocation::default())).unwrap();
        encoded[4] = 9;
        let err = AcasCodec::decode(&encoded).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessageType(9)));
    }

    #[test]
    fn decode_rejects_mismatched_tag() {
        let mut encoded = AcasCodec::encode(&WireMessage::Invoke(Invocation::default())).unwrap();
        encoded[4] = 2;
        let err = AcasCodec::decode(&encoded).unwrap_err();
        assert!(matches!(err, ProtocolError::FramingError(_)));
    }
}
