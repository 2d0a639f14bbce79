//! Length-prefixed message framing
//!
//! Each message is an unsigned 16-bit big-endian count of encoded bytes
//! followed by that many UTF-8 bytes. The short prefix caps a payload at
//! 64 KiB, which is ample for single-request JSON and keeps a misbehaving
//! peer from making the server buffer arbitrary amounts of data.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};
use thiserror::Error;

/// Maximum payload size a frame can carry (the u16 length prefix's range)
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

/// Errors from reading or writing a frame
#[derive(Debug, Error)]
pub enum FrameError {
    /// Socket read/write failed (includes a peer closing mid-frame)
    #[error("frame I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Payload exceeds what the u16 length prefix can describe
    #[error("frame payload of {len} bytes exceeds maximum of {MAX_FRAME_LEN}")]
    TooLong {
        /// Actual payload length in bytes
        len: usize,
    },

    /// Received bytes were not valid UTF-8
    #[error("frame payload is not valid UTF-8")]
    InvalidUtf8,
}

/// Write one length-prefixed message
pub fn write_frame<W: Write>(writer: &mut W, payload: &str) -> Result<(), FrameError> {
    let bytes = payload.as_bytes();
    if bytes.len() > MAX_FRAME_LEN {
        return Err(FrameError::TooLong { len: bytes.len() });
    }
    writer.write_u16::<BigEndian>(bytes.len() as u16)?;
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed message
pub fn read_frame<R: Read>(reader: &mut R) -> Result<String, FrameError> {
    let len = reader.read_u16::<BigEndian>()? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| FrameError::InvalidUtf8)
}
