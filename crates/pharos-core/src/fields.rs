//! Fixed-offset field extraction from raw payload buffers.
//!
//! Every reader takes the buffer, a byte offset, and an implicit width, and
//! fails with [`FieldError::OutOfBounds`] when the buffer is shorter than
//! `offset + width`. Multi-byte integers are always reconstructed from an
//! explicitly chosen byte order, never the host machine's.

use thiserror::Error;

/// Error raised when a requested field extends past the end of its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The buffer is shorter than `offset + width`.
    #[error("field at offset {offset} with width {width} exceeds buffer of {len} bytes")]
    OutOfBounds {
        /// Byte offset of the requested field.
        offset: usize,
        /// Width of the requested field in bytes.
        width: usize,
        /// Actual buffer length.
        len: usize,
    },
}

/// A specialized [`Result`] type for field extraction.
pub type FieldResult<T> = Result<T, FieldError>;

/// Borrow `width` bytes starting at `offset`.
///
/// # Errors
///
/// Returns [`FieldError::OutOfBounds`] if the buffer is shorter than
/// `offset + width`.
pub fn bytes_at(buf: &[u8], offset: usize, width: usize) -> FieldResult<&[u8]> {
    let out_of_bounds = FieldError::OutOfBounds {
        offset,
        width,
        len: buf.len(),
    };
    let end = offset.checked_add(width).ok_or(out_of_bounds)?;
    if end > buf.len() {
        return Err(out_of_bounds);
    }
    Ok(&buf[offset..end])
}

/// Copy a fixed-width byte group starting at `offset`.
///
/// # Errors
///
/// Returns [`FieldError::OutOfBounds`] if the buffer is shorter than
/// `offset + N`.
pub fn array_at<const N: usize>(buf: &[u8], offset: usize) -> FieldResult<[u8; N]> {
    let bytes = bytes_at(buf, offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Read a big-endian unsigned 16-bit integer at `offset`.
///
/// # Errors
///
/// Returns [`FieldError::OutOfBounds`] if the buffer is shorter than
/// `offset + 2`.
pub fn u16_be(buf: &[u8], offset: usize) -> FieldResult<u16> {
    array_at(buf, offset).map(u16::from_be_bytes)
}

/// Read an unsigned byte at `offset`.
///
/// # Errors
///
/// Returns [`FieldError::OutOfBounds`] if `offset` is past the end of the
/// buffer.
pub fn u8_at(buf: &[u8], offset: usize) -> FieldResult<u8> {
    array_at(buf, offset).map(|[byte]| byte)
}

/// Read a signed byte at `offset`.
///
/// # Errors
///
/// Returns [`FieldError::OutOfBounds`] if `offset` is past the end of the
/// buffer.
pub fn i8_at(buf: &[u8], offset: usize) -> FieldResult<i8> {
    array_at(buf, offset).map(|[byte]| i8::from_be_bytes([byte]))
}
