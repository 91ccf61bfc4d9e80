//! small utilities for writing big-endian data

use std::collections::HashMap;

use ttf_types::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
    tagged_locations: HashMap<String, usize>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return a reference to the contents of the buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write a scalar and remember where it was written, so it can be
    /// patched later with [`write_at`](Self::write_at).
    pub fn push_with_tag(mut self, item: impl Scalar, tag: &str) -> Self {
        self.tagged_locations
            .insert(tag.to_string(), self.data.len());
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Append raw bytes.
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Append zeros until the length is a multiple of `align`.
    pub fn pad_to(mut self, align: usize) -> Self {
        while self.data.len() % align != 0 {
            self.data.push(0);
        }
        self
    }

    pub fn offset_for(&self, tag: &str) -> usize {
        // panic on unrecognized tags
        self.tagged_locations.get(tag).copied().unwrap()
    }

    /// Overwrite the value at a location recorded with `push_with_tag`.
    pub fn write_at(&mut self, tag: &str, item: impl Scalar) {
        let offset = self.offset_for(tag);
        let raw = item.to_raw();
        let new_data: &[u8] = raw.as_ref();
        let data = &mut self.data[offset..];
        if data.len() < new_data.len() {
            panic!("not enough room left in buffer for the requested write.");
        }
        data[..new_data.len()].copy_from_slice(new_data);
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl AsRef<[u8]> for BeBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<BeBuffer> for Vec<u8> {
    fn from(buffer: BeBuffer) -> Self {
        buffer.data
    }
}

/// Build a [`BeBuffer`] from a list of scalar values.
///
/// ```
/// # use ttf_test_data::be_buffer;
/// let buf = be_buffer! { 1_u16, -2_i16, 0xFF_u8 };
/// assert_eq!(buf.as_slice(), &[0, 1, 0xFF, 0xFE, 0xFF]);
/// ```
#[macro_export]
macro_rules! be_buffer {
    ($($value:expr),* $(,)?) => {
        $crate::BeBuffer::new()$(.push($value))*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_writes() {
        let mut buf = BeBuffer::new()
            .push(1_u16)
            .push_with_tag(0_u32, "offset")
            .push(7_u8);
        assert_eq!(buf.offset_for("offset"), 2);
        buf.write_at("offset", 0x0102_0304_u32);
        assert_eq!(buf.as_slice(), &[0, 1, 1, 2, 3, 4, 7]);
    }

    #[test]
    fn padding() {
        let buf = be_buffer! { 1_u8, 2_u8, 3_u8 }.pad_to(4);
        assert_eq!(buf.len(), 4);
        let buf = buf.pad_to(4);
        assert_eq!(buf.len(), 4);
    }
}
