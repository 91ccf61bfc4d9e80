//! raw font bytes

use types::{Fixed, Scalar, Tag, UfWord};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A stateful reader over [`FontData`].
///
/// Every `read` advances the position by exactly the byte width of the type
/// read; `peek` reads without advancing. Positions can be saved on a stack
/// with [`push`](Self::push) and restored with [`pop`](Self::pop), which is
/// how a field that is itself an offset into another region gets resolved
/// before resuming.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    pos: usize,
    stack: Vec<usize>,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read a scalar at `offset`, failing if any of its bytes are past the end.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            stack: Vec::new(),
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    /// The data this cursor reads from.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// The current absolute offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute offset.
    ///
    /// Seeking past the end is allowed; the next read will fail.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    /// Move by a relative number of bytes, possibly backwards.
    pub fn skip(&mut self, n_bytes: isize) {
        // rewinding past the start leaves a position that no read can satisfy
        self.pos = self.pos.checked_add_signed(n_bytes).unwrap_or(usize::MAX);
    }

    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    /// Skip over a value of type `T` without reading it.
    pub fn advance<T: Scalar>(&mut self) {
        self.advance_by(T::RAW_BYTE_LEN)
    }

    /// Save the current offset.
    pub fn push(&mut self) {
        self.stack.push(self.pos);
    }

    /// Restore the most recently saved offset.
    ///
    /// Does nothing if no offset has been saved.
    pub fn pop(&mut self) {
        if let Some(pos) = self.stack.pop() {
            self.pos = pos;
        }
    }

    /// Save the current offset, then seek to `offset`.
    pub fn seek_push(&mut self, offset: usize) {
        self.push();
        self.seek(offset);
    }

    /// The number of saved offsets.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.advance::<T>();
        temp
    }

    /// Read a value at the current offset without advancing.
    pub fn peek<T: Scalar>(&self) -> Result<T, ReadError> {
        self.data.read_at(self.pos)
    }

    /// Read `len` consecutive values.
    ///
    /// The whole run is bounds checked before anything is allocated.
    pub fn read_array<T: Scalar>(&mut self, len: usize) -> Result<Vec<T>, ReadError> {
        let byte_len = len
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let end = self
            .pos
            .checked_add(byte_len)
            .ok_or(ReadError::OutOfBounds)?;
        let bytes = self
            .data
            .as_bytes()
            .get(self.pos..end)
            .ok_or(ReadError::OutOfBounds)?;
        let values = bytes
            .chunks_exact(T::RAW_BYTE_LEN)
            .map(|chunk| T::read(chunk).ok_or(ReadError::OutOfBounds))
            .collect::<Result<Vec<_>, _>>()?;
        self.pos = end;
        Ok(values)
    }

    pub fn read_tag(&mut self) -> Result<Tag, ReadError> {
        self.read()
    }

    /// Skip a 16.16 fixed point value; these are never needed numerically.
    pub fn skip_fixed(&mut self) {
        self.advance::<Fixed>()
    }

    /// Read an unsigned value in font design units.
    pub fn read_funit(&mut self) -> Result<UfWord, ReadError> {
        self.read()
    }

    pub fn skip_funit(&mut self) {
        self.advance::<UfWord>()
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BYTES: &[u8] = &[0x00, 0x01, 0xFF, 0xFE, b'g', b'l', b'y', b'f', 0x80];

    #[test]
    fn reads_advance_by_width() {
        let mut cursor = FontData::new(BYTES).cursor();
        assert_eq!(cursor.read::<u16>().unwrap(), 1);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read::<i16>().unwrap(), -2);
        let tag = cursor.read_tag().unwrap();
        assert_eq!(tag, Tag::new(b"glyf"));
        assert_eq!(tag.to_chars(), "glyf");
        assert_eq!(cursor.read::<i8>().unwrap(), -128);
        assert_eq!(cursor.position(), BYTES.len());
    }

    #[test]
    fn peek_does_not_advance() {
        let mut cursor = FontData::new(BYTES).cursor();
        cursor.seek(2);
        assert_eq!(cursor.peek::<u16>().unwrap(), 0xFFFE);
        assert_eq!(cursor.peek::<u8>().unwrap(), 0xFF);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read::<u32>().unwrap(), 0xFFFE_676C);
    }

    #[test]
    fn read_past_end_fails() {
        let mut cursor = FontData::new(BYTES).cursor();
        cursor.seek(8);
        assert!(matches!(cursor.read::<u16>(), Err(ReadError::OutOfBounds)));
        cursor.seek(usize::MAX - 1);
        assert!(matches!(cursor.read::<u32>(), Err(ReadError::OutOfBounds)));
        cursor.seek(100);
        assert!(matches!(cursor.peek::<u8>(), Err(ReadError::OutOfBounds)));
    }

    #[test]
    fn push_pop_detour() {
        let mut cursor = FontData::new(BYTES).cursor();
        cursor.read::<u16>().unwrap();
        cursor.seek_push(4);
        assert_eq!(cursor.read_tag().unwrap(), Tag::new(b"glyf"));
        assert_eq!(cursor.depth(), 1);
        cursor.pop();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.depth(), 0);
        // popping an empty stack leaves the position alone
        cursor.pop();
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn skips() {
        let mut cursor = FontData::new(BYTES).cursor();
        cursor.skip_fixed();
        assert_eq!(cursor.position(), 4);
        cursor.skip_funit();
        assert_eq!(cursor.position(), 6);
        cursor.skip(-6);
        assert_eq!(cursor.read_funit().unwrap().to_u16(), 1);
        cursor.skip(-10);
        assert!(cursor.read::<u8>().is_err());
    }

    #[test]
    fn read_array_checks_whole_run() {
        let mut cursor = FontData::new(BYTES).cursor();
        assert_eq!(cursor.read_array::<u16>(2).unwrap(), vec![1, 0xFFFE]);
        assert_eq!(cursor.position(), 4);
        assert!(cursor.read_array::<u16>(3).is_err());
        // a failed array read leaves the position where it was
        assert_eq!(cursor.position(), 4);
        assert!(cursor.read_array::<u32>(usize::MAX).is_err());
        assert_eq!(cursor.read_array::<u8>(0).unwrap(), Vec::<u8>::new());
    }
}
