use bytes::BufMut;

/// Length is `usize` in rust, while parameter buffer items carry a one-byte length.
pub trait UsizeExt {
    /// Returns [`None`] when value does not fit a clumplet length byte.
    fn to_clumplet_len(self) -> Option<u8>;
}

/// Parameter buffer item operation in [`BufMut`].
///
/// A parameter buffer is a sequence of "clumplets": a tag byte, optionally
/// followed by a length byte and that many bytes of value.
pub trait BufMutExt {
    /// Write a tag without value.
    fn put_tag(&mut self, tag: u8);

    /// Write tag, length byte, and raw bytes.
    ///
    /// Caller must ensure `value` is at most [`u8::MAX`] bytes.
    fn put_tag_bytes(&mut self, tag: u8, value: &[u8]);

    /// Write tag, length byte `2`, and little endian `i16`.
    fn put_tag_i16(&mut self, tag: u8, value: i16);
}

/// Helper trait to [`Display`][std::fmt::Display] bytes.
pub trait FmtExt {
    /// Lossy [`Display`][std::fmt::Display] bytes.
    fn lossy(&self) -> LossyFmt<'_>;
}

/// Lossy [`Display`][std::fmt::Display] implementation for bytes.
pub struct LossyFmt<'a>(pub &'a [u8]);

impl UsizeExt for usize {
    fn to_clumplet_len(self) -> Option<u8> {
        self.try_into().ok()
    }
}

impl<B: BufMut> BufMutExt for B {
    fn put_tag(&mut self, tag: u8) {
        self.put_u8(tag);
    }

    fn put_tag_bytes(&mut self, tag: u8, value: &[u8]) {
        let len = value.len().to_clumplet_len().expect("clumplet value too large");
        self.put_u8(tag);
        self.put_u8(len);
        self.put_slice(value);
    }

    fn put_tag_i16(&mut self, tag: u8, value: i16) {
        self.put_u8(tag);
        self.put_u8(size_of::<i16>() as u8);
        // parameter buffer numbers are in vax (little endian) order
        self.put_i16_le(value);
    }
}

impl FmtExt for [u8] {
    fn lossy(&self) -> LossyFmt<'_> {
        LossyFmt(self)
    }
}

impl std::fmt::Display for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in self.0 {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clumplets() {
        let mut buf = Vec::new();
        buf.put_tag(3);
        buf.put_tag_bytes(10, b"EMP");
        buf.put_tag_i16(21, 300);
        assert_eq!(buf, [3, 10, 3, b'E', b'M', b'P', 21, 2, 0x2c, 0x01]);
    }

    #[test]
    fn lossy_display() {
        let bytes = [3u8, 10, b'E', b'_', b' '];
        assert_eq!(bytes.lossy().to_string(), "\\x03\\x0aE_\\x20");
    }

    #[test]
    fn clumplet_len() {
        assert_eq!(255usize.to_clumplet_len(), Some(255));
        assert_eq!(256usize.to_clumplet_len(), None);
    }
}
