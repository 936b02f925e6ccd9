//! Line-ending-insensitive content comparison
//!
//! Two files are equivalent when their bytes are identical, or when both are
//! text and they become identical once every CRLF pair is rewritten to LF.
//! Binary content is only ever compared byte for byte, so a `\r\n` sequence
//! inside an image or archive is never folded away.

use std::borrow::Cow;
use std::path::Path;

use crate::{Result, io};

/// Classification of file content for comparison purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Valid UTF-8 without NUL bytes
    Text,
    /// Anything else
    Binary,
}

impl ContentKind {
    /// Classify a buffer.
    pub fn of(bytes: &[u8]) -> Self {
        if !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok() {
            Self::Text
        } else {
            Self::Binary
        }
    }
}

/// Rewrite every CRLF pair to LF. Lone `\r` bytes are kept.
///
/// Borrows the input when it contains no CRLF pair.
pub fn normalize_line_endings(bytes: &[u8]) -> Cow<'_, [u8]> {
    if !bytes.windows(2).any(|pair| pair == b"\r\n") {
        return Cow::Borrowed(bytes);
    }

    let mut normalized = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if byte == b'\r' && iter.peek() == Some(&b'\n') {
            continue;
        }
        normalized.push(byte);
    }
    Cow::Owned(normalized)
}

/// Compare two buffers, ignoring CRLF/LF differences when both are text.
pub fn contents_equivalent(left: &[u8], right: &[u8]) -> bool {
    if left == right {
        return true;
    }
    match (ContentKind::of(left), ContentKind::of(right)) {
        (ContentKind::Text, ContentKind::Text) => {
            normalize_line_endings(left) == normalize_line_endings(right)
        }
        _ => false,
    }
}

/// Read both files and compare them with [`contents_equivalent`].
///
/// # Errors
///
/// Returns an error if either file cannot be read.
pub fn files_equivalent(left: &Path, right: &Path) -> Result<bool> {
    let left_bytes = io::read_bytes(left)?;
    let right_bytes = io::read_bytes(right)?;
    Ok(contents_equivalent(&left_bytes, &right_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_borrows_when_nothing_to_do() {
        assert!(matches!(normalize_line_endings(b"a\nb\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn normalize_rewrites_crlf_only() {
        assert_eq!(normalize_line_endings(b"a\r\nb\rc\r\n").as_ref(), b"a\nb\rc\n");
        assert_eq!(normalize_line_endings(b"\r\r\n").as_ref(), b"\r\n");
    }

    #[test]
    fn text_differing_only_in_line_endings_is_equivalent() {
        assert!(contents_equivalent(b"one\r\ntwo\r\n", b"one\ntwo\n"));
        assert!(!contents_equivalent(b"one\r\ntwo\r\n", b"one\ntwo!\n"));
    }

    #[test]
    fn trailing_newline_still_matters() {
        assert!(!contents_equivalent(b"hello\n", b"hello"));
    }

    #[test]
    fn binary_content_is_compared_exactly() {
        let left = [0u8, 1, b'\r', b'\n', 2];
        let right = [0u8, 1, b'\n', 2];
        assert_eq!(ContentKind::of(&left), ContentKind::Binary);
        assert!(!contents_equivalent(&left, &right));
        assert!(contents_equivalent(&left, &left));
    }

    #[test]
    fn mixed_text_and_binary_is_never_normalized() {
        let text = b"data\r\n";
        let binary = [b'd', b'a', b't', b'a', b'\n', 0xff];
        assert!(!contents_equivalent(text, &binary));
    }

    #[test]
    fn invalid_utf8_is_binary() {
        assert_eq!(ContentKind::of(&[0xc3, 0x28]), ContentKind::Binary);
        assert_eq!(ContentKind::of("héllo\r\n".as_bytes()), ContentKind::Text);
    }
}
