use std::sync::Arc;

use crate::error::{ErrorKind, ExpressionError};

/// Largest input accepted by [`SourceText::new`], in bytes.
///
/// Offsets into the text are handed out as `usize` but must also fit in a
/// `u32` so that `len + 1` can never overflow.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize - 1;

/// An immutable, cheaply cloneable handle to one line of input.
///
/// Tokens, parsed definitions and errors all keep a clone of the text they
/// came from; cloning only bumps a reference count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText(Arc<str>);

impl SourceText {
    /// Copies `text` into a new shared buffer.
    ///
    /// # Errors
    /// Returns an [`ErrorKind::Allocation`] error when the text is longer than
    /// [`MAX_SOURCE_LEN`].
    ///
    /// # Example
    /// ```
    /// use numeval::interpreter::source::SourceText;
    ///
    /// let text = SourceText::new("1 + 2").unwrap();
    /// let copy = text.clone();
    ///
    /// assert_eq!(copy.as_str(), "1 + 2");
    /// assert_eq!(text.len(), 5);
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, ExpressionError> {
        let text = text.as_ref();
        if text.len() > MAX_SOURCE_LEN {
            return Err(ExpressionError::new(ErrorKind::Allocation,
                                            format!("Input of {} bytes is too large.", text.len()),
                                            &Self::default(),
                                            0));
        }

        Ok(Self(Arc::from(text)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SourceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let text = SourceText::new("def x => 1").unwrap();
        let copy = text.clone();
        assert!(Arc::ptr_eq(&text.0, &copy.0));
        assert_eq!(copy.to_string(), "def x => 1");
    }

    #[test]
    fn empty_text() {
        let text = SourceText::new("").unwrap();
        assert!(text.is_empty());
        assert_eq!(text, SourceText::default());
    }
}
