use crate::error::ConvertError;

/// Registry of external formats the converter understands.
///
/// Format names arrive as URL path segments and are matched
/// case-insensitively; unknown names fail before anything is staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Uvl,
}

impl FileFormat {
    pub fn from_name(name: &str) -> Result<Self, ConvertError> {
        if name.eq_ignore_ascii_case("uvl") {
            Ok(Self::Uvl)
        } else {
            Err(ConvertError::UnsupportedFormat { format: name.to_owned() })
        }
    }

    /// File extension used for staged artifacts of this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Uvl => "uvl",
        }
    }
}
