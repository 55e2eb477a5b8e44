use std::str::FromStr;
use thiserror::Error;

/// Memory size representation supporting common units.
///
/// Sizes are given in bytes, kilobytes, megabytes or gigabytes. All units use
/// binary (base-2) multipliers (1 KB = 1024 bytes). The command line accepts
/// sizes in this form, e.g. `64`, `4KB` or `1 MB`.
///
/// # Examples
///
/// ```
/// use pager_core::util::Size;
///
/// let size = Size::KB(4);
/// assert_eq!(size.bytes(), 4096);
///
/// let parsed: Size = "16KB".parse().unwrap();
/// assert_eq!(parsed.bytes(), 16 * 1024);
///
/// let plain: Size = "64".parse().unwrap();
/// assert_eq!(plain.bytes(), 64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    /// Size in bytes
    B(usize),
    /// Size in kilobytes (1 KB = 1024 bytes)
    KB(usize),
    /// Size in megabytes (1 MB = 1024 KB)
    MB(usize),
    /// Size in gigabytes (1 GB = 1024 MB)
    GB(usize),
}

impl Size {
    /// Converts this size to bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pager_core::util::Size;
    ///
    /// assert_eq!(Size::B(100).bytes(), 100);
    /// assert_eq!(Size::KB(1).bytes(), 1024);
    /// assert_eq!(Size::MB(1).bytes(), 1048576);
    /// assert_eq!(Size::GB(1).bytes(), 1073741824);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the byte count does not fit in `usize`. Sizes parsed with
    /// [`FromStr`] always fit.
    pub const fn bytes(&self) -> usize {
        match self.checked_bytes() {
            Some(bytes) => bytes,
            None => panic!("size in bytes overflows usize"),
        }
    }

    /// Converts this size to bytes, returning `None` on overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use pager_core::util::Size;
    ///
    /// assert_eq!(Size::KB(2).checked_bytes(), Some(2048));
    /// assert_eq!(Size::GB(usize::MAX).checked_bytes(), None);
    /// ```
    pub const fn checked_bytes(&self) -> Option<usize> {
        match self {
            Size::B(bytes) => Some(*bytes),
            Size::KB(kb) => kb.checked_mul(1 << 10),
            Size::MB(mb) => mb.checked_mul(1 << 20),
            Size::GB(gb) => gb.checked_mul(1 << 30),
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::B(bytes) => write!(f, "{} B", bytes),
            Size::KB(kb) => write!(f, "{} KB", kb),
            Size::MB(mb) => write!(f, "{} MB", mb),
            Size::GB(gb) => write!(f, "{} GB", gb),
        }
    }
}

/// Errors that can occur while parsing a [`Size`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSizeError {
    /// The numeric part is missing or not an unsigned integer
    #[error("Invalid size value: {0:?}")]
    InvalidNumber(String),
    /// The unit suffix is not one of B, KB, MB or GB
    #[error("Unknown size unit: {0:?}")]
    UnknownUnit(String),
    /// The size in bytes does not fit in `usize`
    #[error("Size too large: {0:?}")]
    TooLarge(String),
}

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (num, unit) = s.split_at(split);
        let value = num
            .parse::<usize>()
            .map_err(|_| ParseSizeError::InvalidNumber(s.to_string()))?;
        let size = match unit.trim().to_ascii_uppercase().as_str() {
            "" | "B" => Size::B(value),
            "K" | "KB" => Size::KB(value),
            "M" | "MB" => Size::MB(value),
            "G" | "GB" => Size::GB(value),
            other => return Err(ParseSizeError::UnknownUnit(other.to_string())),
        };
        match size.checked_bytes() {
            Some(_) => Ok(size),
            None => Err(ParseSizeError::TooLarge(s.to_string())),
        }
    }
}
