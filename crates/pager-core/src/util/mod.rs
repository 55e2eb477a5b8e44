//! Utility types used throughout Pager.
//!
//! This module provides:
//! - [`Size`] - Memory size representation with unit parsing
//! - [`Rng`] - Seedable random number generation for logical memory contents
//! - [`format_hex`] - Hexadecimal rendering of frame contents

mod rng;
mod size;

pub use self::rng::Rng;
pub use self::size::{ParseSizeError, Size};

use itertools::Itertools;

/// Formats bytes as upper-case hexadecimal pairs separated by spaces.
///
/// # Examples
///
/// ```
/// use pager_core::util::format_hex;
///
/// assert_eq!(format_hex(&[0x00, 0xab, 0x7f]), "00 AB 7F");
/// assert_eq!(format_hex(&[]), "");
/// ```
pub fn format_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).join(" ")
}
