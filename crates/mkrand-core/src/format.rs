//! Boundary codec: canonical PSI text plus the auxiliary renderings.
//!
//! Every format below is a straight rendering of the 16 packed bytes of a
//! vector under the byte-packing law in [`crate::vector`]; none of them
//! re-interprets cell order.

use std::fmt::Write as _;

use thiserror::Error;

use crate::vector::{Vector, VECTOR_BYTES, VECTOR_CELLS};

/// Exact length of the canonical PSI text rendering.
pub const PSI_TEXT_LEN: usize = 38;

/// URL-friendly Base64 alphabet (`-` and `_` in place of `+` and `/`).
const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Output renderings for a register vector.
///
/// Numeric codes are stable; gaps in the code space are reserved slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum VectorFormat {
    /// 32 uppercase hex digits, byte 1 first.
    Binary,
    /// SHA1-shaped lowercase hex with dashes (form only, not the hash).
    Sha1,
    /// All 128 cells as `0`/`1`/`N`, position 128 first.
    BinaryText,
    /// IPv4 dotted quad from bytes 4.3.2.1.
    Ipv4,
    /// Braced uppercase GUID rendering.
    Guid,
    /// IPv6 colon groups, 16 bytes in 8 groups.
    Ipv6,
    /// Canonical 38-character bracketed-hex fingerprint.
    Psi,
    /// Unsigned 32-bit decimal from bytes 4..1.
    Int32,
    /// UUID-v4-shaped lowercase rendering.
    Uuid,
    /// 22-character unpadded URL-safe Base64.
    Base64,
}

impl VectorFormat {
    /// Every defined format, code order.
    pub const ALL: [Self; 10] = [
        Self::Binary,
        Self::Sha1,
        Self::BinaryText,
        Self::Ipv4,
        Self::Guid,
        Self::Ipv6,
        Self::Psi,
        Self::Int32,
        Self::Uuid,
        Self::Base64,
    ];

    /// Stable numeric code for external format selection.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Binary => 0,
            Self::Sha1 => 1,
            Self::BinaryText => 2,
            Self::Ipv4 => 4,
            Self::Guid => 5,
            Self::Ipv6 => 6,
            Self::Psi => 8,
            Self::Int32 => 10,
            Self::Uuid => 11,
            Self::Base64 => 12,
        }
    }

    /// Selector name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Sha1 => "sha1",
            Self::BinaryText => "text",
            Self::Ipv4 => "ipv4",
            Self::Guid => "guid",
            Self::Ipv6 => "ipv6",
            Self::Psi => "psi",
            Self::Int32 => "int32",
            Self::Uuid => "uuid",
            Self::Base64 => "base64",
        }
    }

    /// Short human description for usage listings.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Binary => "128-bit binary as hex",
            Self::Sha1 => "SHA1 form (not the hash)",
            Self::BinaryText => "text-mode binary",
            Self::Ipv4 => "IPv4 address",
            Self::Guid => "globally unique ID",
            Self::Ipv6 => "IPv6 address",
            Self::Psi => "time fingerprint",
            Self::Int32 => "32-bit unsigned integer",
            Self::Uuid => "UUID v4 form",
            Self::Base64 => "URL-safe text encoding",
        }
    }

    /// Looks a format up by its selector name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Renders a vector in the requested format.
///
/// `Null` cells pack as 0 bits in every byte-based format; only
/// [`VectorFormat::BinaryText`] distinguishes them.
#[must_use]
pub fn format_vector(v: &Vector, format: VectorFormat) -> String {
    let bytes = v.to_bytes();
    match format {
        VectorFormat::Binary => hex_string(&bytes, false),
        VectorFormat::Sha1 => dashed_hex(&bytes, &[4, 6, 8, 10], 0x30, 0xA0, false),
        VectorFormat::BinaryText => {
            let mut out = String::with_capacity(usize::from(VECTOR_CELLS));
            for pos in (1..=VECTOR_CELLS).rev() {
                // Position range is total, get cannot fail here.
                let cell = v.get(pos).unwrap_or_default();
                out.push(cell.as_char());
            }
            out
        }
        VectorFormat::Ipv4 => format!("{}.{}.{}.{}", bytes[3], bytes[2], bytes[1], bytes[0]),
        VectorFormat::Guid => {
            format!("{{{}}}", dashed_hex(&bytes, &[4, 8, 10], 0x00, 0xA0, true))
        }
        VectorFormat::Ipv6 => {
            let mut out = String::with_capacity(39);
            for (i, byte) in bytes.iter().enumerate() {
                if i > 0 && i % 2 == 0 {
                    out.push(':');
                }
                let _ = write!(out, "{byte:02x}");
            }
            out
        }
        VectorFormat::Psi => {
            let mut out = String::with_capacity(PSI_TEXT_LEN);
            out.push_str("[<:");
            for byte in bytes.iter().rev() {
                let _ = write!(out, "{byte:02X}");
            }
            out.push_str(":>]");
            out
        }
        VectorFormat::Int32 => {
            u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]).to_string()
        }
        VectorFormat::Uuid => dashed_hex(&bytes, &[4, 6, 8, 10], 0x40, 0xA0, false),
        VectorFormat::Base64 => base64_render(&bytes),
    }
}

/// Malformed PSI seed text. Reported to the caller; the processor is not
/// touched on this path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PsiParseError {
    /// Text length differs from the fixed 38-character grammar.
    #[error("seed text is {len} characters, expected {PSI_TEXT_LEN}")]
    BadLength {
        /// Actual character count.
        len: usize,
    },
    /// Leading `[<:` or trailing `:>]` delimiter missing.
    #[error("seed text is missing its bracket/colon delimiters")]
    BadDelimiter,
    /// A payload character is not a hex digit.
    #[error("seed text has a non-hex digit at offset {offset}")]
    BadHexDigit {
        /// Byte offset of the offending character.
        offset: usize,
    },
}

/// Parses canonical PSI text back into a vector.
///
/// Accepts exactly the formatter's grammar: `[<:`, 32 hex digits (either
/// case), `:>]`. The first digit pair is vector byte 16 and the last is
/// byte 1, mirroring the formatter's reversed emission, so format/parse
/// round-trips bit-for-bit.
///
/// # Errors
///
/// Returns a [`PsiParseError`] describing the first grammar violation.
pub fn parse_psi(text: &str) -> Result<Vector, PsiParseError> {
    let raw = text.as_bytes();
    if raw.len() != PSI_TEXT_LEN {
        return Err(PsiParseError::BadLength { len: raw.len() });
    }
    if &raw[0..3] != b"[<:" || &raw[35..38] != b":>]" {
        return Err(PsiParseError::BadDelimiter);
    }

    let mut v = Vector::zeroed();
    for pair in 0..usize::from(VECTOR_BYTES) {
        let offset = 3 + pair * 2;
        let hi = hex_digit(raw[offset]).ok_or(PsiParseError::BadHexDigit { offset })?;
        let lo = hex_digit(raw[offset + 1]).ok_or(PsiParseError::BadHexDigit {
            offset: offset + 1,
        })?;
        let byte_num = VECTOR_BYTES - u8::try_from(pair).unwrap_or(0);
        // Byte index is in range by construction.
        let _ = v.set_byte(byte_num, (hi << 4) | lo);
    }
    Ok(v)
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_string(bytes: &[u8], lower: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        if lower {
            let _ = write!(out, "{byte:02x}");
        } else {
            let _ = write!(out, "{byte:02X}");
        }
    }
    out
}

/// Hex rendering with a dash before each byte index in `dashes`, forcing
/// the high nibble of byte 6 to `patch6` and byte 8 to `patch8` when
/// non-zero (version/variant presentation nibbles).
fn dashed_hex(bytes: &[u8], dashes: &[usize], patch6: u8, patch8: u8, upper: bool) -> String {
    let mut out = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if dashes.contains(&i) {
            out.push('-');
        }
        let value = match i {
            6 if patch6 != 0 => (byte & 0x0F) | patch6,
            8 if patch8 != 0 => (byte & 0x0F) | patch8,
            _ => *byte,
        };
        if upper {
            let _ = write!(out, "{value:02X}");
        } else {
            let _ = write!(out, "{value:02x}");
        }
    }
    out
}

/// Encodes bytes 1..=15 as five Base64 triplets plus two characters for
/// byte 16, producing 22 characters with no padding.
fn base64_render(bytes: &[u8; 16]) -> String {
    let mut out = String::with_capacity(22);
    for triplet in bytes[..15].chunks_exact(3) {
        push_b64_triplet(&mut out, triplet[0], triplet[1], triplet[2], 4);
    }
    push_b64_triplet(&mut out, bytes[15], 0, 0, 2);
    out
}

fn push_b64_triplet(out: &mut String, b1: u8, b2: u8, b3: u8, keep: usize) {
    let indices = [
        b1 >> 2,
        ((b1 & 0x03) << 4) | (b2 >> 4),
        ((b2 & 0x0F) << 2) | (b3 >> 6),
        b3 & 0x3F,
    ];
    for idx in &indices[..keep] {
        out.push(char::from(BASE64_ALPHABET[usize::from(*idx)]));
    }
}
