//! FixedStr: a 31-byte string that lives in one 256-bit register
//!
//! Content bytes occupy the low lanes of a [`U8x32`], followed by zero padding.
//! The last lane is always zero, so the storage doubles as a NUL-terminated C
//! string. Because of the padding, length is a population count, equality is
//! one register compare and concatenation is a lane shift plus an add.

use crate::config::simd::report_truncation;
use crate::error::{check_capacity, LaneStrError, Result};
use crate::simd::{Bytes32, U8x32};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::ffi::{c_char, CStr};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::{self, FromStr};

/// Maximum content length in bytes
const CAPACITY: usize = U8x32::LANES - 1;

/// Every lane except the terminator
const CONTENT_MASK: U8x32 = U8x32::from_raw(Bytes32::new(content_mask()));

const fn content_mask() -> [u8; 32] {
    let mut bytes = [0xFF; 32];
    bytes[CAPACITY] = 0;
    bytes
}

/// Outcome of an operation that may have to drop bytes to stay within capacity.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fit {
    /// Everything fit
    Complete,
    /// The result was cut at capacity
    Truncated {
        /// Number of bytes that did not fit
        dropped: usize,
    },
}

impl Fit {
    /// True if bytes were dropped
    #[inline]
    pub fn is_truncated(self) -> bool {
        matches!(self, Self::Truncated { .. })
    }

    /// Number of bytes dropped, zero when complete
    #[inline]
    pub fn dropped(self) -> usize {
        match self {
            Self::Complete => 0,
            Self::Truncated { dropped } => dropped,
        }
    }
}

#[cold]
fn truncated(operation: &'static str, dropped: usize) -> Fit {
    if report_truncation() {
        log::warn!(
            "FixedStr::{} dropped {} byte(s) beyond capacity {}",
            operation,
            dropped,
            CAPACITY
        );
    }
    Fit::Truncated { dropped }
}

/// First lane that breaks the padding layout, if any.
fn padding_violation(register: &U8x32) -> Option<usize> {
    let bits = register.simd_ne(U8x32::zero()).bits();
    let len = bits.trailing_ones();
    if len as usize > CAPACITY {
        return Some(CAPACITY);
    }
    let rest = bits >> len;
    if rest == 0 {
        None
    } else {
        Some((len + rest.trailing_zeros()) as usize)
    }
}

/// Fixed-capacity string stored in a single 256-bit vector register.
///
/// Holds up to 31 bytes. Content may be any bytes except NUL; it is usually
/// ASCII or UTF-8 but this is not enforced.
///
/// # Examples
///
/// ```rust
/// use lanestr::{fixed_str, FixedStr};
///
/// let mut s = fixed_str!("hello");
/// assert!(!s.append(&fixed_str!(" world")).is_truncated());
/// assert_eq!(s, "hello world");
/// assert!(s.contains(&fixed_str!("o w")));
///
/// s.make_ascii_uppercase();
/// assert_eq!(s.as_str(), Some("HELLO WORLD"));
/// ```
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct FixedStr {
    register: U8x32,
}

impl FixedStr {
    /// Maximum number of content bytes
    pub const CAPACITY: usize = CAPACITY;

    /// Comparison mask of the underlying register
    pub const COMPARISON_MASK: u32 = U8x32::COMPARISON_MASK;

    /// Create an empty string
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a literal, usually through [`fixed_str!`](crate::fixed_str).
    ///
    /// # Panics
    ///
    /// Panics if `literal` is longer than 31 bytes or contains NUL. In a
    /// const context that is a compile error.
    pub const fn from_literal(literal: &str) -> Self {
        let bytes = literal.as_bytes();
        assert!(bytes.len() <= CAPACITY, "literal does not fit into a FixedStr");
        let mut raw = [0u8; 32];
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i] != 0, "literal contains a NUL byte");
            raw[i] = bytes[i];
            i += 1;
        }
        Self {
            register: U8x32::from_raw(Bytes32::new(raw)),
        }
    }

    /// Copy `bytes` into a new string.
    ///
    /// Fails with [`LaneStrError::CapacityExceeded`] for more than 31 bytes and
    /// with [`LaneStrError::InteriorNul`] if any byte is NUL.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        check_capacity(bytes.len(), CAPACITY)?;
        if let Some(position) = bytes.iter().position(|&b| b == 0) {
            return Err(LaneStrError::interior_nul(position));
        }
        let mut s = Self::new();
        s.register.as_lanes_mut()[..bytes.len()].copy_from_slice(bytes);
        s.debug_check();
        Ok(s)
    }

    /// Copy a C string. Strings of 32 bytes or more are rejected.
    pub fn from_c_str(c_str: &CStr) -> Result<Self> {
        Self::try_from_bytes(c_str.to_bytes())
    }

    /// Copy a raw NUL-terminated string.
    ///
    /// # Safety
    ///
    /// `ptr` must satisfy the requirements of [`CStr::from_ptr`].
    pub unsafe fn from_ptr(ptr: *const c_char) -> Result<Self> {
        // SAFETY: forwarded to the caller.
        Self::from_c_str(unsafe { CStr::from_ptr(ptr) })
    }

    /// Copy the bytes before the first NUL, keeping at most 31 of them.
    pub fn from_bytes_truncating(bytes: &[u8]) -> (Self, Fit) {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let kept = end.min(CAPACITY);
        let mut s = Self::new();
        s.register.as_lanes_mut()[..kept].copy_from_slice(&bytes[..kept]);
        s.debug_check();
        let fit = if end > kept {
            truncated("from_bytes_truncating", end - kept)
        } else {
            Fit::Complete
        };
        (s, fit)
    }

    /// Adopt a register, checking that it follows the padding layout.
    pub fn from_register(register: U8x32) -> Result<Self> {
        match padding_violation(&register) {
            Some(lane) => Err(LaneStrError::invalid_padding(lane)),
            None => Ok(Self { register }),
        }
    }

    /// Adopt a register without checking its layout.
    ///
    /// # Safety
    ///
    /// The register must hold at most 31 non-zero bytes followed only by
    /// zeros. Other operations rely on that layout for their results.
    #[inline]
    pub unsafe fn from_register_unchecked(register: U8x32) -> Self {
        let s = Self { register };
        s.debug_check();
        s
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.register.simd_ne(U8x32::zero()).count() as usize
    }

    /// True for the empty string
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.register.lane(0) == 0
    }

    /// Remove all content
    #[inline]
    pub fn clear(&mut self) {
        self.register = U8x32::zero();
    }

    /// Append `other`, cutting the result at capacity.
    pub fn append(&mut self, other: &Self) -> Fit {
        let len = self.len();
        let total = len + other.len();
        self.register += other.register << len;
        if total > CAPACITY {
            self.register &= CONTENT_MASK;
            self.debug_check();
            return truncated("append", total - CAPACITY);
        }
        self.debug_check();
        Fit::Complete
    }

    /// Append `other`, leaving `self` unchanged if the result would not fit.
    pub fn try_append(&mut self, other: &Self) -> Result<()> {
        check_capacity(self.len() + other.len(), CAPACITY)?;
        self.append_unchecked(other);
        Ok(())
    }

    /// Append `other` without a capacity check.
    ///
    /// The caller must ensure the combined length is at most 31; debug builds
    /// assert it. On overflow the terminator lane may be overwritten.
    #[inline]
    pub fn append_unchecked(&mut self, other: &Self) {
        debug_assert!(self.len() + other.len() <= CAPACITY, "append_unchecked overflow");
        self.register += other.register << self.len();
        self.debug_check();
    }

    /// Insert `other` in front, cutting the result at capacity.
    pub fn prepend(&mut self, other: &Self) -> Fit {
        let other_len = other.len();
        let total = self.len() + other_len;
        self.register <<= other_len;
        self.register += other.register;
        if total > CAPACITY {
            self.register &= CONTENT_MASK;
            self.debug_check();
            return truncated("prepend", total - CAPACITY);
        }
        self.debug_check();
        Fit::Complete
    }

    /// Insert `other` in front, leaving `self` unchanged if the result would
    /// not fit.
    pub fn try_prepend(&mut self, other: &Self) -> Result<()> {
        check_capacity(self.len() + other.len(), CAPACITY)?;
        self.prepend_unchecked(other);
        Ok(())
    }

    /// Insert `other` in front without a capacity check.
    ///
    /// The caller must ensure the combined length is at most 31; debug builds
    /// assert it.
    #[inline]
    pub fn prepend_unchecked(&mut self, other: &Self) {
        debug_assert!(self.len() + other.len() <= CAPACITY, "prepend_unchecked overflow");
        self.register <<= other.len();
        self.register += other.register;
        self.debug_check();
    }

    /// Offset of the first occurrence of `needle`.
    ///
    /// Tries every offset with one register compare each. An empty needle is
    /// found at offset 0.
    pub fn find(&self, needle: &Self) -> Option<usize> {
        let needle_len = needle.len();
        if needle_len == 0 {
            return Some(0);
        }
        let len = self.len();
        if needle_len > len {
            return None;
        }

        let needle_bits = needle.register.simd_ne(U8x32::zero()).bits();
        let mut shifted = needle.register;
        for offset in 0..=len - needle_len {
            let want = needle_bits << offset;
            if self.register.simd_eq(shifted).bits() & want == want {
                return Some(offset);
            }
            shifted <<= 1;
        }
        None
    }

    /// True if `needle` occurs anywhere in `self`
    #[inline]
    pub fn contains(&self, needle: &Self) -> bool {
        self.find(needle).is_some()
    }

    /// True if `self` begins with `prefix`
    pub fn starts_with(&self, prefix: &Self) -> bool {
        let want = prefix.register.simd_ne(U8x32::zero()).bits();
        self.register.simd_eq(prefix.register).bits() & want == want
    }

    /// True if `self` ends with `suffix`
    pub fn ends_with(&self, suffix: &Self) -> bool {
        let (len, suffix_len) = (self.len(), suffix.len());
        if suffix_len > len {
            return false;
        }
        let want = suffix.register.simd_ne(U8x32::zero()).bits() << (len - suffix_len);
        let shifted = suffix.register << (len - suffix_len);
        self.register.simd_eq(shifted).bits() & want == want
    }

    /// Convert ASCII `a-z` to `A-Z` in place
    pub fn make_ascii_uppercase(&mut self) {
        let lower = self.register.lanes_ge(U8x32::splat(b'a'))
            & self.register.lanes_le(U8x32::splat(b'z'));
        self.register -= lower & U8x32::splat(0x20);
        self.debug_check();
    }

    /// Convert ASCII `A-Z` to `a-z` in place
    pub fn make_ascii_lowercase(&mut self) {
        let upper = self.register.lanes_ge(U8x32::splat(b'A'))
            & self.register.lanes_le(U8x32::splat(b'Z'));
        self.register += upper & U8x32::splat(0x20);
        self.debug_check();
    }

    /// Uppercased copy
    pub fn to_ascii_uppercase(&self) -> Self {
        let mut s = *self;
        s.make_ascii_uppercase();
        s
    }

    /// Lowercased copy
    pub fn to_ascii_lowercase(&self) -> Self {
        let mut s = *self;
        s.make_ascii_lowercase();
        s
    }

    /// Drop up to `n` bytes from the end, returning how many were removed.
    pub fn remove_from_end(&mut self, n: usize) -> usize {
        let len = self.len();
        let n = n.min(len);
        if n == 0 {
            return 0;
        }
        // push the kept bytes against the top lane, then bring them back
        self.register <<= U8x32::LANES - len + n;
        self.register >>= U8x32::LANES - (len - n);
        self.debug_check();
        n
    }

    /// Drop up to `n` bytes from the start, returning how many were removed.
    pub fn remove_from_start(&mut self, n: usize) -> usize {
        let n = n.min(self.len());
        self.register >>= n;
        self.debug_check();
        n
    }

    /// Content bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.register.as_lanes()[..self.len()]
    }

    /// All 32 bytes including padding, a valid C string
    #[inline]
    pub fn raw_bytes(&self) -> &[u8; 32] {
        &self.register.as_raw().0
    }

    /// Content as `&str` if it is valid UTF-8
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(self.as_bytes()).ok()
    }

    /// Content byte at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.as_bytes().get(index).copied()
    }

    /// The underlying register
    #[inline]
    pub fn as_register(&self) -> &U8x32 {
        &self.register
    }

    #[inline(always)]
    fn debug_check(&self) {
        debug_assert!(
            padding_violation(&self.register).is_none(),
            "FixedStr padding broken: {:?}",
            self.register
        );
    }
}

/// Build a [`FixedStr`](crate::FixedStr) from a string literal at compile time.
///
/// ```rust
/// use lanestr::fixed_str;
///
/// let s = fixed_str!("hello");
/// assert_eq!(s.len(), 5);
/// ```
///
/// Literals longer than 31 bytes do not compile:
///
/// ```compile_fail
/// let s = lanestr::fixed_str!("this literal is far too long to fit");
/// ```
#[macro_export]
macro_rules! fixed_str {
    ($literal:expr) => {{
        const VALUE: $crate::FixedStr = $crate::FixedStr::from_literal($literal);
        VALUE
    }};
}

impl PartialEq for FixedStr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.register == other.register
    }
}

impl Eq for FixedStr {}

impl PartialEq<str> for FixedStr {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for FixedStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for FixedStr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixedStr {
    fn cmp(&self, other: &Self) -> Ordering {
        // zero padding sorts below every content byte
        self.raw_bytes().cmp(other.raw_bytes())
    }
}

impl Hash for FixedStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.raw_bytes());
    }
}

impl fmt::Debug for FixedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "FixedStr({:?})", s),
            None => write!(f, "FixedStr({:?})", self.as_bytes()),
        }
    }
}

impl fmt::Display for FixedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl AsRef<[u8]> for FixedStr {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&str> for FixedStr {
    type Error = LaneStrError;

    fn try_from(s: &str) -> Result<Self> {
        Self::try_from_bytes(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for FixedStr {
    type Error = LaneStrError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from_bytes(bytes)
    }
}

impl FromStr for FixedStr {
    type Err = LaneStrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from_bytes(s.as_bytes())
    }
}

impl Serialize for FixedStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}

struct FixedStrVisitor;

impl<'de> Visitor<'de> for FixedStrVisitor {
    type Value = FixedStr;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string or byte sequence of at most {} bytes without NUL", CAPACITY)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<FixedStr, E> {
        FixedStr::try_from_bytes(v.as_bytes()).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<FixedStr, E> {
        FixedStr::try_from_bytes(v).map_err(E::custom)
    }

    // Formats without a native bytes type write `serialize_bytes` as a sequence.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<FixedStr, A::Error> {
        let mut buf = [0u8; CAPACITY];
        let mut len = 0;
        while let Some(byte) = seq.next_element::<u8>()? {
            if len == CAPACITY {
                return Err(de::Error::invalid_length(len + 1, &self));
            }
            buf[len] = byte;
            len += 1;
        }
        FixedStr::try_from_bytes(&buf[..len]).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for FixedStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(FixedStrVisitor)
        } else {
            deserializer.deserialize_bytes(FixedStrVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<FixedStr>(), 32);
        assert_eq!(std::mem::align_of::<FixedStr>(), 32);
        assert_eq!(FixedStr::CAPACITY, 31);
        assert_eq!(FixedStr::COMPARISON_MASK, u32::MAX);
    }

    #[test]
    fn test_literal_padding() {
        let s = fixed_str!("hello");
        assert_eq!(&s.raw_bytes()[..5], b"hello");
        assert!(s.raw_bytes()[5..].iter().all(|&b| b == 0));
        assert_eq!(s.len(), 5);
        assert!(fixed_str!("").is_empty());
    }

    #[test]
    fn test_try_from_bytes_errors() {
        let long = [b'x'; 32];
        assert!(matches!(
            FixedStr::try_from_bytes(&long),
            Err(LaneStrError::CapacityExceeded { len: 32, capacity: 31 })
        ));
        assert!(matches!(
            FixedStr::try_from_bytes(b"ab\0c"),
            Err(LaneStrError::InteriorNul { position: 2 })
        ));
        assert_eq!(FixedStr::try_from_bytes(&long[..31]).map(|s| s.len()).ok(), Some(31));
    }

    #[test]
    fn test_append_and_prepend() {
        let mut s = fixed_str!("hello");
        assert_eq!(s.append(&fixed_str!(", world")), Fit::Complete);
        assert_eq!(s, "hello, world");

        let mut s = fixed_str!("world");
        assert_eq!(s.prepend(&fixed_str!("hello ")), Fit::Complete);
        assert_eq!(s, "hello world");
    }

    #[test]
    fn test_append_truncates_at_capacity() {
        let mut s = FixedStr::try_from("abcdefghijklmnopqrstuvwxyz").unwrap();
        let fit = s.append(&fixed_str!("0123456789"));
        assert_eq!(fit, Fit::Truncated { dropped: 5 });
        assert_eq!(s.len(), 31);
        assert_eq!(s, "abcdefghijklmnopqrstuvwxyz01234");
        assert_eq!(s.raw_bytes()[31], 0);
    }

    #[test]
    fn test_prepend_truncates_tail() {
        let mut s = FixedStr::try_from("abcdefghijklmnopqrstuvwxyz").unwrap();
        let fit = s.prepend(&fixed_str!("0123456789"));
        assert_eq!(fit.dropped(), 5);
        assert_eq!(s, "0123456789abcdefghijklmnopqrstu");
    }

    #[test]
    fn test_try_append_leaves_value_on_error() {
        let mut s = FixedStr::try_from("abcdefghijklmnopqrstuvwxyz").unwrap();
        let before = s;
        assert!(s.try_append(&fixed_str!("0123456789")).is_err());
        assert_eq!(s, before);
        assert!(s.try_prepend(&fixed_str!("01234")).is_ok());
        assert_eq!(s.len(), 31);
    }

    #[test]
    fn test_search() {
        let s = fixed_str!("hello world");
        assert!(s.contains(&fixed_str!("world")));
        assert!(!s.contains(&fixed_str!("worlds")));
        assert_eq!(s.find(&fixed_str!("o")), Some(4));
        assert_eq!(s.find(&fixed_str!("")), Some(0));
        assert!(s.starts_with(&fixed_str!("hell")));
        assert!(s.ends_with(&fixed_str!("rld")));
        assert!(!s.ends_with(&fixed_str!("hello")));
        assert!(s.contains(&s));
    }

    #[test]
    fn test_case_conversion() {
        let s = fixed_str!("Hello, World! 123");
        assert_eq!(s.to_ascii_uppercase(), "HELLO, WORLD! 123");
        assert_eq!(s.to_ascii_lowercase(), "hello, world! 123");
    }

    #[test]
    fn test_remove() {
        let mut s = fixed_str!("hello");
        assert_eq!(s.remove_from_end(2), 2);
        assert_eq!(s, "hel");

        let mut s = fixed_str!("hello");
        assert_eq!(s.remove_from_start(2), 2);
        assert_eq!(s, "llo");

        let mut s = fixed_str!("abc");
        assert_eq!(s.remove_from_end(10), 3);
        assert!(s.is_empty());
    }

    #[test]
    fn test_from_register_validates() {
        let mut bytes = [0u8; 32];
        bytes[..3].copy_from_slice(b"abc");
        assert!(FixedStr::from_register(U8x32::from_raw(Bytes32::new(bytes))).is_ok());

        bytes[5] = b'x';
        assert!(matches!(
            FixedStr::from_register(U8x32::from_raw(Bytes32::new(bytes))),
            Err(LaneStrError::InvalidPadding { lane: 5 })
        ));

        let full = U8x32::splat(b'a');
        assert!(matches!(
            FixedStr::from_register(full),
            Err(LaneStrError::InvalidPadding { lane: 31 })
        ));
    }

    #[test]
    fn test_ordering_matches_bytes() {
        let a = fixed_str!("abc");
        let b = fixed_str!("abcd");
        let c = fixed_str!("abd");
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }
}
