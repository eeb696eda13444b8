use crate::real_size;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::iter::{FusedIterator, Iterator};

/// A packed, runtime-sized array of bits.
///
/// The bit count is picked at construction and never changes afterwards
/// (short of replacing the whole value, e.g. through [`Clone::clone_from`]).
/// Bit `i` lives in byte `i / 8` at position `i % 8`, least significant bit
/// first.
///
/// A bitmap of 0 bits holds no storage at all. It is mostly useful as a
/// placeholder that is later overwritten by assignment or decoding.
///
/// Internally stores bits in a `Vec<u8>` of exactly [`real_size`] bytes.
/// Padding bits in the last byte are kept unset.
#[derive(PartialEq, Eq, Hash)]
pub struct Bitmap {
    pub(crate) bit_count: u32,
    pub(crate) bytes: Vec<u8>,
}

impl Bitmap {
    /// Creates a new bitmap of `bit_count` bits, all unset.
    ///
    /// No memory is allocated when `bit_count == 0`.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let bitmap = Bitmap::new(16);
    /// assert_eq!(bitmap.num_of_bits(), 16);
    /// assert_eq!(bitmap.count_ones(), 0);
    /// ```
    pub fn new(bit_count: u32) -> Self {
        Self {
            bit_count,
            bytes: vec![0u8; real_size(bit_count)],
        }
    }

    /// Creates a bitmap of 0 bits. Same as `Bitmap::new(0)`.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let bitmap = Bitmap::empty();
    /// assert!(bitmap.is_empty());
    /// assert_eq!(bitmap.size_needed_in_buffer(), 4);
    /// ```
    pub const fn empty() -> Self {
        Self {
            bit_count: 0,
            bytes: Vec::new(),
        }
    }

    /// Creates a bitmap of `bit_count` bits with only the indices provided by
    /// the iterator set.
    ///
    /// # Panics
    /// Panics if any index is out of bounds (i.e., `>= bit_count`).
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let bitmap = Bitmap::from_ones_iter(5, [0, 2, 4]);
    /// assert!(bitmap.get(0));
    /// assert!(!bitmap.get(1));
    /// assert_eq!(bitmap.count_ones(), 3);
    /// ```
    pub fn from_ones_iter<I: IntoIterator<Item = u32>>(bit_count: u32, iter: I) -> Self {
        let mut bitmap = Self::new(bit_count);
        for idx in iter {
            bitmap.set(idx);
        }
        bitmap
    }

    /// Builds a bitmap around already packed bytes, clearing the padding bits
    /// of the last byte.
    pub(crate) fn from_packed(bit_count: u32, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), real_size(bit_count));
        let mut bitmap = Self { bit_count, bytes };
        bitmap.clean_unused_bits();
        bitmap
    }

    /// Returns the number of bits this bitmap represents.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// assert_eq!(Bitmap::new(9).num_of_bits(), 9);
    /// assert_eq!(Bitmap::empty().num_of_bits(), 0);
    /// ```
    #[inline]
    pub fn num_of_bits(&self) -> u32 {
        self.bit_count
    }

    /// Returns the number of bits as a `usize`.
    #[inline]
    pub fn len(&self) -> usize {
        self.bit_count as usize
    }

    /// Returns `true` if the bitmap holds 0 bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// # Panics
    /// Panics if `idx >= num_of_bits()`.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(8);
    /// bm.set(1);
    /// assert!(bm.get(1));
    /// assert!(!bm.get(0));
    /// ```
    #[inline]
    pub fn get(&self, idx: u32) -> bool {
        assert!(idx < self.bit_count, "Bit index {idx} out of bounds");
        let (byte_idx, bit_idx) = Self::idxs(idx);
        self.bytes[byte_idx] & 1 << bit_idx != 0
    }

    /// Sets the bit at the given index. Setting an already set bit is a no-op.
    ///
    /// # Panics
    /// Panics if `idx >= num_of_bits()`.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(8);
    /// assert!(!bm.get(3));
    /// bm.set(3);
    /// assert!(bm.get(3));
    /// ```
    #[inline]
    pub fn set(&mut self, idx: u32) {
        assert!(idx < self.bit_count, "Bit index {idx} out of bounds");
        let (byte_idx, bit_idx) = Self::idxs(idx);
        self.bytes[byte_idx] |= 1 << bit_idx;
    }

    /// Clears the bit at the given index. Clearing an unset bit is a no-op.
    ///
    /// # Panics
    /// Panics if `idx >= num_of_bits()`.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::from_ones_iter(8, [3]);
    /// bm.reset(3);
    /// assert!(!bm.get(3));
    /// ```
    #[inline]
    pub fn reset(&mut self, idx: u32) {
        assert!(idx < self.bit_count, "Bit index {idx} out of bounds");
        let (byte_idx, bit_idx) = Self::idxs(idx);
        self.bytes[byte_idx] &= !(1 << bit_idx);
    }

    /// Clears every bit.
    ///
    /// # Panics
    /// Panics if the backing storage does not match the bit count, which
    /// means the bitmap was corrupted.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::from_ones_iter(12, [0, 5, 11]);
    /// bm.zero_all();
    /// assert_eq!(bm.count_ones(), 0);
    /// assert_eq!(bm.num_of_bits(), 12);
    /// ```
    pub fn zero_all(&mut self) {
        assert_eq!(
            self.bytes.len(),
            real_size(self.bit_count),
            "Bitmap storage does not match its bit count"
        );
        self.bytes.fill(0);
    }

    /// Returns the number of set bits.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// assert_eq!(Bitmap::from_ones_iter(20, [1, 2, 19]).count_ones(), 3);
    /// ```
    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Returns the packed bytes, least significant bit first.
    ///
    /// This is exactly the payload that follows the bit count header in the
    /// buffer encoding.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let bm = Bitmap::from_ones_iter(10, [0, 9]);
    /// assert_eq!(bm.as_bytes(), &[0x01, 0x02]);
    /// ```
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn idxs(idx: u32) -> (usize, u32) {
        ((idx / 8) as usize, idx % 8)
    }

    fn clean_unused_bits(&mut self) {
        let bits_in_last = self.bit_count % 8;
        if bits_in_last != 0 {
            let mask = (1u8 << bits_in_last) - 1;
            if let Some(last) = self.bytes.last_mut() {
                *last &= mask;
            }
        }
    }

    /// Returns an iterator over all bits as `bool`, from index 0 upwards.
    ///
    /// The iterator yields exactly `num_of_bits()` items.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let bm = Bitmap::from_ones_iter(4, [0, 2]);
    /// let bits: Vec<bool> = bm.iter().collect();
    /// assert_eq!(bits, [true, false, true, false]);
    /// ```
    #[inline]
    pub fn iter(&self) -> BitmapIter<'_> {
        BitmapIter {
            bitmap: self,
            next_idx: 0,
        }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// Runs in O(max(k, b)) where k is the number of set bits and b the
    /// number of bytes.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// let bm = Bitmap::from_ones_iter(17, [16, 3, 8]);
    /// let ones: Vec<u32> = bm.iter_ones().collect();
    /// assert_eq!(ones, [3, 8, 16]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            bytes: &self.bytes,
            byte_idx: 0,
            current: self.bytes.first().copied().unwrap_or(0),
        }
    }
}

impl Clone for Bitmap {
    fn clone(&self) -> Self {
        Self {
            bit_count: self.bit_count,
            bytes: self.bytes.clone(),
        }
    }

    /// Replaces `self` with a deep copy of `source`, reusing the existing
    /// allocation where it is large enough.
    fn clone_from(&mut self, source: &Self) {
        self.bit_count = source.bit_count;
        self.bytes.clone_from(&source.bytes);
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'bitmap> IntoIterator for &'bitmap Bitmap {
    type Item = bool;
    type IntoIter = BitmapIter<'bitmap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Bitmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Bitmap({}) LSB -> ", self.bit_count)?;
        for (i, bit) in self.iter().enumerate() {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
            if i % 8 == 7 && i + 1 < self.len() {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")
    }
}

/// Iterator over all bits in the bitmap as `bool` values.
///
/// Returned by [`Bitmap::iter()`].
#[derive(Clone, Copy)]
pub struct BitmapIter<'bitmap> {
    bitmap: &'bitmap Bitmap,
    next_idx: u32,
}

impl Iterator for BitmapIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_idx >= self.bitmap.bit_count {
            return None;
        }
        let bit = self.bitmap.get(self.next_idx);
        self.next_idx += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.bitmap.bit_count - self.next_idx) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitmapIter<'_> {}

impl FusedIterator for BitmapIter<'_> {}

/// Iterator over the indices of set bits in the bitmap, in ascending order.
///
/// Returned by [`Bitmap::iter_ones()`].
#[derive(Clone, Copy)]
pub struct IterOnes<'bitmap> {
    bytes: &'bitmap [u8],
    byte_idx: usize,
    current: u8,
}

impl Iterator for IterOnes<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros();
                self.current &= self.current - 1; // unset LSB
                return Some((self.byte_idx * 8) as u32 + tz);
            }

            self.byte_idx += 1;
            self.current = self.bytes.get(self.byte_idx).copied().unwrap_or(0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}
