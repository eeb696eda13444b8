//! Flat buffer encoding: a little-endian `u32` bit count followed by the
//! packed bytes.

use crate::{
    BIT_COUNT_FIELD_SIZE, Bitmap, BitmapError, Result, max_size_needed_to_store_in_buffer,
    real_size,
};
use alloc::vec::Vec;
use log::{debug, trace};

impl Bitmap {
    /// Returns the exact number of bytes [`write_to_buffer`] needs for this
    /// bitmap: the 4 byte bit count plus one byte per 8 bits, rounded up.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// assert_eq!(Bitmap::empty().size_needed_in_buffer(), 4);
    /// assert_eq!(Bitmap::new(1).size_needed_in_buffer(), 5);
    /// assert_eq!(Bitmap::new(9).size_needed_in_buffer(), 6);
    /// ```
    ///
    /// [`write_to_buffer`]: Bitmap::write_to_buffer
    #[inline]
    pub fn size_needed_in_buffer(&self) -> usize {
        max_size_needed_to_store_in_buffer(self.bit_count)
    }

    /// Same as the free function [`max_size_needed_to_store_in_buffer`].
    ///
    /// [`max_size_needed_to_store_in_buffer`]: crate::max_size_needed_to_store_in_buffer
    #[inline]
    pub const fn max_size_needed_to_store_in_buffer(max_bit_count: u32) -> usize {
        max_size_needed_to_store_in_buffer(max_bit_count)
    }

    /// Encodes the bitmap at the start of `buf` and returns the number of
    /// bytes written, which always equals [`size_needed_in_buffer`].
    ///
    /// Bytes of `buf` past the encoded length are left untouched.
    ///
    /// # Errors
    /// Returns [`BitmapError::BufferTooSmall`] if `buf` is shorter than
    /// [`size_needed_in_buffer`]. Nothing is written in that case.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::{Bitmap, BitmapError};
    ///
    /// let bm = Bitmap::from_ones_iter(10, [0, 9]);
    /// let mut buf = [0xAAu8; 8];
    /// assert_eq!(bm.write_to_buffer(&mut buf), Ok(6));
    /// assert_eq!(buf, [10, 0, 0, 0, 0x01, 0x02, 0xAA, 0xAA]);
    ///
    /// let mut short = [0u8; 5];
    /// assert_eq!(
    ///     bm.write_to_buffer(&mut short),
    ///     Err(BitmapError::BufferTooSmall { needed: 6, available: 5 }),
    /// );
    /// ```
    ///
    /// [`size_needed_in_buffer`]: Bitmap::size_needed_in_buffer
    pub fn write_to_buffer(&self, buf: &mut [u8]) -> Result<usize> {
        let needed = self.size_needed_in_buffer();
        if buf.len() < needed {
            debug!(
                "cannot encode {}-bit bitmap: {} bytes needed, {} available",
                self.bit_count,
                needed,
                buf.len()
            );
            return Err(BitmapError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }

        let (header, payload) = buf[..needed].split_at_mut(BIT_COUNT_FIELD_SIZE);
        header.copy_from_slice(&self.bit_count.to_le_bytes());
        payload.copy_from_slice(&self.bytes);

        trace!("encoded {}-bit bitmap into {} bytes", self.bit_count, needed);
        Ok(needed)
    }

    /// Encodes the bitmap into a freshly allocated vector of exactly
    /// [`size_needed_in_buffer`] bytes.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::Bitmap;
    ///
    /// assert_eq!(Bitmap::empty().to_vec(), [0, 0, 0, 0]);
    /// assert_eq!(Bitmap::from_ones_iter(3, [1]).to_vec(), [3, 0, 0, 0, 0b010]);
    /// ```
    ///
    /// [`size_needed_in_buffer`]: Bitmap::size_needed_in_buffer
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size_needed_in_buffer());
        buf.extend_from_slice(&self.bit_count.to_le_bytes());
        buf.extend_from_slice(&self.bytes);
        buf
    }

    /// Decodes a bitmap from the start of `buf`.
    ///
    /// Returns the bitmap together with the number of bytes consumed, so
    /// that several encoded bitmaps can be read back to back from one buffer.
    /// Bytes past the encoded bitmap are ignored. Padding bits in the last
    /// payload byte are cleared.
    ///
    /// # Errors
    /// Returns [`BitmapError::BufferTooSmall`] if `buf` is shorter than the
    /// 4 byte header, or shorter than the header plus the payload the header
    /// announces.
    ///
    /// # Examples
    /// ```
    /// use wire_bitmap::{Bitmap, BitmapError};
    ///
    /// let buf: [u8; 7] = [10, 0, 0, 0, 0x01, 0x02, 0xFF];
    /// let (bm, consumed) = Bitmap::create_from_buffer(&buf).unwrap();
    /// assert_eq!(consumed, 6);
    /// assert_eq!(bm.iter_ones().collect::<Vec<_>>(), [0, 9]);
    ///
    /// assert_eq!(
    ///     Bitmap::create_from_buffer(&buf[..5]),
    ///     Err(BitmapError::BufferTooSmall { needed: 6, available: 5 }),
    /// );
    /// ```
    pub fn create_from_buffer(buf: &[u8]) -> Result<(Self, usize)> {
        let Some((header, payload)) = buf.split_first_chunk::<BIT_COUNT_FIELD_SIZE>() else {
            debug!(
                "cannot decode bitmap header: {} bytes needed, {} available",
                BIT_COUNT_FIELD_SIZE,
                buf.len()
            );
            return Err(BitmapError::BufferTooSmall {
                needed: BIT_COUNT_FIELD_SIZE,
                available: buf.len(),
            });
        };

        let bit_count = u32::from_le_bytes(*header);
        if bit_count == 0 {
            trace!("decoded empty bitmap from {} bytes", BIT_COUNT_FIELD_SIZE);
            return Ok((Self::empty(), BIT_COUNT_FIELD_SIZE));
        }

        let payload_len = real_size(bit_count);
        let consumed = BIT_COUNT_FIELD_SIZE + payload_len;
        let Some(payload) = payload.get(..payload_len) else {
            debug!(
                "cannot decode {}-bit bitmap: {} bytes needed, {} available",
                bit_count,
                consumed,
                buf.len()
            );
            return Err(BitmapError::BufferTooSmall {
                needed: consumed,
                available: buf.len(),
            });
        };

        trace!("decoded {}-bit bitmap from {} bytes", bit_count, consumed);
        Ok((Self::from_packed(bit_count, payload.to_vec()), consumed))
    }
}
