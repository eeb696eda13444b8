//! A compact, runtime-sized bitmap with a flat little-endian buffer encoding.
//! `no_std` + `alloc`, no `unsafe`.
//!
//! Meant as a building block for protocol code that tracks presence flags
//! (received messages, acknowledging replicas, stable checkpoints, ...) and
//! needs to ship them over the wire or persist them to disk.
//!
//! [`Bitmap`] is the main struct in this library. Its [features](#features)
//! are listed below.
//!
//! # Examples
//! ```
//! use wire_bitmap::Bitmap;
//!
//! let mut bitmap = Bitmap::new(10);
//! bitmap.set(0);
//! bitmap.set(9);
//!
//! let mut buf = [0u8; 16];
//! let written = bitmap.write_to_buffer(&mut buf).unwrap();
//! assert_eq!(&buf[..written], &[10, 0, 0, 0, 0x01, 0x02]);
//!
//! let (decoded, consumed) = Bitmap::create_from_buffer(&buf).unwrap();
//! assert_eq!(consumed, written);
//! assert_eq!(decoded, bitmap);
//! ```
//!
//! # Wire format
//!
//! | Offset | Size (bytes)       | Field                          |
//! |--------|--------------------|--------------------------------|
//! | 0      | 4                  | bit count, `u32` little-endian |
//! | 4      | `ceil(bit_count/8)`| packed bits, LSB-first per byte|
//!
//! A 0-bit bitmap encodes as exactly 4 bytes.
//!
//! # Features
//!
//! - `#![no_std]` compatible (needs `alloc`)
//! - Bit count chosen at runtime, fixed for the lifetime of the value
//! - Per-bit `get`, `set`, `reset` and whole-map `zero_all`
//! - Deep copy via `Clone` / `clone_from`
//! - Size queries usable before any bitmap exists:
//!   [`max_size_needed_to_store_in_buffer`]
//! - Iteration over all bits or over set bits only
//!
//! # Errors and panics
//!
//! Indexing past the bit count is a programming error and panics. A buffer
//! that is too small to read from or write into is an ordinary runtime
//! condition and is reported as [`BitmapError::BufferTooSmall`].

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod bitmap;
mod codec;
mod error;

pub use bitmap::{Bitmap, BitmapIter, IterOnes};
pub use error::{BitmapError, Result};

/// Size in bytes of the bit count header that precedes the packed bits in
/// the buffer encoding.
pub const BIT_COUNT_FIELD_SIZE: usize = core::mem::size_of::<u32>();

/// Computes the number of bytes needed to pack `bit_count` bits.
///
/// # Examples
/// ```
/// use wire_bitmap::real_size;
///
/// assert_eq!(real_size(0), 0);
/// assert_eq!(real_size(1), 1);
/// assert_eq!(real_size(8), 1);
/// assert_eq!(real_size(9), 2);
/// ```
pub const fn real_size(bit_count: u32) -> usize {
    bit_count.div_ceil(8) as usize
}

/// Returns the number of buffer bytes needed to encode any bitmap holding at
/// most `max_bit_count` bits.
///
/// Lets callers size a buffer up front without building a bitmap.
///
/// # Examples
/// ```
/// use wire_bitmap::{max_size_needed_to_store_in_buffer, Bitmap};
///
/// assert_eq!(max_size_needed_to_store_in_buffer(0), 4);
/// assert_eq!(max_size_needed_to_store_in_buffer(9), 6);
/// assert_eq!(
///     max_size_needed_to_store_in_buffer(300),
///     Bitmap::new(300).size_needed_in_buffer(),
/// );
/// ```
pub const fn max_size_needed_to_store_in_buffer(max_bit_count: u32) -> usize {
    BIT_COUNT_FIELD_SIZE + real_size(max_bit_count)
}
