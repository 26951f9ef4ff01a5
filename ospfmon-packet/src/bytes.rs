//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::cell::RefCell;
use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::field;
use crate::packet::error::{DecodeError, DecodeResult};

thread_local!(
    pub static TLS_BUF: RefCell<BytesMut> =
        RefCell::new(BytesMut::with_capacity(4096))
);

// Extension methods for Bytes.
//
// Unlike the `Buf` getters, these never panic on short input. A read that
// doesn't fit in the remaining bytes fails with `TruncatedBuffer` and leaves
// the current position untouched.
pub trait BytesExt {
    /// Reads an unsigned 8 bit integer from `self`.
    ///
    /// The current position is advanced by 1.
    fn read_u8(&mut self) -> DecodeResult<u8>;

    /// Reads an unsigned 16 bit integer from `self` in big-endian byte
    /// order.
    ///
    /// The current position is advanced by 2.
    fn read_u16(&mut self) -> DecodeResult<u16>;

    /// Reads an unsigned 24 bit integer from `self` in big-endian byte
    /// order.
    ///
    /// The current position is advanced by 3.
    fn read_u24(&mut self) -> DecodeResult<u32>;

    /// Reads an unsigned 32 bit integer from `self` in big-endian byte
    /// order.
    ///
    /// The current position is advanced by 4.
    fn read_u32(&mut self) -> DecodeResult<u32>;

    /// Reads an IPv4 addr from `self` in big-endian byte order.
    ///
    /// The current position is advanced by 4.
    fn read_ipv4(&mut self) -> DecodeResult<Ipv4Addr>;

    /// Reads an IPv6 addr from `self` in big-endian byte order.
    ///
    /// The current position is advanced by 16.
    fn read_ipv6(&mut self) -> DecodeResult<Ipv6Addr>;

    /// Splits off the next `len` bytes of `self`.
    ///
    /// The current position is advanced by `len`.
    fn read_bytes(&mut self, len: usize) -> DecodeResult<Bytes>;
}

// Extension methods for BytesMut.
pub trait BytesMutExt {
    /// Writes an unsigned 24 bit integer to `self` in big-endian byte order.
    ///
    /// The current position is advanced by 3.
    ///
    /// # Panics
    ///
    /// This function panics if there is not enough remaining capacity in
    /// `self`.
    fn put_u24(&mut self, n: u32);

    /// Writes an IPv4 addr to `self` in big-endian byte order.
    ///
    /// The current position is advanced by 4.
    ///
    /// # Panics
    ///
    /// This function panics if there is not enough remaining capacity in
    /// `self`.
    fn put_ipv4(&mut self, addr: &Ipv4Addr);

    /// Writes an IPv6 addr to `self` in big-endian byte order.
    ///
    /// The current position is advanced by 16.
    ///
    /// # Panics
    ///
    /// This function panics if there is not enough remaining capacity in
    /// `self`.
    fn put_ipv6(&mut self, addr: &Ipv6Addr);
}

// ===== impl Bytes =====

impl BytesExt for Bytes {
    fn read_u8(&mut self) -> DecodeResult<u8> {
        read_be_advance(self, 1).map(|value| value as u8)
    }

    fn read_u16(&mut self) -> DecodeResult<u16> {
        read_be_advance(self, 2).map(|value| value as u16)
    }

    fn read_u24(&mut self) -> DecodeResult<u32> {
        read_be_advance(self, 3).map(|value| value as u32)
    }

    fn read_u32(&mut self) -> DecodeResult<u32> {
        read_be_advance(self, 4).map(|value| value as u32)
    }

    fn read_ipv4(&mut self) -> DecodeResult<Ipv4Addr> {
        self.read_u32().map(Ipv4Addr::from)
    }

    fn read_ipv6(&mut self) -> DecodeResult<Ipv6Addr> {
        ensure_remaining(self, 16)?;
        Ok(Ipv6Addr::from(self.get_u128()))
    }

    fn read_bytes(&mut self, len: usize) -> DecodeResult<Bytes> {
        ensure_remaining(self, len)?;
        Ok(self.split_to(len))
    }
}

// ===== impl BytesMut =====

impl BytesMutExt for BytesMut {
    fn put_u24(&mut self, n: u32) {
        let n = n.to_be_bytes();
        self.put_slice(&n[1..=3]);
    }

    fn put_ipv4(&mut self, addr: &Ipv4Addr) {
        self.put_u32((*addr).into())
    }

    fn put_ipv6(&mut self, addr: &Ipv6Addr) {
        self.put_slice(&addr.octets())
    }
}

// ===== helper functions =====

fn read_be_advance(buf: &mut Bytes, width: usize) -> DecodeResult<u64> {
    let value = field::read_be(buf, 0, width)?;
    buf.advance(width);
    Ok(value)
}

// Fails unless at least `len` bytes remain in the buffer.
pub fn ensure_remaining(buf: &Bytes, len: usize) -> DecodeResult<()> {
    if buf.remaining() < len {
        return Err(DecodeError::TruncatedBuffer {
            expected: len,
            remaining: buf.remaining(),
        });
    }

    Ok(())
}
