//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};

use crate::packet::error::{DecodeError, DecodeResult};

// Maximum prefix length of an IPv6 address.
pub const IPV6_MAX_PREFIXLEN: u8 = 128;

// Metric value denoting an unreachable destination.
pub const LS_INFINITY: u32 = 0xFFFF;

// Metric value advertised by stub routers (RFC 3137).
pub const STUB_ROUTER: u32 = 0xFF_FFFF;

// Metric combined from a high byte and a low 16-bit word.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(transparent)]
pub struct Metric(pub u32);

// Classification of a metric value against the protocol sentinels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum MetricClass {
    Normal,
    LsInfinity,
    StubRouter,
    Anomalous,
}

// ===== impl Metric =====

impl Metric {
    pub const fn combine(high: u8, low: u16) -> Metric {
        Metric(((high as u32) << 16) | low as u32)
    }

    pub const fn class(&self) -> MetricClass {
        match self.0 {
            LS_INFINITY => MetricClass::LsInfinity,
            STUB_ROUTER => MetricClass::StubRouter,
            value if value > LS_INFINITY => MetricClass::Anomalous,
            _ => MetricClass::Normal,
        }
    }
}

impl From<u16> for Metric {
    fn from(metric: u16) -> Metric {
        Metric(metric.into())
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== global functions =====

/// Reads a big-endian unsigned integer of `width` bytes (at most 8) starting
/// at `offset`.
///
/// Fails with `TruncatedBuffer` when the field doesn't fit in `buf`.
pub fn read_be(buf: &[u8], offset: usize, width: usize) -> DecodeResult<u64> {
    let end = offset.saturating_add(width);
    if width > 8 || end > buf.len() {
        return Err(DecodeError::TruncatedBuffer {
            expected: end,
            remaining: buf.len(),
        });
    }

    Ok(buf[offset..end]
        .iter()
        .fold(0, |value, byte| (value << 8) | u64::from(*byte)))
}

/// Extracts a bit-field from a packed flags byte.
pub const fn extract_bits(byte: u8, mask: u8, shift: u8) -> u8 {
    (byte & mask) >> shift
}

/// Builds an IPv6 address from up to four 32-bit words, left-justified.
///
/// Bits beyond `plen` and any words not supplied are zero-filled. Extra words
/// beyond the fourth are ignored.
pub fn reconstruct_addr128(words: &[u32], plen: u8) -> DecodeResult<Ipv6Addr> {
    if plen > IPV6_MAX_PREFIXLEN {
        return Err(DecodeError::InvalidPrefixLength(plen));
    }

    let value = words
        .iter()
        .take(4)
        .enumerate()
        .fold(0u128, |value, (i, word)| {
            value | (u128::from(*word) << (96 - 32 * i))
        });
    let mask = match plen {
        0 => 0,
        _ => u128::MAX << (128 - u32::from(plen)),
    };

    Ok(Ipv6Addr::from(value & mask))
}

/// Number of 32-bit words used to encode a prefix of `plen` bits.
pub const fn prefix_wire_words(plen: u8) -> usize {
    (plen as usize).div_ceil(32)
}

// ===== unit tests =====
