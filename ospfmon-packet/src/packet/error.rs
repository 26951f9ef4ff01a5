//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

use crate::field::Metric;
use crate::packet::PacketType;
use crate::packet::lsa::LsaType;

// Type aliases.
pub type DecodeResult<T> = Result<T, DecodeError>;

// OSPFv3 decode errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum DecodeError {
    TruncatedBuffer { expected: usize, remaining: usize },
    InvalidPrefixLength(u8),
    UnknownMessageType(u8),
    InvalidVersion(u8),
    InvalidLength(u16),
    InvalidLsaLength(u16),
    // Outer IP header
    InvalidIpHdrLength(u16),
    InvalidIpVersion(u8),
    UnexpectedIpProtocol(u8),
}

// Protocol anomalies found while decoding.
//
// Anomalies never abort decoding. They are collected alongside the decoded
// message so that the consumer can report them.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum Anomaly {
    CountMismatch { declared: u32, decoded: u32 },
    TrailingMessageBytes(PacketType, usize),
    TrailingLsaBytes(LsaType, usize),
    MetricAboveInfinity(LsaType, Metric),
}

// ===== impl DecodeError =====

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::TruncatedBuffer {
                expected,
                remaining,
            } => {
                write!(
                    f,
                    "truncated buffer: expected {} bytes, {} remaining",
                    expected, remaining
                )
            }
            DecodeError::InvalidPrefixLength(plen) => {
                write!(f, "invalid prefix length: {}", plen)
            }
            DecodeError::UnknownMessageType(pkt_type) => {
                write!(f, "unknown message type: {}", pkt_type)
            }
            DecodeError::InvalidVersion(version) => {
                write!(f, "invalid packet version: {}", version)
            }
            DecodeError::InvalidLength(pkt_len) => {
                write!(f, "invalid packet length: {}", pkt_len)
            }
            DecodeError::InvalidLsaLength(lsa_len) => {
                write!(f, "invalid LSA length: {}", lsa_len)
            }
            DecodeError::InvalidIpHdrLength(length) => {
                write!(f, "invalid IP header length: {}", length)
            }
            DecodeError::InvalidIpVersion(version) => {
                write!(f, "invalid IP version: {}", version)
            }
            DecodeError::UnexpectedIpProtocol(proto) => {
                write!(f, "unexpected IP protocol: {}", proto)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

// ===== impl Anomaly =====

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::CountMismatch { declared, decoded } => {
                write!(
                    f,
                    "LSA count mismatch: {} declared, {} decoded",
                    declared, decoded
                )
            }
            Anomaly::TrailingMessageBytes(pkt_type, count) => {
                write!(
                    f,
                    "{} trailing bytes after {} message body",
                    count, pkt_type
                )
            }
            Anomaly::TrailingLsaBytes(lsa_type, count) => {
                write!(f, "{} trailing bytes after {} LSA body", count, lsa_type)
            }
            Anomaly::MetricAboveInfinity(lsa_type, metric) => {
                write!(
                    f,
                    "{} LSA metric above LSInfinity: {:#x}",
                    lsa_type, metric.0
                )
            }
        }
    }
}
