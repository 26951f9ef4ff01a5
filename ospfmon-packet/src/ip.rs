//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::{Buf, Bytes};
use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};

use crate::bytes::{BytesExt, ensure_remaining};
use crate::field;
use crate::packet::error::{DecodeError, DecodeResult};

// IP protocol number assigned to OSPF.
pub const OSPF_IP_PROTO: u8 = 89;

//
// IPv4 header.
//
// Encoding format:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |Version|  IHL  |Type of Service|          Total Length         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |         Identification        |Flags|      Fragment Offset    |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  Time to Live |    Protocol   |         Header Checksum       |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                       Source Address                          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Destination Address                        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Options                    |    Padding    |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Ipv4Hdr {
    pub ihl: u8,
    pub tos: u8,
    pub total_length: u16,
    pub id: u16,
    pub frag: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub cksum: u16,
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
}

//
// IPv6 header.
//
// Encoding format:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |Version| Traffic Class |           Flow Label                  |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |         Payload Length        |  Next Header  |   Hop Limit   |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// +                         Source Address                        +
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// +                      Destination Address                      +
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Ipv6Hdr {
    pub traffic_class: u8,
    pub flow_label: u32,
    pub payload_length: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub src: Ipv6Addr,
    pub dst: Ipv6Addr,
}

#[derive(Clone, Debug, Eq, PartialEq, EnumAsInner)]
#[derive(Deserialize, Serialize)]
pub enum IpHdr {
    Ipv4(Ipv4Hdr),
    Ipv6(Ipv6Hdr),
}

// Outer IP header expected in front of captured OSPF packets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IpHdrMode {
    #[default]
    None,
    Ipv4,
    Ipv6,
    Auto,
}

// ===== impl Ipv4Hdr =====

impl Ipv4Hdr {
    pub const VERSION: u8 = 4;
    pub const MIN_LENGTH: u16 = 20;

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        ensure_remaining(buf, Self::MIN_LENGTH as usize)?;

        let ver_ihl = buf.get_u8();
        let version = field::extract_bits(ver_ihl, 0xf0, 4);
        if version != Self::VERSION {
            return Err(DecodeError::InvalidIpVersion(version));
        }
        let ihl = field::extract_bits(ver_ihl, 0x0f, 0);
        let hdr_len = u16::from(ihl) * 4;
        if hdr_len < Self::MIN_LENGTH {
            return Err(DecodeError::InvalidIpHdrLength(hdr_len));
        }
        let tos = buf.get_u8();
        let total_length = buf.get_u16();
        let id = buf.get_u16();
        let frag = buf.get_u16();
        let ttl = buf.get_u8();
        let protocol = buf.get_u8();
        let cksum = buf.get_u16();
        let src = Ipv4Addr::from(buf.get_u32());
        let dst = Ipv4Addr::from(buf.get_u32());

        // Skip IP options.
        let _ = buf.read_bytes((hdr_len - Self::MIN_LENGTH) as usize)?;

        if protocol != OSPF_IP_PROTO {
            return Err(DecodeError::UnexpectedIpProtocol(protocol));
        }

        Ok(Ipv4Hdr {
            ihl,
            tos,
            total_length,
            id,
            frag,
            ttl,
            protocol,
            cksum,
            src,
            dst,
        })
    }
}

// ===== impl Ipv6Hdr =====

impl Ipv6Hdr {
    pub const VERSION: u8 = 6;
    pub const LENGTH: u16 = 40;

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        ensure_remaining(buf, Self::LENGTH as usize)?;

        let word = buf.get_u32();
        let version = (word >> 28) as u8;
        if version != Self::VERSION {
            return Err(DecodeError::InvalidIpVersion(version));
        }
        let traffic_class = (word >> 20) as u8;
        let flow_label = word & 0x000f_ffff;
        let payload_length = buf.get_u16();
        let next_header = buf.get_u8();
        let hop_limit = buf.get_u8();
        let src = Ipv6Addr::from(buf.get_u128());
        let dst = Ipv6Addr::from(buf.get_u128());

        if next_header != OSPF_IP_PROTO {
            return Err(DecodeError::UnexpectedIpProtocol(next_header));
        }

        Ok(Ipv6Hdr {
            traffic_class,
            flow_label,
            payload_length,
            next_header,
            hop_limit,
            src,
            dst,
        })
    }
}

// ===== global functions =====

// Strips the outer IP header from a captured packet, if one is expected.
//
// In auto mode the IP version nibble decides. OSPFv3 packets start with the
// version byte 0x03, which never collides with an IP version.
pub fn strip_ip_hdr(
    mode: IpHdrMode,
    buf: &mut Bytes,
) -> DecodeResult<Option<IpHdr>> {
    let mode = match mode {
        IpHdrMode::Auto => match buf.first().map(|b| b >> 4) {
            Some(Ipv4Hdr::VERSION) => IpHdrMode::Ipv4,
            Some(Ipv6Hdr::VERSION) => IpHdrMode::Ipv6,
            _ => IpHdrMode::None,
        },
        mode => mode,
    };

    let hdr = match mode {
        IpHdrMode::Ipv4 => Some(IpHdr::Ipv4(Ipv4Hdr::decode(buf)?)),
        IpHdrMode::Ipv6 => Some(IpHdr::Ipv6(Ipv6Hdr::decode(buf)?)),
        IpHdrMode::None | IpHdrMode::Auto => None,
    };

    Ok(hdr)
}
