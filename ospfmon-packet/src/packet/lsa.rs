//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::{Ipv4Addr, Ipv6Addr};

use bitflags::bitflags;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use derive_new::new;
use enum_as_inner::EnumAsInner;
use ipnetwork::Ipv6Network;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::bytes::{BytesExt, BytesMutExt, ensure_remaining};
use crate::debug::Debug;
use crate::field::{self, IPV6_MAX_PREFIXLEN, Metric, MetricClass};
use crate::packet::error::{Anomaly, DecodeError, DecodeResult};
use crate::packet::{DecodeCtx, Options};
use crate::registry::{self, Domain, Lookup};

// The PrefixOptions Field.
//
// IANA registry:
// https://www.iana.org/assignments/ospfv3-parameters/ospfv3-parameters.xhtml#ospfv3-parameters-4
bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct PrefixOptions: u8 {
        const NU = 0x01;
        const LA = 0x02;
        const P = 0x08;
        const DN = 0x10;
        const N = 0x20;
    }
}

// OSPFv3 LSA type.
//
// The full 16-bit code is kept as seen on the wire, scope bits included.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(transparent)]
pub struct LsaType(pub u16);

// LSA type codes with a known body format.
#[derive(Clone, Copy, Debug, Eq, FromPrimitive, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum LsaTypeCode {
    Router = 0x2001,
    Network = 0x2002,
    InterAreaPrefix = 0x2003,
    InterAreaRouter = 0x2004,
    AsExternal = 0x4005,
    GroupMembership = 0x2006,
    Nssa = 0x2007,
    Link = 0x0008,
    IntraAreaPrefix = 0x2009,
}

//
// OSPFv3 LSA header.
//
// Encoding format:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |           LS Age              |           LS Type             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                       Link State ID                           |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Advertising Router                         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    LS Sequence Number                         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |        LS Checksum            |             Length            |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
#[derive(Clone, Copy, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaHdr {
    pub age: u16,
    pub lsa_type: LsaType,
    pub lsa_id: Ipv4Addr,
    pub adv_rtr: Ipv4Addr,
    pub seq_no: u32,
    pub cksum: u16,
    pub length: u16,
}

// OSPFv3 LSA.
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Lsa {
    pub hdr: LsaHdr,
    pub body: LsaBody,
}

// OSPFv3 LSA body.
#[derive(Clone, Debug, Eq, PartialEq, EnumAsInner)]
#[derive(Deserialize, Serialize)]
pub enum LsaBody {
    Router(LsaRouter),
    Network(LsaNetwork),
    InterAreaPrefix(LsaInterAreaPrefix),
    InterAreaRouter(LsaInterAreaRouter),
    AsExternal(LsaAsExternal),
    Nssa(LsaAsExternal),
    Link(LsaLink),
    IntraAreaPrefix(LsaIntraAreaPrefix),
    Unrecognized(LsaUnrecognized),
    Malformed(LsaMalformed),
}

//
// OSPFv3 Router-LSA.
//
// Encoding format (LSA body):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  0  |Nt|x|V|E|B|            Options                           |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |     Type      |       0       |          Metric               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                      Interface ID                             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                   Neighbor Interface ID                       |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Neighbor Router ID                         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                             ...                               |
//
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaRouter {
    pub flags: LsaRouterFlags,
    pub options: Options,
    pub links: Vec<LsaRouterLink>,
}

// OSPFv3 Router Properties Registry.
//
// IANA registry:
// https://www.iana.org/assignments/ospfv3-parameters/ospfv3-parameters.xhtml#ospfv3-parameters-7
//
// Bit positions follow RFC 5340 (B is the lowest bit). Older monitoring
// tools report V in the lowest bit and B in the third one.
bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct LsaRouterFlags: u8 {
        const B = 0x01;
        const E = 0x02;
        const V = 0x04;
        const NT = 0x10;
    }
}

// OSPFv3 Router-LSA link type.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(transparent)]
pub struct LsaRouterLinkType(pub u8);

#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaRouterLink {
    pub link_type: LsaRouterLinkType,
    pub metric: u16,
    pub iface_id: u32,
    pub nbr_iface_id: u32,
    pub nbr_router_id: Ipv4Addr,
}

//
// OSPFv3 Network-LSA.
//
// Encoding format (LSA body):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |      0        |              Options                          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                       Attached Router                         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                             ...                               |
//
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaNetwork {
    pub options: Options,
    pub attached_rtrs: Vec<Ipv4Addr>,
}

// OSPFv3 Inter-Area-Prefix-LSA.
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaInterAreaPrefix {
    pub metric: Metric,
    pub prefix_options: PrefixOptions,
    pub prefix: Ipv6Network,
}

// OSPFv3 Inter-Area-Router-LSA.
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaInterAreaRouter {
    pub options: Options,
    pub metric: Metric,
    pub router_id: Ipv4Addr,
}

//
// OSPFv3 AS-External-LSA (also used by the NSSA-LSA).
//
// Encoding format (LSA body):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |         |E|F|T|                Metric                         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  PrefixLength | PrefixOptions |     Referenced LS Type        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                        Address Prefix                         |
// |                             ...                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// +-                                                             -+
// |                                                               |
// +-                Forwarding Address (Optional)                -+
// |                                                               |
// +-                                                             -+
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |              External Route Tag (Optional)                    |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |               Referenced Link State ID (Optional)             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaAsExternal {
    pub flags: LsaAsExternalFlags,
    pub metric: Metric,
    pub prefix_options: PrefixOptions,
    pub prefix: Ipv6Network,
    pub fwd_addr: Option<Ipv6Addr>,
    pub tag: Option<u32>,
    pub ref_lsa_type: Option<LsaType>,
    pub ref_lsa_id: Option<Ipv4Addr>,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct LsaAsExternalFlags: u8 {
        const T = 0x01;
        const F = 0x02;
        const E = 0x04;
    }
}

//
// OSPFv3 Link-LSA.
//
// Encoding format (LSA body):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// | Rtr Priority  |                Options                        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// +-                                                             -+
// |                                                               |
// +-                Link-local Interface Address                 -+
// |                                                               |
// +-                                                             -+
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                         # prefixes                            |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  PrefixLength | PrefixOptions |             0                 |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                        Address Prefix                         |
// |                             ...                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                             ...                               |
//
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaLink {
    pub priority: u8,
    pub options: Options,
    pub linklocal: Ipv6Addr,
    pub prefix_count: u32,
    pub prefixes: Vec<LsaLinkPrefix>,
}

#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaLinkPrefix {
    pub options: PrefixOptions,
    pub value: Ipv6Network,
}

//
// OSPFv3 Intra-Area-Prefix-LSA.
//
// Encoding format (LSA body):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |         # Prefixes            |     Referenced LS Type        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                  Referenced Link State ID                     |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |               Referenced Advertising Router                   |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  PrefixLength | PrefixOptions |          Metric               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                       Address Prefix                          |
// |                             ...                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                             ...                               |
//
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaIntraAreaPrefix {
    pub prefix_count: u16,
    pub ref_lsa_type: LsaType,
    pub ref_lsa_id: Ipv4Addr,
    pub ref_adv_rtr: Ipv4Addr,
    pub prefixes: Vec<LsaIntraAreaPrefixEntry>,
}

#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaIntraAreaPrefixEntry {
    pub options: PrefixOptions,
    pub value: Ipv6Network,
    pub metric: u16,
}

// LSA whose type has no known body format. The body is kept as-is.
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaUnrecognized {
    pub raw: Bytes,
}

// LSA whose body failed to decode.
#[derive(Clone, Debug, Eq, new, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsaMalformed {
    pub error: DecodeError,
    pub raw: Bytes,
}

// ===== impl LsaType =====

impl LsaType {
    pub fn code(&self) -> Option<LsaTypeCode> {
        LsaTypeCode::from_u16(self.0)
    }

    pub fn name(&self) -> Lookup<&'static str> {
        registry::code_to_name(Domain::LsaType, self.0.into())
    }
}

impl std::fmt::Display for LsaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Lookup::Known(name) => write!(f, "{}", name),
            Lookup::Unknown => write!(f, "{:#06x}", self.0),
        }
    }
}

impl From<LsaTypeCode> for LsaType {
    fn from(code: LsaTypeCode) -> LsaType {
        LsaType(code as u16)
    }
}

// ===== impl LsaHdr =====

impl LsaHdr {
    pub const LENGTH: u16 = 20;

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        ensure_remaining(buf, Self::LENGTH as usize)?;

        let age = buf.get_u16();
        let lsa_type = LsaType(buf.get_u16());
        let lsa_id = Ipv4Addr::from(buf.get_u32());
        let adv_rtr = Ipv4Addr::from(buf.get_u32());
        let seq_no = buf.get_u32();
        let cksum = buf.get_u16();
        let length = buf.get_u16();

        Ok(LsaHdr {
            age,
            lsa_type,
            lsa_id,
            adv_rtr,
            seq_no,
            cksum,
            length,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.age);
        buf.put_u16(self.lsa_type.0);
        buf.put_ipv4(&self.lsa_id);
        buf.put_ipv4(&self.adv_rtr);
        buf.put_u32(self.seq_no);
        buf.put_u16(self.cksum);
        buf.put_u16(self.length);
    }
}

// ===== impl Lsa =====

impl Lsa {
    // Decodes one LSA, always consuming exactly the number of bytes its
    // header declares.
    pub fn decode(buf: &mut Bytes, ctx: &mut DecodeCtx) -> DecodeResult<Self> {
        let hdr = LsaHdr::decode(buf)?;
        if hdr.length < LsaHdr::LENGTH {
            return Err(DecodeError::InvalidLsaLength(hdr.length));
        }
        let body_len = (hdr.length - LsaHdr::LENGTH) as usize;
        let mut buf_body = buf.read_bytes(body_len)?;

        let raw = buf_body.clone();
        let body = match LsaBody::decode(hdr.lsa_type, &mut buf_body, ctx) {
            Ok(body) => {
                if buf_body.has_remaining() {
                    ctx.anomaly(Anomaly::TrailingLsaBytes(
                        hdr.lsa_type,
                        buf_body.remaining(),
                    ));
                }
                body
            }
            Err(error) => {
                Debug::LsaMalformed(&hdr, &error).log();
                LsaBody::Malformed(LsaMalformed::new(error, raw))
            }
        };

        Ok(Lsa { hdr, body })
    }
}

// ===== impl LsaBody =====

impl LsaBody {
    pub fn decode(
        lsa_type: LsaType,
        buf: &mut Bytes,
        ctx: &mut DecodeCtx,
    ) -> DecodeResult<Self> {
        let lsa = match lsa_type.code() {
            Some(LsaTypeCode::Router) => {
                LsaBody::Router(LsaRouter::decode(buf)?)
            }
            Some(LsaTypeCode::Network) => {
                LsaBody::Network(LsaNetwork::decode(buf)?)
            }
            Some(LsaTypeCode::InterAreaPrefix) => {
                let lsa = LsaInterAreaPrefix::decode(buf)?;
                check_metric(lsa_type, lsa.metric, ctx);
                LsaBody::InterAreaPrefix(lsa)
            }
            Some(LsaTypeCode::InterAreaRouter) => {
                let lsa = LsaInterAreaRouter::decode(buf)?;
                check_metric(lsa_type, lsa.metric, ctx);
                LsaBody::InterAreaRouter(lsa)
            }
            Some(LsaTypeCode::AsExternal) => {
                let lsa = LsaAsExternal::decode(buf)?;
                check_metric(lsa_type, lsa.metric, ctx);
                LsaBody::AsExternal(lsa)
            }
            Some(LsaTypeCode::Nssa) => {
                let lsa = LsaAsExternal::decode(buf)?;
                check_metric(lsa_type, lsa.metric, ctx);
                LsaBody::Nssa(lsa)
            }
            Some(LsaTypeCode::Link) => LsaBody::Link(LsaLink::decode(buf)?),
            Some(LsaTypeCode::IntraAreaPrefix) => {
                LsaBody::IntraAreaPrefix(LsaIntraAreaPrefix::decode(buf)?)
            }
            Some(LsaTypeCode::GroupMembership) | None => {
                Debug::LsaUnrecognized(lsa_type).log();
                LsaBody::Unrecognized(LsaUnrecognized::decode(buf))
            }
        };

        Ok(lsa)
    }
}

// ===== impl LsaRouter =====

impl LsaRouter {
    pub const BASE_LENGTH: u16 = 4;

    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let flags = LsaRouterFlags::from_bits_retain(buf.read_u8()?);
        let options = Options::decode(buf)?;

        let mut links = vec![];
        let links_cnt = buf.remaining() / LsaRouterLink::LENGTH as usize;
        for _ in 0..links_cnt {
            let link = LsaRouterLink::decode(buf)?;
            links.push(link);
        }

        Ok(LsaRouter::new(flags, options, links))
    }
}

// ===== impl LsaRouterFlags =====

impl LsaRouterFlags {
    pub fn is_virtual_link_endpoint(&self) -> bool {
        self.contains(LsaRouterFlags::V)
    }

    pub fn is_asbr(&self) -> bool {
        self.contains(LsaRouterFlags::E)
    }

    pub fn is_abr(&self) -> bool {
        self.contains(LsaRouterFlags::B)
    }
}

// ===== impl LsaRouterLinkType =====

impl LsaRouterLinkType {
    pub fn name(&self) -> Lookup<&'static str> {
        registry::code_to_name(Domain::RouterLinkType, self.0.into())
    }
}

// ===== impl LsaRouterLink =====

impl LsaRouterLink {
    pub const LENGTH: u16 = 16;

    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        ensure_remaining(buf, Self::LENGTH as usize)?;

        let link_type = LsaRouterLinkType(buf.get_u8());
        let _ = buf.get_u8();
        let metric = buf.get_u16();
        let iface_id = buf.get_u32();
        let nbr_iface_id = buf.get_u32();
        let nbr_router_id = Ipv4Addr::from(buf.get_u32());

        Ok(LsaRouterLink::new(
            link_type,
            metric,
            iface_id,
            nbr_iface_id,
            nbr_router_id,
        ))
    }
}

// ===== impl LsaNetwork =====

impl LsaNetwork {
    pub const BASE_LENGTH: u16 = 4;

    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let _ = buf.read_u8()?;
        let options = Options::decode(buf)?;

        let mut attached_rtrs = vec![];
        let rtrs_cnt = buf.remaining() / 4;
        for _ in 0..rtrs_cnt {
            let rtr = buf.read_ipv4()?;
            attached_rtrs.push(rtr);
        }

        Ok(LsaNetwork::new(options, attached_rtrs))
    }
}

// ===== impl LsaInterAreaPrefix =====

impl LsaInterAreaPrefix {
    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let _ = buf.read_u8()?;
        let metric = decode_metric(buf)?;
        let plen = buf.read_u8()?;
        let prefix_options = PrefixOptions::from_bits_retain(buf.read_u8()?);
        let _ = buf.read_u16()?;
        let prefix = decode_prefix(plen, buf)?;

        Ok(LsaInterAreaPrefix::new(metric, prefix_options, prefix))
    }
}

// ===== impl LsaInterAreaRouter =====

impl LsaInterAreaRouter {
    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let _ = buf.read_u8()?;
        let options = Options::decode(buf)?;
        let _ = buf.read_u8()?;
        let metric = decode_metric(buf)?;
        let router_id = buf.read_ipv4()?;

        Ok(LsaInterAreaRouter::new(options, metric, router_id))
    }
}

// ===== impl LsaAsExternal =====

impl LsaAsExternal {
    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let flags = LsaAsExternalFlags::from_bits_retain(buf.read_u8()?);
        let metric = decode_metric(buf)?;
        let plen = buf.read_u8()?;
        let prefix_options = PrefixOptions::from_bits_retain(buf.read_u8()?);
        let ref_lsa_type = match buf.read_u16()? {
            0 => None,
            ref_lsa_type => Some(LsaType(ref_lsa_type)),
        };
        let prefix = decode_prefix(plen, buf)?;
        let fwd_addr = if flags.contains(LsaAsExternalFlags::F) {
            Some(buf.read_ipv6()?)
        } else {
            None
        };
        let tag = if flags.contains(LsaAsExternalFlags::T) {
            Some(buf.read_u32()?)
        } else {
            None
        };
        let ref_lsa_id = if ref_lsa_type.is_some() {
            Some(buf.read_ipv4()?)
        } else {
            None
        };

        Ok(LsaAsExternal::new(
            flags,
            metric,
            prefix_options,
            prefix,
            fwd_addr,
            tag,
            ref_lsa_type,
            ref_lsa_id,
        ))
    }
}

// ===== impl LsaLink =====

impl LsaLink {
    pub const BASE_LENGTH: u16 = 24;

    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let priority = buf.read_u8()?;
        let options = Options::decode(buf)?;
        let linklocal = decode_prefix_addr(IPV6_MAX_PREFIXLEN, buf)?;

        let mut prefixes = vec![];
        let prefix_count = buf.read_u32()?;
        for _ in 0..prefix_count {
            let plen = buf.read_u8()?;
            let options = PrefixOptions::from_bits_retain(buf.read_u8()?);
            let _ = buf.read_u16()?;
            let value = decode_prefix(plen, buf)?;
            prefixes.push(LsaLinkPrefix::new(options, value));
        }

        Ok(LsaLink::new(
            priority,
            options,
            linklocal,
            prefix_count,
            prefixes,
        ))
    }
}

// ===== impl LsaIntraAreaPrefix =====

impl LsaIntraAreaPrefix {
    pub const BASE_LENGTH: u16 = 12;

    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let prefix_count = buf.read_u16()?;
        let ref_lsa_type = LsaType(buf.read_u16()?);
        let ref_lsa_id = buf.read_ipv4()?;
        let ref_adv_rtr = buf.read_ipv4()?;

        let mut prefixes = vec![];
        for _ in 0..prefix_count {
            let plen = buf.read_u8()?;
            let options = PrefixOptions::from_bits_retain(buf.read_u8()?);
            let metric = buf.read_u16()?;
            let value = decode_prefix(plen, buf)?;
            prefixes.push(LsaIntraAreaPrefixEntry::new(options, value, metric));
        }

        Ok(LsaIntraAreaPrefix::new(
            prefix_count,
            ref_lsa_type,
            ref_lsa_id,
            ref_adv_rtr,
            prefixes,
        ))
    }
}

// ===== impl LsaUnrecognized =====

impl LsaUnrecognized {
    fn decode(buf: &mut Bytes) -> Self {
        let raw = buf.split_to(buf.len());
        LsaUnrecognized { raw }
    }
}

// ===== global functions =====

// Decodes a stream of concatenated LSAs until the buffer is exhausted.
//
// Each LSA advances the stream by its declared length, whether or not its
// body could be decoded, so one bad LSA never desynchronizes the ones that
// follow it.
pub fn decode_lsa_stream(
    buf: &mut Bytes,
    ctx: &mut DecodeCtx,
) -> DecodeResult<Vec<Lsa>> {
    let mut lsas = vec![];
    while buf.has_remaining() {
        let lsa = Lsa::decode(buf, ctx)?;
        lsas.push(lsa);
    }

    Ok(lsas)
}

// ===== helper functions =====

// Decodes a 24-bit metric as its high byte and low 16-bit word.
fn decode_metric(buf: &mut Bytes) -> DecodeResult<Metric> {
    ensure_remaining(buf, 3)?;
    let high = buf.get_u8();
    let low = buf.get_u16();
    Ok(Metric::combine(high, low))
}

fn check_metric(lsa_type: LsaType, metric: Metric, ctx: &mut DecodeCtx) {
    if metric.class() == MetricClass::Anomalous {
        ctx.anomaly(Anomaly::MetricAboveInfinity(lsa_type, metric));
    }
}

// Decodes the address of a prefix of `plen` bits, encoded in the minimum
// number of 32-bit words.
fn decode_prefix_addr(plen: u8, buf: &mut Bytes) -> DecodeResult<Ipv6Addr> {
    if plen > IPV6_MAX_PREFIXLEN {
        return Err(DecodeError::InvalidPrefixLength(plen));
    }

    let words_cnt = field::prefix_wire_words(plen);
    ensure_remaining(buf, words_cnt * 4)?;
    let mut words = [0; 4];
    for word in words.iter_mut().take(words_cnt) {
        *word = buf.get_u32();
    }

    field::reconstruct_addr128(&words[..words_cnt], plen)
}

fn decode_prefix(plen: u8, buf: &mut Bytes) -> DecodeResult<Ipv6Network> {
    let addr = decode_prefix_addr(plen, buf)?;
    Ipv6Network::new(addr, plen)
        .map_err(|_| DecodeError::InvalidPrefixLength(plen))
}
