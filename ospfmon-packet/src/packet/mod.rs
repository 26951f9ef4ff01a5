//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod error;
pub mod lsa;

use std::net::Ipv4Addr;

use bitflags::bitflags;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use enum_as_inner::EnumAsInner;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::bytes::{BytesExt, BytesMutExt, TLS_BUF, ensure_remaining};
use crate::debug::Debug;
use crate::field;
use crate::packet::error::{Anomaly, DecodeError, DecodeResult};
use crate::packet::lsa::{Lsa, LsaHdr, LsaType, decode_lsa_stream};
use crate::registry::{self, Domain, Lookup};

// OSPFv3 Options field.
//
// Bits not listed here are kept as received.
//
// IANA registry:
// https://www.iana.org/assignments/ospfv3-parameters/ospfv3-parameters.xhtml#ospfv3-parameters-1
bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct Options: u32 {
        const V6 = 0x000001;
        const E = 0x000002;
        const MC = 0x000004;
        const N = 0x000008;
        const R = 0x000010;
        const DC = 0x000020;
        const AF = 0x000100;
        const L = 0x000200;
        const AT = 0x000400;
    }
}

// Database Description flags.
bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct DbDescFlags: u8 {
        const MS = 0x01;
        const M = 0x02;
        const I = 0x04;
    }
}

// OSPF packet type.
//
// IANA registry:
// https://www.iana.org/assignments/ospfv2-parameters/ospfv2-parameters.xhtml#ospfv2-parameters-3
#[derive(Clone, Copy, Debug, Eq, FromPrimitive, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum PacketType {
    Hello = 0x01,
    DbDesc = 0x02,
    LsRequest = 0x03,
    LsUpdate = 0x04,
    LsAck = 0x05,
}

//
// OSPFv3 packet header.
//
// Encoding format:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |   Version #   |     Type      |         Packet length         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                         Router ID                             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                          Area ID                              |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |          Checksum             |  Instance ID  |      0        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// The packet type is kept as received. It's validated when the packet body
// is dispatched.
//
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct PacketHdr {
    pub version: u8,
    pub pkt_type: u8,
    pub length: u16,
    pub router_id: Ipv4Addr,
    pub area_id: Ipv4Addr,
    pub cksum: u16,
    pub instance_id: u8,
}

//
// OSPFv3 Hello packet.
//
// Encoding format (packet body):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                        Interface ID                           |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// | Rtr Priority  |             Options                           |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |        HelloInterval          |       RouterDeadInterval      |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                   Designated Router ID                        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                Backup Designated Router ID                    |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                         Neighbor ID                           |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                        ...                                    |
//
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Hello {
    pub iface_id: u32,
    pub priority: u8,
    pub options: Options,
    pub hello_interval: u16,
    pub dead_interval: u16,
    pub dr: Ipv4Addr,
    pub bdr: Ipv4Addr,
    pub neighbors: Vec<Ipv4Addr>,
}

//
// OSPFv3 Database Description packet.
//
// Encoding format (packet body):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |       0       |               Options                         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |        Interface MTU          |      0        |0|0|0|0|0|I|M|MS
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    DD sequence number                         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// +-                                                             -+
// |                                                               |
// +-                      An LSA Header                          -+
// |                                                               |
// +-                                                             -+
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                       ...                                     |
//
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct DbDesc {
    pub options: Options,
    pub mtu: u16,
    pub dd_flags: DbDescFlags,
    pub dd_seq_no: u32,
    pub lsa_hdrs: Vec<LsaHdr>,
}

// OSPFv3 Link State Request packet.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsRequest {
    pub entries: Vec<LsRequestEntry>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsRequestEntry {
    pub lsa_type: LsaType,
    pub lsa_id: Ipv4Addr,
    pub adv_rtr: Ipv4Addr,
}

// OSPFv3 Link State Update packet.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsUpdate {
    // Number of LSAs announced by the sender.
    pub lsa_count: u32,
    pub lsas: Vec<Lsa>,
}

// OSPFv3 Link State Acknowledgment packet.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct LsAck {
    pub lsa_hdrs: Vec<LsaHdr>,
}

// OSPFv3 packet body.
#[derive(Clone, Debug, Eq, PartialEq, EnumAsInner)]
#[derive(Deserialize, Serialize)]
pub enum MessageBody {
    Hello(Hello),
    DbDesc(DbDesc),
    LsRequest(LsRequest),
    LsUpdate(LsUpdate),
    LsAck(LsAck),
}

// Fully decoded OSPFv3 packet.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct DecodedMessage {
    pub hdr: PacketHdr,
    pub body: MessageBody,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<Anomaly>,
}

// Decode context.
//
// Collects the anomalies found while a single packet is decoded.
#[derive(Debug, Default)]
pub struct DecodeCtx {
    pub anomalies: Vec<Anomaly>,
}

// ===== impl Options =====

impl Options {
    pub(crate) fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        Ok(Options::from_bits_retain(buf.read_u24()?))
    }

    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        buf.put_u24(self.bits());
    }
}

// ===== impl DbDescFlags =====

impl DbDescFlags {
    pub const fn init(&self) -> bool {
        field::extract_bits(self.bits(), DbDescFlags::I.bits(), 2) == 1
    }

    pub const fn more(&self) -> bool {
        field::extract_bits(self.bits(), DbDescFlags::M.bits(), 1) == 1
    }

    pub const fn master(&self) -> bool {
        field::extract_bits(self.bits(), DbDescFlags::MS.bits(), 0) == 1
    }
}

// ===== impl PacketType =====

impl PacketType {
    pub fn name(&self) -> &'static str {
        match registry::code_to_name(Domain::MessageType, *self as u32) {
            Lookup::Known(name) => name,
            Lookup::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for PacketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ===== impl PacketHdr =====

impl PacketHdr {
    pub const VERSION: u8 = 3;
    pub const LENGTH: u16 = 16;

    // Decodes the fixed-size packet header.
    //
    // Nothing is consumed from the buffer when it's too short.
    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        ensure_remaining(buf, Self::LENGTH as usize)?;

        let version = buf.get_u8();
        let pkt_type = buf.get_u8();
        let length = buf.get_u16();
        let router_id = Ipv4Addr::from(buf.get_u32());
        let area_id = Ipv4Addr::from(buf.get_u32());
        let cksum = buf.get_u16();
        let instance_id = buf.get_u8();
        let _ = buf.get_u8();

        Ok(PacketHdr {
            version,
            pkt_type,
            length,
            router_id,
            area_id,
            cksum,
            instance_id,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.version);
        buf.put_u8(self.pkt_type);
        // The length will be initialized later.
        buf.put_u16(0);
        buf.put_ipv4(&self.router_id);
        buf.put_ipv4(&self.area_id);
        buf.put_u16(self.cksum);
        buf.put_u8(self.instance_id);
        buf.put_u8(0);
    }

    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_u8(self.pkt_type)
    }
}

// ===== impl Hello =====

impl Hello {
    pub const BASE_LENGTH: u16 = 20;

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        ensure_remaining(buf, Self::BASE_LENGTH as usize)?;

        let iface_id = buf.read_u32()?;
        let priority = buf.read_u8()?;
        let options = Options::decode(buf)?;
        let hello_interval = buf.read_u16()?;
        let dead_interval = buf.read_u16()?;
        let dr = buf.read_ipv4()?;
        let bdr = buf.read_ipv4()?;

        // Parse list of neighbors.
        let mut neighbors = vec![];
        let nbrs_cnt = buf.remaining() / 4;
        for _ in 0..nbrs_cnt {
            let nbr = buf.read_ipv4()?;
            neighbors.push(nbr);
        }

        Ok(Hello {
            iface_id,
            priority,
            options,
            hello_interval,
            dead_interval,
            dr,
            bdr,
            neighbors,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.iface_id);
        buf.put_u8(self.priority);
        self.options.encode(buf);
        buf.put_u16(self.hello_interval);
        buf.put_u16(self.dead_interval);
        buf.put_ipv4(&self.dr);
        buf.put_ipv4(&self.bdr);
        for nbr in &self.neighbors {
            buf.put_ipv4(nbr);
        }
    }
}

// ===== impl DbDesc =====

impl DbDesc {
    pub const BASE_LENGTH: u16 = 12;

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        ensure_remaining(buf, Self::BASE_LENGTH as usize)?;

        let _ = buf.read_u8()?;
        let options = Options::decode(buf)?;
        let mtu = buf.read_u16()?;
        let _ = buf.read_u8()?;
        let dd_flags = DbDescFlags::from_bits_retain(buf.read_u8()?);
        let dd_seq_no = buf.read_u32()?;

        // Parse list of LSA headers.
        let lsa_hdrs = decode_lsa_hdrs(buf)?;

        Ok(DbDesc {
            options,
            mtu,
            dd_flags,
            dd_seq_no,
            lsa_hdrs,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(0);
        self.options.encode(buf);
        buf.put_u16(self.mtu);
        buf.put_u8(0);
        buf.put_u8(self.dd_flags.bits());
        buf.put_u32(self.dd_seq_no);
        for lsa_hdr in &self.lsa_hdrs {
            lsa_hdr.encode(buf);
        }
    }
}

// ===== impl LsRequest =====

impl LsRequest {
    pub const ENTRY_LENGTH: u16 = 12;

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        // Parse list of LSA global IDs.
        let mut entries = vec![];
        let entries_cnt = buf.remaining() / Self::ENTRY_LENGTH as usize;
        for _ in 0..entries_cnt {
            let _ = buf.read_u16()?;
            let lsa_type = LsaType(buf.read_u16()?);
            let lsa_id = buf.read_ipv4()?;
            let adv_rtr = buf.read_ipv4()?;
            entries.push(LsRequestEntry {
                lsa_type,
                lsa_id,
                adv_rtr,
            });
        }

        Ok(LsRequest { entries })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        for entry in &self.entries {
            buf.put_u16(0);
            buf.put_u16(entry.lsa_type.0);
            buf.put_ipv4(&entry.lsa_id);
            buf.put_ipv4(&entry.adv_rtr);
        }
    }
}

// ===== impl LsUpdate =====

impl LsUpdate {
    pub const BASE_LENGTH: u16 = 4;

    pub fn decode(buf: &mut Bytes, ctx: &mut DecodeCtx) -> DecodeResult<Self> {
        let lsa_count = buf.read_u32()?;

        // Parse list of LSAs.
        let lsas = decode_lsa_stream(buf, ctx)?;
        if lsas.len() != lsa_count as usize {
            ctx.anomaly(Anomaly::CountMismatch {
                declared: lsa_count,
                decoded: lsas.len() as u32,
            });
        }

        Ok(LsUpdate { lsa_count, lsas })
    }
}

// ===== impl LsAck =====

impl LsAck {
    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        // Parse list of LSA headers.
        let lsa_hdrs = decode_lsa_hdrs(buf)?;

        Ok(LsAck { lsa_hdrs })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        for lsa_hdr in &self.lsa_hdrs {
            lsa_hdr.encode(buf);
        }
    }
}

// ===== impl MessageBody =====

impl MessageBody {
    pub fn decode(
        pkt_type: PacketType,
        buf: &mut Bytes,
        ctx: &mut DecodeCtx,
    ) -> DecodeResult<Self> {
        let body = match pkt_type {
            PacketType::Hello => MessageBody::Hello(Hello::decode(buf)?),
            PacketType::DbDesc => MessageBody::DbDesc(DbDesc::decode(buf)?),
            PacketType::LsRequest => {
                MessageBody::LsRequest(LsRequest::decode(buf)?)
            }
            PacketType::LsUpdate => {
                MessageBody::LsUpdate(LsUpdate::decode(buf, ctx)?)
            }
            PacketType::LsAck => MessageBody::LsAck(LsAck::decode(buf)?),
        };

        Ok(body)
    }

    // Encodes the packet body. Link State Updates can't be encoded.
    pub fn encode(&self, buf: &mut BytesMut) -> Option<()> {
        match self {
            MessageBody::Hello(hello) => hello.encode(buf),
            MessageBody::DbDesc(dbdesc) => dbdesc.encode(buf),
            MessageBody::LsRequest(lsreq) => lsreq.encode(buf),
            MessageBody::LsUpdate(_) => return None,
            MessageBody::LsAck(lsack) => lsack.encode(buf),
        }

        Some(())
    }

    pub fn packet_type(&self) -> PacketType {
        match self {
            MessageBody::Hello(_) => PacketType::Hello,
            MessageBody::DbDesc(_) => PacketType::DbDesc,
            MessageBody::LsRequest(_) => PacketType::LsRequest,
            MessageBody::LsUpdate(_) => PacketType::LsUpdate,
            MessageBody::LsAck(_) => PacketType::LsAck,
        }
    }
}

// ===== impl DecodedMessage =====

impl DecodedMessage {
    // Decodes an OSPFv3 packet from a bytes buffer.
    //
    // Exactly the number of bytes declared in the packet header is decoded.
    // Anything after that (e.g. an LLS data block or an authentication
    // trailer) is left in the buffer.
    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let hdr = PacketHdr::decode(buf)?;
        if hdr.version != PacketHdr::VERSION {
            return Err(DecodeError::InvalidVersion(hdr.version));
        }
        let pkt_type = hdr
            .packet_type()
            .ok_or(DecodeError::UnknownMessageType(hdr.pkt_type))?;
        if hdr.length < PacketHdr::LENGTH {
            return Err(DecodeError::InvalidLength(hdr.length));
        }

        // Decode the packet body.
        let body_len = (hdr.length - PacketHdr::LENGTH) as usize;
        let mut buf_body = buf.read_bytes(body_len)?;
        let mut ctx = DecodeCtx::default();
        let body = MessageBody::decode(pkt_type, &mut buf_body, &mut ctx)?;
        if buf_body.has_remaining() {
            ctx.anomaly(Anomaly::TrailingMessageBytes(
                pkt_type,
                buf_body.remaining(),
            ));
        }

        Ok(DecodedMessage {
            hdr,
            body,
            anomalies: ctx.anomalies,
        })
    }

    // Encodes the packet, recomputing the length field of the header.
    pub fn encode(&self) -> Option<Bytes> {
        TLS_BUF.with(|buf| {
            let mut buf = buf.borrow_mut();
            buf.clear();
            self.hdr.encode(&mut buf);
            self.body.encode(&mut buf)?;

            // Initialize packet length.
            let pkt_len = buf.len() as u16;
            buf[2..4].copy_from_slice(&pkt_len.to_be_bytes());

            Some(buf.clone().freeze())
        })
    }
}

// ===== impl DecodeCtx =====

impl DecodeCtx {
    pub(crate) fn anomaly(&mut self, anomaly: Anomaly) {
        Debug::Anomaly(&anomaly).log();
        self.anomalies.push(anomaly);
    }
}

// ===== global functions =====

// Decodes an OSPFv3 packet from a borrowed byte slice.
//
// The decoded message owns all of its data and holds no reference into
// `data`.
pub fn decode_message(data: &[u8]) -> DecodeResult<DecodedMessage> {
    let mut buf = Bytes::copy_from_slice(data);
    DecodedMessage::decode(&mut buf)
}

// ===== helper functions =====

fn decode_lsa_hdrs(buf: &mut Bytes) -> DecodeResult<Vec<LsaHdr>> {
    let mut lsa_hdrs = vec![];
    let lsa_hdrs_cnt = buf.remaining() / LsaHdr::LENGTH as usize;
    for _ in 0..lsa_hdrs_cnt {
        let lsa_hdr = LsaHdr::decode(buf)?;
        lsa_hdrs.push(lsa_hdr);
    }

    Ok(lsa_hdrs)
}
