//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::LazyLock as Lazy;

use bytes::Bytes;
use const_addrs::{ip4, ip6};
use ipnetwork::Ipv6Network;
use ospfmon_packet::field::{Metric, MetricClass};
use ospfmon_packet::packet::error::{Anomaly, DecodeError};
use ospfmon_packet::packet::lsa::*;
use ospfmon_packet::packet::*;

//
// Helper functions.
//

fn test_encode_packet(bytes_expected: &[u8], msg: &DecodedMessage) {
    let bytes_actual = msg.encode().unwrap();
    assert_eq!(bytes_expected, bytes_actual.as_ref());
}

fn test_decode_packet(bytes: &[u8], msg_expected: &DecodedMessage) {
    let mut buf = Bytes::copy_from_slice(bytes);
    let msg_actual = DecodedMessage::decode(&mut buf).unwrap();
    assert_eq!(*msg_expected, msg_actual);
}

fn test_decode_lsa(bytes: &[u8], lsa_expected: &Lsa, anomalies: &[Anomaly]) {
    let mut buf = Bytes::copy_from_slice(bytes);
    let mut ctx = DecodeCtx::default();
    let lsa_actual = Lsa::decode(&mut buf, &mut ctx).unwrap();
    assert_eq!(*lsa_expected, lsa_actual);
    assert_eq!(anomalies, ctx.anomalies.as_slice());
    assert!(buf.is_empty());
}

fn prefix(addr: &str, plen: u8) -> Ipv6Network {
    Ipv6Network::new(addr.parse().unwrap(), plen).unwrap()
}

//
// Test packets.
//

static HELLO1: Lazy<(Vec<u8>, DecodedMessage)> = Lazy::new(|| {
    (
        vec![
            0x03, 0x01, 0x00, 0x28, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x01, 0x00,
            0x00, 0x13, 0x00, 0x03, 0x00, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02,
        ],
        DecodedMessage {
            hdr: PacketHdr {
                version: 3,
                pkt_type: PacketType::Hello as u8,
                length: 40,
                router_id: ip4!("1.1.1.1"),
                area_id: ip4!("0.0.0.1"),
                cksum: 0,
                instance_id: 0,
            },
            body: MessageBody::Hello(Hello {
                iface_id: 4,
                priority: 1,
                options: Options::R | Options::E | Options::V6,
                hello_interval: 3,
                dead_interval: 36,
                dr: ip4!("0.0.0.0"),
                bdr: ip4!("0.0.0.0"),
                neighbors: vec![ip4!("2.2.2.2")],
            }),
            anomalies: vec![],
        },
    )
});

static DBDESCR1: Lazy<(Vec<u8>, DecodedMessage)> = Lazy::new(|| {
    (
        vec![
            0x03, 0x02, 0x00, 0x1c, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x13, 0x05, 0xdc,
            0x00, 0x07, 0x00, 0x01, 0x6f, 0x10,
        ],
        DecodedMessage {
            hdr: PacketHdr {
                version: 3,
                pkt_type: PacketType::DbDesc as u8,
                length: 28,
                router_id: ip4!("1.1.1.1"),
                area_id: ip4!("0.0.0.1"),
                cksum: 0,
                instance_id: 0,
            },
            body: MessageBody::DbDesc(DbDesc {
                options: Options::R | Options::E | Options::V6,
                mtu: 1500,
                dd_flags: DbDescFlags::I | DbDescFlags::M | DbDescFlags::MS,
                dd_seq_no: 93968,
                lsa_hdrs: vec![],
            }),
            anomalies: vec![],
        },
    )
});

static DBDESCR2: Lazy<(Vec<u8>, DecodedMessage)> = Lazy::new(|| {
    (
        vec![
            0x03, 0x02, 0x00, 0x58, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x13, 0x05, 0xdc,
            0x00, 0x01, 0x00, 0x01, 0x6f, 0x11, 0x00, 0x04, 0x00, 0x08, 0x00,
            0x00, 0x00, 0x03, 0x02, 0x02, 0x02, 0x02, 0x80, 0x00, 0x00, 0x01,
            0x16, 0x3a, 0x00, 0x2c, 0x00, 0x04, 0x20, 0x01, 0x00, 0x00, 0x00,
            0x00, 0x02, 0x02, 0x02, 0x02, 0x80, 0x00, 0x00, 0x01, 0xf4, 0x34,
            0x00, 0x18, 0x00, 0x04, 0x20, 0x03, 0x00, 0x00, 0x00, 0x01, 0x02,
            0x02, 0x02, 0x02, 0x80, 0x00, 0x00, 0x01, 0x97, 0x0b, 0x00, 0x2c,
        ],
        DecodedMessage {
            hdr: PacketHdr {
                version: 3,
                pkt_type: PacketType::DbDesc as u8,
                length: 88,
                router_id: ip4!("2.2.2.2"),
                area_id: ip4!("0.0.0.1"),
                cksum: 0,
                instance_id: 0,
            },
            body: MessageBody::DbDesc(DbDesc {
                options: Options::R | Options::E | Options::V6,
                mtu: 1500,
                dd_flags: DbDescFlags::MS,
                dd_seq_no: 93969,
                lsa_hdrs: vec![
                    LsaHdr {
                        age: 4,
                        lsa_type: LsaType(0x0008),
                        lsa_id: ip4!("0.0.0.3"),
                        adv_rtr: ip4!("2.2.2.2"),
                        seq_no: 0x80000001,
                        cksum: 0x163a,
                        length: 44,
                    },
                    LsaHdr {
                        age: 4,
                        lsa_type: LsaType(0x2001),
                        lsa_id: ip4!("0.0.0.0"),
                        adv_rtr: ip4!("2.2.2.2"),
                        seq_no: 0x80000001,
                        cksum: 0xf434,
                        length: 24,
                    },
                    LsaHdr {
                        age: 4,
                        lsa_type: LsaType(0x2003),
                        lsa_id: ip4!("0.0.0.1"),
                        adv_rtr: ip4!("2.2.2.2"),
                        seq_no: 0x80000001,
                        cksum: 0x970b,
                        length: 44,
                    },
                ],
            }),
            anomalies: vec![],
        },
    )
});

static LSREQUEST1: Lazy<(Vec<u8>, DecodedMessage)> = Lazy::new(|| {
    (
        vec![
            0x03, 0x03, 0x00, 0x40, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00,
            0x00, 0x04, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x20, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x20, 0x09,
            0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x40,
            0x05, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x01,
        ],
        DecodedMessage {
            hdr: PacketHdr {
                version: 3,
                pkt_type: PacketType::LsRequest as u8,
                length: 64,
                router_id: ip4!("2.2.2.2"),
                area_id: ip4!("0.0.0.1"),
                cksum: 0,
                instance_id: 0,
            },
            body: MessageBody::LsRequest(LsRequest {
                entries: vec![
                    LsRequestEntry {
                        lsa_type: LsaType(0x0008),
                        lsa_id: ip4!("0.0.0.4"),
                        adv_rtr: ip4!("1.1.1.1"),
                    },
                    LsRequestEntry {
                        lsa_type: LsaType(0x2001),
                        lsa_id: ip4!("0.0.0.0"),
                        adv_rtr: ip4!("1.1.1.1"),
                    },
                    LsRequestEntry {
                        lsa_type: LsaType(0x2009),
                        lsa_id: ip4!("0.0.0.0"),
                        adv_rtr: ip4!("1.1.1.1"),
                    },
                    LsRequestEntry {
                        lsa_type: LsaType(0x4005),
                        lsa_id: ip4!("0.0.0.1"),
                        adv_rtr: ip4!("1.1.1.1"),
                    },
                ],
            }),
            anomalies: vec![],
        },
    )
});

static LSUPDATE1: Lazy<(Vec<u8>, DecodedMessage)> = Lazy::new(|| {
    (
        vec![
            0x03, 0x04, 0x00, 0x84, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x04,
            0x00, 0x08, 0x00, 0x00, 0x00, 0x03, 0x02, 0x02, 0x02, 0x02, 0x80,
            0x00, 0x00, 0x01, 0x16, 0x3a, 0x00, 0x2c, 0x01, 0x00, 0x00, 0x13,
            0xfe, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xcc, 0x81, 0x6e,
            0xff, 0xfe, 0xa8, 0x26, 0xd0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04,
            0x20, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02, 0x80,
            0x00, 0x00, 0x01, 0xf4, 0x34, 0x00, 0x18, 0x01, 0x00, 0x00, 0x13,
            0x00, 0x04, 0x20, 0x03, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x02,
            0x02, 0x80, 0x00, 0x00, 0x01, 0x97, 0x0b, 0x00, 0x2c, 0x00, 0x00,
            0x00, 0x0a, 0x80, 0x00, 0x00, 0x00, 0x20, 0x01, 0x0d, 0xb8, 0x10,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
        ],
        DecodedMessage {
            hdr: PacketHdr {
                version: 3,
                pkt_type: PacketType::LsUpdate as u8,
                length: 132,
                router_id: ip4!("2.2.2.2"),
                area_id: ip4!("0.0.0.1"),
                cksum: 0,
                instance_id: 0,
            },
            body: MessageBody::LsUpdate(LsUpdate {
                lsa_count: 3,
                lsas: vec![
                    Lsa::new(
                        LsaHdr::new(
                            4,
                            LsaType(0x0008),
                            ip4!("0.0.0.3"),
                            ip4!("2.2.2.2"),
                            0x80000001,
                            0x163a,
                            44,
                        ),
                        LsaBody::Link(LsaLink {
                            priority: 1,
                            options: Options::R | Options::E | Options::V6,
                            linklocal: ip6!("fe80::cc81:6eff:fea8:26d0"),
                            prefix_count: 0,
                            prefixes: vec![],
                        }),
                    ),
                    Lsa::new(
                        LsaHdr::new(
                            4,
                            LsaType(0x2001),
                            ip4!("0.0.0.0"),
                            ip4!("2.2.2.2"),
                            0x80000001,
                            0xf434,
                            24,
                        ),
                        LsaBody::Router(LsaRouter {
                            flags: LsaRouterFlags::B,
                            options: Options::R | Options::E | Options::V6,
                            links: vec![],
                        }),
                    ),
                    Lsa::new(
                        LsaHdr::new(
                            4,
                            LsaType(0x2003),
                            ip4!("0.0.0.1"),
                            ip4!("2.2.2.2"),
                            0x80000001,
                            0x970b,
                            44,
                        ),
                        LsaBody::InterAreaPrefix(LsaInterAreaPrefix {
                            metric: Metric(10),
                            prefix_options: PrefixOptions::empty(),
                            prefix: prefix("2001:db8:1000::2", 128),
                        }),
                    ),
                ],
            }),
            anomalies: vec![],
        },
    )
});

static LSUPDATE2: Lazy<(Vec<u8>, DecodedMessage)> = Lazy::new(|| {
    (
        vec![
            0x03, 0x04, 0x00, 0x70, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x04,
            0x20, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02, 0x80,
            0x00, 0x00, 0x01, 0xf4, 0x34, 0x00, 0x18, 0x01, 0x00, 0x00, 0x13,
            0x00, 0x04, 0x20, 0x20, 0x00, 0x00, 0x00, 0x07, 0x02, 0x02, 0x02,
            0x02, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x1c, 0xde, 0xad,
            0xbe, 0xef, 0x01, 0x02, 0x03, 0x04, 0x00, 0x04, 0x20, 0x01, 0x00,
            0x00, 0x00, 0x01, 0x03, 0x03, 0x03, 0x03, 0x80, 0x00, 0x00, 0x02,
            0x12, 0x34, 0x00, 0x28, 0x00, 0x00, 0x00, 0x13, 0x01, 0x00, 0x00,
            0x0a, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x05, 0x02, 0x02,
            0x02, 0x02,
        ],
        DecodedMessage {
            hdr: PacketHdr {
                version: 3,
                pkt_type: PacketType::LsUpdate as u8,
                length: 112,
                router_id: ip4!("2.2.2.2"),
                area_id: ip4!("0.0.0.1"),
                cksum: 0,
                instance_id: 0,
            },
            body: MessageBody::LsUpdate(LsUpdate {
                lsa_count: 3,
                lsas: vec![
                    Lsa::new(
                        LsaHdr::new(
                            4,
                            LsaType(0x2001),
                            ip4!("0.0.0.0"),
                            ip4!("2.2.2.2"),
                            0x80000001,
                            0xf434,
                            24,
                        ),
                        LsaBody::Router(LsaRouter {
                            flags: LsaRouterFlags::B,
                            options: Options::R | Options::E | Options::V6,
                            links: vec![],
                        }),
                    ),
                    Lsa::new(
                        LsaHdr::new(
                            4,
                            LsaType(0x2020),
                            ip4!("0.0.0.7"),
                            ip4!("2.2.2.2"),
                            0x80000001,
                            0x0000,
                            28,
                        ),
                        LsaBody::Unrecognized(LsaUnrecognized {
                            raw: Bytes::from_static(&[
                                0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04,
                            ]),
                        }),
                    ),
                    Lsa::new(
                        LsaHdr::new(
                            4,
                            LsaType(0x2001),
                            ip4!("0.0.0.1"),
                            ip4!("3.3.3.3"),
                            0x80000002,
                            0x1234,
                            40,
                        ),
                        LsaBody::Router(LsaRouter {
                            flags: LsaRouterFlags::empty(),
                            options: Options::R | Options::E | Options::V6,
                            links: vec![LsaRouterLink {
                                link_type: LsaRouterLinkType(1),
                                metric: 10,
                                iface_id: 4,
                                nbr_iface_id: 5,
                                nbr_router_id: ip4!("2.2.2.2"),
                            }],
                        }),
                    ),
                ],
            }),
            anomalies: vec![],
        },
    )
});

static LSACK1: Lazy<(Vec<u8>, DecodedMessage)> = Lazy::new(|| {
    (
        vec![
            0x03, 0x05, 0x00, 0x60, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0x00, 0x08, 0x00, 0x00,
            0x00, 0x04, 0x01, 0x01, 0x01, 0x01, 0x80, 0x00, 0x00, 0x01, 0x77,
            0x58, 0x00, 0x2c, 0x00, 0x08, 0x20, 0x01, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x01, 0x01, 0x01, 0x80, 0x00, 0x00, 0x01, 0x16, 0x16, 0x00,
            0x18, 0x00, 0x08, 0x20, 0x09, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01,
            0x01, 0x01, 0x80, 0x00, 0x00, 0x01, 0x7a, 0xf9, 0x00, 0x34, 0x00,
            0x08, 0x40, 0x05, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x01,
            0x80, 0x00, 0x00, 0x01, 0xe5, 0x91, 0x00, 0x2c,
        ],
        DecodedMessage {
            hdr: PacketHdr {
                version: 3,
                pkt_type: PacketType::LsAck as u8,
                length: 96,
                router_id: ip4!("2.2.2.2"),
                area_id: ip4!("0.0.0.1"),
                cksum: 0,
                instance_id: 0,
            },
            body: MessageBody::LsAck(LsAck {
                lsa_hdrs: vec![
                    LsaHdr {
                        age: 7,
                        lsa_type: LsaType(0x0008),
                        lsa_id: ip4!("0.0.0.4"),
                        adv_rtr: ip4!("1.1.1.1"),
                        seq_no: 0x80000001,
                        cksum: 0x7758,
                        length: 44,
                    },
                    LsaHdr {
                        age: 8,
                        lsa_type: LsaType(0x2001),
                        lsa_id: ip4!("0.0.0.0"),
                        adv_rtr: ip4!("1.1.1.1"),
                        seq_no: 0x80000001,
                        cksum: 0x1616,
                        length: 24,
                    },
                    LsaHdr {
                        age: 8,
                        lsa_type: LsaType(0x2009),
                        lsa_id: ip4!("0.0.0.0"),
                        adv_rtr: ip4!("1.1.1.1"),
                        seq_no: 0x80000001,
                        cksum: 0x7af9,
                        length: 52,
                    },
                    LsaHdr {
                        age: 8,
                        lsa_type: LsaType(0x4005),
                        lsa_id: ip4!("0.0.0.1"),
                        adv_rtr: ip4!("1.1.1.1"),
                        seq_no: 0x80000001,
                        cksum: 0xe591,
                        length: 44,
                    },
                ],
            }),
            anomalies: vec![],
        },
    )
});

//
// Test LSAs.
//

static LSA1: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x0a, 0x20, 0x09, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02,
            0x02, 0x80, 0x00, 0x00, 0x03, 0xe0, 0xed, 0x00, 0x28, 0x00, 0x01,
            0x20, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02, 0x20,
            0x02, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02,
        ],
        Lsa::new(
            LsaHdr::new(
                10,
                LsaType(0x2009),
                ip4!("0.0.0.0"),
                ip4!("2.2.2.2"),
                0x80000003,
                0xe0ed,
                40,
            ),
            LsaBody::IntraAreaPrefix(LsaIntraAreaPrefix {
                prefix_count: 1,
                ref_lsa_type: LsaType(0x2001),
                ref_lsa_id: ip4!("0.0.0.0"),
                ref_adv_rtr: ip4!("2.2.2.2"),
                prefixes: vec![LsaIntraAreaPrefixEntry {
                    options: PrefixOptions::LA,
                    value: prefix("202:202::", 32),
                    metric: 0,
                }],
            }),
        ),
    )
});

static LSA2: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x20, 0x02, 0x00, 0x00, 0x00, 0x04, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x22, 0x00, 0x00,
            0x00, 0x13, 0x01, 0x01, 0x01, 0x01, 0x02, 0x02, 0x02, 0x02, 0xff,
            0xff,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x2002),
                ip4!("0.0.0.4"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                34,
            ),
            LsaBody::Network(LsaNetwork {
                options: Options::R | Options::E | Options::V6,
                attached_rtrs: vec![ip4!("1.1.1.1"), ip4!("2.2.2.2")],
            }),
        ),
    )
});

static LSA3: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x40, 0x05, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x38, 0x07, 0x00,
            0x00, 0x14, 0x40, 0x00, 0x00, 0x00, 0x20, 0x01, 0x0d, 0xb8, 0x00,
            0x01, 0x00, 0x00, 0xfe, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x64,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x4005),
                ip4!("0.0.0.1"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                56,
            ),
            LsaBody::AsExternal(LsaAsExternal {
                flags: LsaAsExternalFlags::E
                    | LsaAsExternalFlags::F
                    | LsaAsExternalFlags::T,
                metric: Metric(20),
                prefix_options: PrefixOptions::empty(),
                prefix: prefix("2001:db8:1::", 64),
                fwd_addr: Some(ip6!("fe80::1")),
                tag: Some(100),
                ref_lsa_type: None,
                ref_lsa_id: None,
            }),
        ),
    )
});

static LSA4: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x20, 0x03, 0x00, 0x00, 0x00, 0x02, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x1c, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x2003),
                ip4!("0.0.0.2"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                28,
            ),
            LsaBody::InterAreaPrefix(LsaInterAreaPrefix {
                metric: Metric(0x010000),
                prefix_options: PrefixOptions::empty(),
                prefix: prefix("::", 0),
            }),
        ),
    )
});

static LSA5: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x20, 0x03, 0x00, 0x00, 0x00, 0x03, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x1c, 0x00, 0x00,
            0x00, 0x0a, 0x81, 0x00, 0x00, 0x00,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x2003),
                ip4!("0.0.0.3"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                28,
            ),
            LsaBody::Malformed(LsaMalformed {
                error: DecodeError::InvalidPrefixLength(129),
                raw: Bytes::from_static(&[
                    0x00, 0x00, 0x00, 0x0a, 0x81, 0x00, 0x00, 0x00,
                ]),
            }),
        ),
    )
});

static LSA6: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x00, 0x08, 0x00, 0x00, 0x00, 0x04, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3c, 0x01, 0x00,
            0x00, 0x13, 0xfe, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02,
            0x40, 0x00, 0x00, 0x00, 0x20, 0x01, 0x0d, 0xb8, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x0008),
                ip4!("0.0.0.4"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                60,
            ),
            LsaBody::Link(LsaLink {
                priority: 1,
                options: Options::R | Options::E | Options::V6,
                linklocal: ip6!("fe80::1"),
                prefix_count: 2,
                prefixes: vec![
                    LsaLinkPrefix {
                        options: PrefixOptions::empty(),
                        value: prefix("2001:db8:1::", 64),
                    },
                    LsaLinkPrefix {
                        options: PrefixOptions::empty(),
                        value: prefix("::", 0),
                    },
                ],
            }),
        ),
    )
});

static LSA7: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x20, 0x04, 0x00, 0x00, 0x00, 0x05, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00,
            0x00, 0x13, 0x00, 0x00, 0x00, 0x0a, 0x03, 0x03, 0x03, 0x03,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x2004),
                ip4!("0.0.0.5"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                32,
            ),
            LsaBody::InterAreaRouter(LsaInterAreaRouter {
                options: Options::R | Options::E | Options::V6,
                metric: Metric(10),
                router_id: ip4!("3.3.3.3"),
            }),
        ),
    )
});

static LSA8: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x20, 0x07, 0x00, 0x00, 0x00, 0x06, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x24, 0x00, 0x00,
            0x00, 0x14, 0x30, 0x08, 0x00, 0x00, 0x20, 0x01, 0x0d, 0xb8, 0x00,
            0x02, 0x00, 0x00,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x2007),
                ip4!("0.0.0.6"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                36,
            ),
            LsaBody::Nssa(LsaAsExternal {
                flags: LsaAsExternalFlags::empty(),
                metric: Metric(20),
                prefix_options: PrefixOptions::P,
                prefix: prefix("2001:db8:2::", 48),
                fwd_addr: None,
                tag: None,
                ref_lsa_type: None,
                ref_lsa_id: None,
            }),
        ),
    )
});

static LSA9: Lazy<(Vec<u8>, Lsa)> = Lazy::new(|| {
    (
        vec![
            0x00, 0x01, 0x20, 0x03, 0x00, 0x00, 0x00, 0x07, 0x01, 0x01, 0x01,
            0x01, 0x80, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x1c, 0x00, 0xff,
            0xff, 0xff, 0x00, 0x00, 0x00, 0x00,
        ],
        Lsa::new(
            LsaHdr::new(
                1,
                LsaType(0x2003),
                ip4!("0.0.0.7"),
                ip4!("1.1.1.1"),
                0x80000001,
                0x0000,
                28,
            ),
            LsaBody::InterAreaPrefix(LsaInterAreaPrefix {
                metric: Metric(0xffffff),
                prefix_options: PrefixOptions::empty(),
                prefix: prefix("::", 0),
            }),
        ),
    )
});

//
// Tests.
//

#[test]
fn test_encode_hello1() {
    let (ref bytes, ref msg) = *HELLO1;
    test_encode_packet(bytes, msg);
}

#[test]
fn test_decode_hello1() {
    let (ref bytes, ref msg) = *HELLO1;
    test_decode_packet(bytes, msg);
}

#[test]
fn test_encode_dbdescr1() {
    let (ref bytes, ref msg) = *DBDESCR1;
    test_encode_packet(bytes, msg);
}

#[test]
fn test_decode_dbdescr1() {
    let (ref bytes, ref msg) = *DBDESCR1;
    test_decode_packet(bytes, msg);
}

#[test]
fn test_encode_dbdescr2() {
    let (ref bytes, ref msg) = *DBDESCR2;
    test_encode_packet(bytes, msg);
}

#[test]
fn test_decode_dbdescr2() {
    let (ref bytes, ref msg) = *DBDESCR2;
    test_decode_packet(bytes, msg);
}

#[test]
fn test_encode_lsrequest1() {
    let (ref bytes, ref msg) = *LSREQUEST1;
    test_encode_packet(bytes, msg);
}

#[test]
fn test_decode_lsrequest1() {
    let (ref bytes, ref msg) = *LSREQUEST1;
    test_decode_packet(bytes, msg);
}

#[test]
fn test_decode_lsupdate1() {
    let (ref bytes, ref msg) = *LSUPDATE1;
    test_decode_packet(bytes, msg);
}

#[test]
fn test_encode_lsupdate1() {
    let (_, ref msg) = *LSUPDATE1;
    assert!(msg.encode().is_none());
}

#[test]
fn test_decode_lsupdate2() {
    let (ref bytes, ref msg) = *LSUPDATE2;
    test_decode_packet(bytes, msg);
}

#[test]
fn test_encode_lsack1() {
    let (ref bytes, ref msg) = *LSACK1;
    test_encode_packet(bytes, msg);
}

#[test]
fn test_decode_lsack1() {
    let (ref bytes, ref msg) = *LSACK1;
    test_decode_packet(bytes, msg);
}

#[test]
fn test_decode_lsa1() {
    let (ref bytes, ref lsa) = *LSA1;
    test_decode_lsa(bytes, lsa, &[]);
}

#[test]
fn test_decode_lsa2() {
    let (ref bytes, ref lsa) = *LSA2;
    test_decode_lsa(
        bytes,
        lsa,
        &[Anomaly::TrailingLsaBytes(LsaType(0x2002), 2)],
    );
}

#[test]
fn test_decode_lsa3() {
    let (ref bytes, ref lsa) = *LSA3;
    test_decode_lsa(bytes, lsa, &[]);
}

#[test]
fn test_decode_lsa4() {
    let (ref bytes, ref lsa) = *LSA4;
    test_decode_lsa(
        bytes,
        lsa,
        &[Anomaly::MetricAboveInfinity(
            LsaType(0x2003),
            Metric(0x010000),
        )],
    );
}

#[test]
fn test_decode_lsa5() {
    let (ref bytes, ref lsa) = *LSA5;
    test_decode_lsa(bytes, lsa, &[]);
}

#[test]
fn test_decode_lsa6() {
    let (ref bytes, ref lsa) = *LSA6;
    test_decode_lsa(bytes, lsa, &[]);
}

#[test]
fn test_decode_lsa7() {
    let (ref bytes, ref lsa) = *LSA7;
    test_decode_lsa(bytes, lsa, &[]);
}

#[test]
fn test_decode_lsa8() {
    let (ref bytes, ref lsa) = *LSA8;
    test_decode_lsa(bytes, lsa, &[]);
}

#[test]
fn test_decode_lsa9() {
    let (ref bytes, ref lsa) = *LSA9;
    test_decode_lsa(bytes, lsa, &[]);
    assert_eq!(Metric(0xffffff).class(), MetricClass::StubRouter);
}

#[test]
fn test_decode_lsa_invalid_length() {
    let (ref bytes, _) = *LSA1;
    let mut bytes = bytes.clone();
    bytes[19] = 0x08;

    let mut buf = Bytes::from(bytes);
    let mut ctx = DecodeCtx::default();
    assert_eq!(
        Lsa::decode(&mut buf, &mut ctx),
        Err(DecodeError::InvalidLsaLength(8))
    );
}

#[test]
fn test_decode_lsa_truncated() {
    let (ref bytes, _) = *LSA1;
    let mut buf = Bytes::copy_from_slice(&bytes[..30]);
    let mut ctx = DecodeCtx::default();
    assert_eq!(
        Lsa::decode(&mut buf, &mut ctx),
        Err(DecodeError::TruncatedBuffer {
            expected: 20,
            remaining: 10,
        })
    );
}

#[test]
fn test_decode_lsupdate_count_mismatch() {
    let (ref bytes, ref msg) = *LSUPDATE1;
    let mut bytes = bytes.clone();
    bytes[19] = 0x05;

    let msg_actual = decode_message(&bytes).unwrap();
    let lsupd = msg_actual.body.as_ls_update().unwrap();
    assert_eq!(lsupd.lsa_count, 5);
    assert_eq!(msg.body.as_ls_update().unwrap().lsas, lsupd.lsas);
    assert_eq!(
        msg_actual.anomalies,
        vec![Anomaly::CountMismatch {
            declared: 5,
            decoded: 3,
        }]
    );
}

#[test]
fn test_decode_trailing_message_bytes() {
    let (ref bytes, ref msg) = *HELLO1;
    let mut bytes = bytes.clone();
    bytes[3] = 0x2a;
    bytes.extend([0xaa, 0xbb]);

    let msg_actual = decode_message(&bytes).unwrap();
    assert_eq!(msg.body, msg_actual.body);
    assert_eq!(
        msg_actual.anomalies,
        vec![Anomaly::TrailingMessageBytes(PacketType::Hello, 2)]
    );
}

#[test]
fn test_decode_beyond_declared_length() {
    let (ref bytes, ref msg) = *HELLO1;
    let mut bytes = bytes.clone();
    bytes.extend([0x00, 0x00, 0x00, 0x00]);

    let mut buf = Bytes::from(bytes);
    let msg_actual = DecodedMessage::decode(&mut buf).unwrap();
    assert_eq!(*msg, msg_actual);
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_decode_truncated_hdr() {
    let (ref bytes, _) = *HELLO1;
    assert_eq!(
        decode_message(&bytes[..10]),
        Err(DecodeError::TruncatedBuffer {
            expected: 16,
            remaining: 10,
        })
    );
}

#[test]
fn test_decode_truncated_hdr_consumes_nothing() {
    let (ref bytes, _) = *HELLO1;
    let mut buf = Bytes::copy_from_slice(&bytes[..15]);
    assert!(PacketHdr::decode(&mut buf).is_err());
    assert_eq!(buf.as_ref(), &bytes[..15]);

    let mut buf = Bytes::copy_from_slice(&bytes[..19]);
    assert!(LsaHdr::decode(&mut buf).is_err());
    assert_eq!(buf.len(), 19);
}

#[test]
fn test_decode_truncated_body() {
    let (ref bytes, _) = *HELLO1;
    assert_eq!(
        decode_message(&bytes[..30]),
        Err(DecodeError::TruncatedBuffer {
            expected: 24,
            remaining: 14,
        })
    );
}

#[test]
fn test_decode_unknown_message_type() {
    let (ref bytes, _) = *HELLO1;
    let mut bytes = bytes.clone();
    bytes[1] = 0x06;
    assert_eq!(
        decode_message(&bytes),
        Err(DecodeError::UnknownMessageType(6))
    );
}

#[test]
fn test_decode_invalid_version() {
    let (ref bytes, _) = *HELLO1;
    let mut bytes = bytes.clone();
    bytes[0] = 0x02;
    assert_eq!(decode_message(&bytes), Err(DecodeError::InvalidVersion(2)));
}

#[test]
fn test_decode_invalid_length() {
    let (ref bytes, _) = *HELLO1;
    let mut bytes = bytes.clone();
    bytes[3] = 0x08;
    assert_eq!(decode_message(&bytes), Err(DecodeError::InvalidLength(8)));
}

#[test]
fn test_dbdesc_flags() {
    let flags = DbDescFlags::from_bits_retain(0b101);
    assert!(flags.init());
    assert!(!flags.more());
    assert!(flags.master());

    let (_, ref msg) = *DBDESCR2;
    let flags = msg.body.as_db_desc().unwrap().dd_flags;
    assert!(!flags.init());
    assert!(!flags.more());
    assert!(flags.master());
}

#[test]
fn test_router_flags() {
    let flags = LsaRouterFlags::from_bits_retain(0x01);
    assert!(flags.is_abr());
    assert!(!flags.is_virtual_link_endpoint());

    let flags = LsaRouterFlags::from_bits_retain(0x04);
    assert!(flags.is_virtual_link_endpoint());
    assert!(!flags.is_abr());

    let flags = LsaRouterFlags::from_bits_retain(0x12);
    assert!(flags.is_asbr());
    assert!(flags.contains(LsaRouterFlags::NT));
}

#[test]
fn test_options_unknown_bits() {
    let (ref bytes, _) = *HELLO1;
    let mut bytes = bytes.clone();
    bytes[21] = 0x80;

    let msg = decode_message(&bytes).unwrap();
    let options = msg.body.as_hello().unwrap().options;
    assert_eq!(options.bits(), 0x800013);
    assert!(options.contains(Options::R | Options::E | Options::V6));
}

#[test]
fn test_lsa_type_names() {
    assert_eq!(LsaType(0x2001).to_string(), "ROUTER");
    assert_eq!(LsaType(0x0008).to_string(), "LINK LSA");
    assert_eq!(LsaType(0x2020).to_string(), "0x2020");
    assert_eq!(LsaType(0x4005).code(), Some(LsaTypeCode::AsExternal));
    assert_eq!(PacketType::LsUpdate.to_string(), "LSUPD");
}
