//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;
use std::sync::LazyLock as Lazy;

use serde::{Deserialize, Serialize};

// Code point domains known to the registry.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum Domain {
    MessageType,
    LsaType,
    AddressFamily,
    AuthType,
    RouterLinkType,
    OpaqueType,
    TeTlv,
    TeLinkSubTlv,
    GraceTlv,
    GraceReason,
}

// Result of a registry lookup.
//
// Unregistered code points are expected on the wire (vendor extensions,
// newer RFCs), so a miss is a regular outcome instead of an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookup<T> {
    Known(T),
    Unknown,
}

// Bidirectional code point table.
#[derive(Debug)]
pub struct Registry {
    names: BTreeMap<u32, &'static str>,
    codes: BTreeMap<&'static str, u32>,
}

// OSPFv3 packet types.
const MESSAGE_TYPES: &[(u32, &str)] = &[
    (1, "HELLO"),
    (2, "DBDESC"),
    (3, "LSREQ"),
    (4, "LSUPD"),
    (5, "LSACK"),
];

// OSPFv3 LSA types, including the flooding scope bits.
//
// IANA registry:
// https://www.iana.org/assignments/ospfv3-parameters/ospfv3-parameters.xhtml#ospfv3-parameters-3
const LSA_TYPES: &[(u32, &str)] = &[
    (0x2001, "ROUTER"),
    (0x2002, "NETWORK"),
    (0x2003, "INTER AREA PREFIX"),
    (0x2004, "INTER AREA ROUTER"),
    (0x4005, "EXTERNAL AS"),
    (0x2006, "GROUP MEMBER"),
    (0x2007, "NSSA"),
    (0x0008, "LINK LSA"),
    (0x2009, "INTRA AREA PREFIX"),
];

const ADDRESS_FAMILIES: &[(u32, &str)] = &[(1, "IP"), (2, "IP6")];

const AUTH_TYPES: &[(u32, &str)] = &[(0, "NULL"), (1, "PASSWD"), (2, "CRYPTO")];

const ROUTER_LINK_TYPES: &[(u32, &str)] =
    &[(1, "P2P"), (2, "TRANSIT"), (3, "STUB"), (4, "VIRTUAL")];

const OPAQUE_TYPES: &[(u32, &str)] =
    &[(1, "TRAFFIC ENGINEERING"), (3, "GRACEFUL RESTART")];

const TE_TLVS: &[(u32, &str)] = &[(1, "ROUTER ADDRESS"), (2, "LINK")];

const TE_LINK_SUBTLVS: &[(u32, &str)] = &[
    (1, "TYPE"),
    (2, "ID"),
    (3, "LOCAL IF"),
    (4, "REMOTE IF"),
    (5, "TE METRIC"),
    (6, "MAX BW"),
    (7, "MAX RSVBL BW"),
    (8, "UNRSVD BW"),
    (9, "ADMIN GROUP"),
];

const GRACE_TLVS: &[(u32, &str)] =
    &[(1, "PERIOD"), (2, "REASON"), (3, "IP ADDR")];

const GRACE_REASONS: &[(u32, &str)] = &[
    (0, "UNKNOWN"),
    (1, "SW RESTART"),
    (2, "SW RELOAD/UPGRADE"),
    (3, "SWITCH REDUNDANT RCP"),
];

static REGISTRIES: Lazy<BTreeMap<Domain, Registry>> = Lazy::new(|| {
    [
        (Domain::MessageType, MESSAGE_TYPES),
        (Domain::LsaType, LSA_TYPES),
        (Domain::AddressFamily, ADDRESS_FAMILIES),
        (Domain::AuthType, AUTH_TYPES),
        (Domain::RouterLinkType, ROUTER_LINK_TYPES),
        (Domain::OpaqueType, OPAQUE_TYPES),
        (Domain::TeTlv, TE_TLVS),
        (Domain::TeLinkSubTlv, TE_LINK_SUBTLVS),
        (Domain::GraceTlv, GRACE_TLVS),
        (Domain::GraceReason, GRACE_REASONS),
    ]
    .into_iter()
    .map(|(domain, entries)| (domain, Registry::new(entries)))
    .collect()
});

// ===== impl Registry =====

impl Registry {
    fn new(entries: &[(u32, &'static str)]) -> Registry {
        Registry {
            names: entries.iter().copied().collect(),
            codes: entries.iter().map(|(code, name)| (*name, *code)).collect(),
        }
    }

    pub fn code_to_name(&self, code: u32) -> Lookup<&'static str> {
        self.names.get(&code).copied().into()
    }

    pub fn name_to_code(&self, name: &str) -> Lookup<u32> {
        let name = name.to_ascii_uppercase();
        self.codes.get(name.as_str()).copied().into()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &'static str)> + '_ {
        self.names.iter().map(|(code, name)| (*code, *name))
    }
}

// ===== impl Lookup =====

impl<T> Lookup<T> {
    pub fn known(self) -> Option<T> {
        match self {
            Lookup::Known(value) => Some(value),
            Lookup::Unknown => None,
        }
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, Lookup::Known(_))
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Lookup<T> {
        match value {
            Some(value) => Lookup::Known(value),
            None => Lookup::Unknown,
        }
    }
}

// ===== global functions =====

pub fn registry(domain: Domain) -> &'static Registry {
    // Every domain is populated when the table is built.
    &REGISTRIES[&domain]
}

pub fn code_to_name(domain: Domain, code: u32) -> Lookup<&'static str> {
    registry(domain).code_to_name(code)
}

pub fn name_to_code(domain: Domain, name: &str) -> Lookup<u32> {
    registry(domain).name_to_code(name)
}

// ===== unit tests =====
