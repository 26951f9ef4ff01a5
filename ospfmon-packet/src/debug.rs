//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span};

use crate::packet::DecodedMessage;
use crate::packet::error::{Anomaly, DecodeError};
use crate::packet::lsa::{LsaHdr, LsaType};

// Decoder debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    // Packets
    PacketRx(u64, &'a DecodedMessage),
    // LSAs
    LsaUnrecognized(LsaType),
    LsaMalformed(&'a LsaHdr, &'a DecodeError),
    // Anomalies
    Anomaly(&'a Anomaly),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub fn log(&self) {
        match self {
            Debug::PacketRx(seqno, msg) => {
                debug_span!("input").in_scope(|| {
                    let data = serde_json::to_string(msg).unwrap_or_default();
                    let router_id = msg.hdr.router_id;
                    debug!(%seqno, %router_id, %data, "{}", self);
                })
            }
            Debug::LsaUnrecognized(lsa_type) => {
                debug!(%lsa_type, "{}", self);
            }
            Debug::LsaMalformed(lsa_hdr, error) => {
                debug_span!("lsa", lsa_type = %lsa_hdr.lsa_type).in_scope(|| {
                    debug!(?lsa_hdr, %error, "{}", self);
                })
            }
            Debug::Anomaly(anomaly) => {
                debug!(?anomaly, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::PacketRx(..) => {
                write!(f, "packet")
            }
            Debug::LsaUnrecognized(..) => {
                write!(f, "skipping LSA of unrecognized type")
            }
            Debug::LsaMalformed(..) => {
                write!(f, "failed to decode LSA body")
            }
            Debug::Anomaly(anomaly) => {
                write!(f, "{}", anomaly)
            }
        }
    }
}
