//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use ospfmon_packet::packet::DecodeCtx;
use ospfmon_packet::packet::lsa::decode_lsa_stream;

fuzz_target!(|data: &[u8]| {
    let mut bytes = Bytes::copy_from_slice(data);
    let mut ctx = DecodeCtx::default();
    let _ = decode_lsa_stream(&mut bytes, &mut ctx);
});
