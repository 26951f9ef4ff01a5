//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//
#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use ospfmon_packet::packet::DecodedMessage;

fuzz_target!(|data: &[u8]| {
    let mut bytes = Bytes::copy_from_slice(data);
    let _ = DecodedMessage::decode(&mut bytes);
});
