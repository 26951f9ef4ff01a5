//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod bytes;
pub mod debug;
pub mod field;
pub mod ip;
pub mod packet;
pub mod registry;

pub use packet::{DecodedMessage, decode_message};
