//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::io::{self, BufRead};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Source of captured OSPFv3 packets.
pub trait PacketSource {
    // Returns the next captured packet, or `None` at the end of the input.
    fn receive(&mut self) -> io::Result<Option<Bytes>>;
}

// Capture file with one JSON record per line.
//
// Blank lines are ignored. Lines that can't be parsed are logged and
// skipped.
#[derive(Debug)]
pub struct RecordFile<R> {
    reader: R,
    line: Vec<u8>,
    lineno: u64,
}

// Captured packet as stored in a record file.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub data: Vec<u8>,
}

// ===== impl RecordFile =====

impl<R: BufRead> RecordFile<R> {
    pub fn new(reader: R) -> Self {
        RecordFile {
            reader,
            line: Vec::new(),
            lineno: 0,
        }
    }
}

impl<R: BufRead> PacketSource for RecordFile<R> {
    fn receive(&mut self) -> io::Result<Option<Bytes>> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.lineno += 1;

            let line = self.line.trim_ascii();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_slice::<Record>(line) {
                Ok(record) => return Ok(Some(Bytes::from(record.data))),
                Err(error) => {
                    warn!(lineno = %self.lineno, %error, "invalid capture record");
                }
            }
        }
    }
}

// ===== unit tests =====
