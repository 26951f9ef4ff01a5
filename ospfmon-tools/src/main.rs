//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;
mod source;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use bytes::Bytes;
use clap::{App, Arg};
use config::{Config, LoggingFileRotation, LoggingFmtStyle};
use ospfmon_packet::debug::Debug;
use ospfmon_packet::ip::{IpHdr, IpHdrMode, strip_ip_hdr};
use ospfmon_packet::packet::DecodedMessage;
use serde::Serialize;
use source::{PacketSource, RecordFile};
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

// Decoded packet as written to the output.
#[derive(Debug, Serialize)]
struct Record<'a> {
    seqno: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_hdr: Option<&'a IpHdr>,
    msg: &'a DecodedMessage,
}

#[derive(Debug, Default)]
struct Stats {
    decoded: u64,
    failed: u64,
    filtered: u64,
}

fn init_tracing(config: &config::Logging, stderr_level: LevelFilter) {
    // Enable logging to a file.
    let file = config.file.enabled.then(|| {
        let file_appender = match config.file.rotation {
            LoggingFileRotation::Never => {
                rolling::never(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Hourly => {
                rolling::hourly(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Daily => {
                rolling::daily(&config.file.dir, &config.file.name)
            }
        };

        let log_level_filter = LevelFilter::from_level(tracing::Level::TRACE);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_target(false)
            .with_thread_ids(config.file.fmt.show_thread_id)
            .with_file(config.file.fmt.show_source)
            .with_line_number(config.file.fmt.show_source)
            .with_ansi(config.file.fmt.colors);
        let layer = match config.file.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(log_level_filter)
    });

    // Enable logging to stderr. Stdout is reserved for decoded records.
    let stderr = config.stderr.enabled.then(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_ids(config.stderr.fmt.show_thread_id)
            .with_file(config.stderr.fmt.show_source)
            .with_line_number(config.stderr.fmt.show_source)
            .with_ansi(config.stderr.fmt.colors);
        let layer = match config.stderr.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(stderr_level)
    });

    let default_directive = default_directive(stderr_level)
        .parse()
        .unwrap_or_else(|_| LevelFilter::DEBUG.into());
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file)
        .with(stderr)
        .init();
}

// Default filtering directive, used when `RUST_LOG` isn't set.
fn default_directive(stderr_level: LevelFilter) -> &'static str {
    if stderr_level == LevelFilter::TRACE {
        "ospfmon=trace"
    } else {
        "ospfmon=debug"
    }
}

fn open_source(path: &str) -> io::Result<Box<dyn PacketSource>> {
    let source: Box<dyn PacketSource> = match path {
        "-" => Box::new(RecordFile::new(BufReader::new(io::stdin()))),
        path => Box::new(RecordFile::new(BufReader::new(File::open(path)?))),
    };
    Ok(source)
}

fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    let output: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    Ok(output)
}

// Decodes one captured packet and writes it to the output.
fn process(
    seqno: u64,
    mut buf: Bytes,
    ip_hdr_mode: IpHdrMode,
    msg_types: &BTreeSet<u8>,
    output: &mut dyn Write,
    stats: &mut Stats,
) -> io::Result<()> {
    // Strip the outer IP header, if any.
    let ip_hdr = match strip_ip_hdr(ip_hdr_mode, &mut buf) {
        Ok(ip_hdr) => ip_hdr,
        Err(error) => {
            warn!(%seqno, %error, "failed to decode IP header");
            stats.failed += 1;
            return Ok(());
        }
    };

    // Skip message types that weren't asked for.
    if let Some(pkt_type) = buf.get(1)
        && !msg_types.is_empty()
        && !msg_types.contains(pkt_type)
    {
        stats.filtered += 1;
        return Ok(());
    }

    let msg = match DecodedMessage::decode(&mut buf) {
        Ok(msg) => msg,
        Err(error) => {
            warn!(%seqno, %error, "failed to decode packet");
            stats.failed += 1;
            return Ok(());
        }
    };
    Debug::PacketRx(seqno, &msg).log();
    stats.decoded += 1;

    let record = Record {
        seqno,
        ip_hdr: ip_hdr.as_ref(),
        msg: &msg,
    };
    serde_json::to_writer(&mut *output, &record)?;
    writeln!(output)
}

fn run(
    config: &Config,
    msg_types: &BTreeSet<u8>,
    source: &mut dyn PacketSource,
    output: &mut dyn Write,
) -> io::Result<Stats> {
    let mut stats = Stats::default();
    let mut seqno = 0;
    while let Some(buf) = source.receive()? {
        seqno += 1;
        process(
            seqno,
            buf,
            config.capture.ip_header,
            msg_types,
            output,
            &mut stats,
        )?;
    }
    output.flush()?;

    Ok(stats)
}

// ===== main =====

fn main() {
    // Parse command-line parameters.
    let matches = App::new("OSPFv3 packet decoder")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("file")
                .help("Write decoded packets to a file instead of stdout."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .conflicts_with("quiet")
                .help("Log decoder debug messages."),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Only log warnings and errors."),
        )
        .arg(
            Arg::with_name("FILE")
                .required(true)
                .index(1)
                .help("Capture record file to decode (\"-\" for stdin)."),
        )
        .get_matches();

    // Read configuration file.
    let config_file = matches.value_of("config");
    let config = match Config::load(config_file) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    let msg_types = match config.filter.message_types() {
        Ok(msg_types) => msg_types,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    // Initialize tracing.
    let stderr_level = if matches.is_present("verbose") {
        LevelFilter::TRACE
    } else if matches.is_present("quiet") {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    init_tracing(&config.logging, stderr_level);

    // Open input and output.
    let path = matches.value_of("FILE").unwrap_or("-");
    let mut source = match open_source(path) {
        Ok(source) => source,
        Err(error) => {
            error!(%path, %error, "failed to open capture file");
            std::process::exit(1);
        }
    };
    let mut output = match open_output(matches.value_of("output")) {
        Ok(output) => output,
        Err(error) => {
            error!(%error, "failed to open output file");
            std::process::exit(1);
        }
    };

    info!(%path, "starting up");
    match run(&config, &msg_types, source.as_mut(), output.as_mut()) {
        Ok(stats) => {
            info!(
                decoded = %stats.decoded,
                failed = %stats.failed,
                filtered = %stats.filtered,
                "finished"
            );
        }
        Err(error) => {
            error!(%error, "aborting");
            std::process::exit(1);
        }
    }
}

// ===== unit tests =====
