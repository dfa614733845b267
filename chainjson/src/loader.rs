// SPDX-License-Identifier: Apache-2.0

//! Parsing from readers and files.
//!
//! The whole source is buffered before parsing begins; there is no
//! incremental parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::config::ParserConfig;
use crate::parse_error::LoadError;
use crate::parser::Parser;
use crate::value::JsonValue;

/// Reads `reader` to the end and parses one JSON value from it.
pub fn parse_reader<R: Read>(reader: R) -> Result<JsonValue, LoadError> {
    parse_reader_with_config(reader, ParserConfig::default())
}

pub fn parse_reader_with_config<R: Read>(
    mut reader: R,
    config: ParserConfig,
) -> Result<JsonValue, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = core::str::from_utf8(&bytes)?;
    Ok(Parser::with_config(text, config).parse()?)
}

/// Opens the file at `path` and parses one JSON value from it.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<JsonValue, LoadError> {
    parse_file_with_config(path, ParserConfig::default())
}

pub fn parse_file_with_config<P: AsRef<Path>>(
    path: P,
    config: ParserConfig,
) -> Result<JsonValue, LoadError> {
    let path = path.as_ref();
    debug!("loading JSON from {}", path.display());
    let file = File::open(path)?;
    parse_reader_with_config(file, config)
}
