// SPDX-License-Identifier: Apache-2.0

// Parses a JSON file (or a built-in sample), writes it back out and dumps the
// table behind the top-level object. Run with RUST_LOG=debug to see table
// expansions reported through LogReporter.

use std::env;
use std::io::{self, Write};

use chainjson::{parse, parse_file, ChainedHashTable, LoadError, LogReporter, WriteJson};

const SAMPLE: &str = r#"{"a": 1, "b": [true, false, null], "c": {"d": "e\"f"}}"#;

fn main() -> Result<(), LoadError> {
    env_logger::init();

    let args: Vec<_> = env::args().collect();
    let value = match args.get(1) {
        Some(path) => parse_file(path)?,
        None => {
            println!("Usage: {} file.json (parsing a built-in sample)", args[0]);
            parse(SAMPLE)?
        }
    };

    let mut out = io::stdout().lock();
    value.write_json(&mut out)?;
    writeln!(out)?;

    if let Some(hash) = value.as_hash() {
        hash.table().dump(&mut out)?;
    }

    let mut squares = ChainedHashTable::new().with_reporter(LogReporter);
    for i in 0..40u32 {
        squares.set(i, i * i);
    }
    writeln!(
        out,
        "squares: {} pairs in {} buckets",
        squares.len(),
        squares.capacity()
    )?;
    Ok(())
}
