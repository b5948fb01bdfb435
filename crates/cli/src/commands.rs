//! Command parsing and execution for the shell.
//!
//! Every command checks the store's state and index bounds itself, so a typo
//! at the prompt prints `ERR ...` instead of tripping the store's unchecked
//! access contract.

use anyhow::{bail, Context, Result};
use dataaccess::{DataAccess, RamDataAccess};
use std::io::Write;

/// What the read loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Executes one input line against `da`, writing the response to `out`.
///
/// Errors are only returned when `out` itself fails; command failures are
/// reported inline as `ERR ...` lines.
pub fn execute<W: Write>(da: &mut RamDataAccess, line: &str, out: &mut W) -> Result<Flow> {
    let mut parts = line.split_whitespace();
    let cmd = match parts.next() {
        Some(cmd) => cmd.to_uppercase(),
        None => return Ok(Flow::Continue),
    };
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "ENSURE" => match args.as_slice() {
            [bytes] => match bytes.parse::<u64>() {
                Ok(bytes) => {
                    if da.is_closed() {
                        writeln!(out, "ERR store is closed")?;
                    } else {
                        da.ensure_capacity(bytes);
                        writeln!(out, "OK (capacity={})", da.capacity())?;
                    }
                }
                Err(_) => writeln!(out, "ERR invalid byte count: {}", bytes)?,
            },
            _ => writeln!(out, "ERR usage: ENSURE bytes")?,
        },
        "SET" => match args.as_slice() {
            [index, value] => match (parse_index(da, index), value.parse::<i32>()) {
                (Ok(index), Ok(value)) => {
                    da.set_int(index, value);
                    writeln!(out, "OK")?;
                }
                (Err(e), _) => writeln!(out, "ERR {}", e)?,
                (_, Err(_)) => writeln!(out, "ERR invalid value: {}", value)?,
            },
            _ => writeln!(out, "ERR usage: SET index value")?,
        },
        "GET" => match args.as_slice() {
            [index] => match parse_index(da, index) {
                Ok(index) => writeln!(out, "{}", da.get_int(index))?,
                Err(e) => writeln!(out, "ERR {}", e)?,
            },
            _ => writeln!(out, "ERR usage: GET index")?,
        },
        "DUMP" => match dump_range(da, &args) {
            Ok((start, end)) => {
                if start == end {
                    writeln!(out, "(empty)")?;
                } else {
                    for (i, v) in da.as_slice()[start..end].iter().enumerate() {
                        writeln!(out, "{} -> {}", start + i, v)?;
                    }
                    writeln!(out, "({} entries)", end - start)?;
                }
            }
            Err(e) => writeln!(out, "ERR {}", e)?,
        },
        "LOAD" => {
            if da.load_existing() {
                writeln!(out, "OK (capacity={})", da.capacity())?;
            } else {
                writeln!(out, "(not loaded)")?;
            }
        }
        "FLUSH" => match da.flush() {
            Ok(da) => writeln!(out, "OK ({} bytes)", da.capacity_bytes())?,
            Err(e) => writeln!(out, "ERR flush failed: {:#}", anyhow::Error::from(e))?,
        },
        "CLOSE" => {
            da.close();
            writeln!(out, "OK")?;
        }
        "INFO" => writeln!(out, "{:?}", da)?,
        "EXIT" | "QUIT" => {
            writeln!(out, "bye")?;
            return Ok(Flow::Exit);
        }
        other => writeln!(out, "unknown command: {}", other)?,
    }

    Ok(Flow::Continue)
}

/// Parses `raw` as an index and checks it against the live buffer.
fn parse_index(da: &RamDataAccess, raw: &str) -> Result<usize> {
    if !da.is_allocated() {
        bail!("store is not allocated");
    }
    let index: usize = raw
        .parse()
        .with_context(|| format!("invalid index: {}", raw))?;
    if index >= da.capacity() {
        bail!("index {} out of range (capacity={})", index, da.capacity());
    }
    Ok(index)
}

/// Resolves optional `[start] [end]` arguments to a clamped half-open range.
fn dump_range(da: &RamDataAccess, args: &[&str]) -> Result<(usize, usize)> {
    if !da.is_allocated() {
        bail!("store is not allocated");
    }
    let cap = da.capacity();
    let start: usize = match args.first() {
        Some(s) => s.parse().with_context(|| format!("invalid start: {}", s))?,
        None => 0,
    };
    let end: usize = match args.get(1) {
        Some(s) => s.parse().with_context(|| format!("invalid end: {}", s))?,
        None => cap,
    };
    let end = end.min(cap);
    Ok((start.min(end), end))
}

#[cfg(test)]
mod tests;
