//! Example: Reading NBT files from disk
//!
//! Gzip-compressed and raw files are both accepted; the framing is
//! detected from the first two bytes.
//!
//! Run with: cargo run --example dump -- <path_to_nbt_file>

use std::env;
use std::fs;

use nbtag::{BigEndian, read_auto};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .ok_or("usage: dump <path_to_nbt_file>")?;
    let data = fs::read(&path)?;
    let tag = read_auto::<BigEndian>(&data)?;

    println!("{tag}");
    println!("{} bytes uncompressed", tag.written_size());
    Ok(())
}
