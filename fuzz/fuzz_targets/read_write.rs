#![no_main]

use libfuzzer_sys::fuzz_target;
use nbtag::{BigEndian, LittleEndian, ReadOptions, read_slice, read_with_options};

fn check<O: nbtag::ByteOrder>(data: &[u8]) {
    let Ok(tag) = read_slice::<O>(data) else {
        return;
    };
    // lossy text can grow past the length limit, so re-encoding may fail
    let Ok(encoded) = tag.write_to_vec::<O>() else {
        return;
    };
    assert_eq!(encoded.len(), tag.written_size());

    let decoded = read_with_options::<O>(encoded.as_slice(), ReadOptions::unlimited())
        .expect("encoded tree decodes");
    let reencoded = decoded.write_to_vec::<O>().expect("decoded tree re-encodes");
    assert_eq!(encoded, reencoded);
}

fuzz_target!(|data: &[u8]| {
    check::<BigEndian>(data);
    check::<LittleEndian>(data);
});
