//! Decoding hand-assembled byte streams

use nbtag::{
    BigEndian as BE, Error, Kind, LittleEndian as LE, Payload, ReadOptions, read, read_slice,
    read_with_options,
};

// ==================== Helper Functions ====================

fn header(kind: u8, name: &str) -> Vec<u8> {
    let mut data = vec![kind];
    data.extend_from_slice(&(name.len() as u16).to_be_bytes());
    data.extend_from_slice(name.as_bytes());
    data
}

fn list_header(name: &str, element_kind: u8, count: i32) -> Vec<u8> {
    let mut data = header(0x09, name);
    data.push(element_kind);
    data.extend_from_slice(&count.to_be_bytes());
    data
}

fn push_string(data: &mut Vec<u8>, text: &str) {
    data.extend_from_slice(&(text.len() as u16).to_be_bytes());
    data.extend_from_slice(text.as_bytes());
}

// ==================== Scalars ====================

#[test]
fn test_scalars_big_endian() {
    let mut data = header(0x01, "b");
    data.push(0xFE);
    assert_eq!(read_slice::<BE>(&data).unwrap().payload(), &Payload::Byte(-2));

    let mut data = header(0x02, "s");
    data.extend_from_slice(&(-300i16).to_be_bytes());
    assert_eq!(read_slice::<BE>(&data).unwrap().payload(), &Payload::Short(-300));

    let mut data = header(0x03, "i");
    data.extend_from_slice(&123_456_789i32.to_be_bytes());
    assert_eq!(read_slice::<BE>(&data).unwrap().payload(), &Payload::Int(123_456_789));

    let mut data = header(0x04, "l");
    data.extend_from_slice(&i64::MIN.to_be_bytes());
    assert_eq!(read_slice::<BE>(&data).unwrap().payload(), &Payload::Long(i64::MIN));

    let mut data = header(0x05, "f");
    data.extend_from_slice(&1.5f32.to_be_bytes());
    assert_eq!(read_slice::<BE>(&data).unwrap().payload(), &Payload::Float(1.5));

    let mut data = header(0x06, "d");
    data.extend_from_slice(&(-0.25f64).to_be_bytes());
    assert_eq!(read_slice::<BE>(&data).unwrap().payload(), &Payload::Double(-0.25));
}

#[test]
fn test_little_endian_int() {
    let mut data = vec![0x03, 0x01, 0x00, b'n'];
    data.extend_from_slice(&77i32.to_le_bytes());
    let tag = read_slice::<LE>(&data).unwrap();
    assert_eq!(tag.name(), Some("n"));
    assert_eq!(tag.payload(), &Payload::Int(77));
}

#[test]
fn test_byte_array_and_string() {
    let mut data = header(0x07, "raw");
    data.extend_from_slice(&3i32.to_be_bytes());
    data.extend_from_slice(&[1, 2, 255]);
    let tag = read_slice::<BE>(&data).unwrap();
    assert_eq!(tag.payload(), &Payload::ByteArray(vec![1, 2, 255]));

    let mut data = header(0x08, "greeting");
    push_string(&mut data, "hello");
    let tag = read_slice::<BE>(&data).unwrap();
    assert_eq!(tag.name(), Some("greeting"));
    assert_eq!(tag.payload(), &Payload::String("hello".into()));
}

#[test]
fn test_end_root_has_no_name() {
    let tag = read_slice::<BE>(&[0x00]).unwrap();
    assert_eq!(tag.kind(), Kind::End);
    assert_eq!(tag.name(), None);
}

#[test]
fn test_empty_name_is_present() {
    let mut data = header(0x01, "");
    data.push(7);
    assert_eq!(read_slice::<BE>(&data).unwrap().name(), Some(""));
}

// ==================== Lists ====================

#[test]
fn test_list_elements_are_unnamed() {
    let mut data = list_header("xs", 0x03, 3);
    for value in [10i32, 20, 30] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    let tag = read_slice::<BE>(&data).unwrap();
    let list = tag.as_list().unwrap();
    assert_eq!(list.element_kind(), Kind::Int);
    let values: Vec<_> = list.iter().map(|t| t.payload().clone()).collect();
    assert_eq!(values, [Payload::Int(10), Payload::Int(20), Payload::Int(30)]);
    assert!(list.iter().all(|t| t.name().is_none()));
}

#[test]
fn test_empty_list_keeps_declared_kind() {
    let data = list_header("empty", 0x03, 0);
    let tag = read_slice::<BE>(&data).unwrap();
    assert_eq!(tag.element_kind(), Some(Kind::Int));
    assert!(tag.as_list().unwrap().is_empty());
}

#[test]
fn test_negative_list_count_reads_as_empty() {
    let data = list_header("neg", 0x08, -5);
    let tag = read_slice::<BE>(&data).unwrap();
    assert_eq!(tag.element_kind(), Some(Kind::String));
    assert!(tag.as_list().unwrap().is_empty());
}

#[test]
fn test_end_list_must_be_empty() {
    let data = list_header("ends", 0x00, 2);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::EndElements(2))));
    let data = list_header("ends", 0x00, 0);
    assert_eq!(read_slice::<BE>(&data).unwrap().element_kind(), Some(Kind::End));
}

#[test]
fn test_list_of_compounds() {
    let mut data = list_header("mobs", 0x0A, 2);
    for hp in [20i16, 8] {
        data.extend_from_slice(&header(0x02, "hp"));
        data.extend_from_slice(&hp.to_be_bytes());
        data.push(0x00);
    }
    let tag = read_slice::<BE>(&data).unwrap();
    let list = tag.as_list().unwrap();
    assert_eq!(list.len(), 2);
    let second = list.get(1).unwrap().as_compound().unwrap();
    assert_eq!(second.get("hp").unwrap().payload(), &Payload::Short(8));
}

#[test]
fn test_list_of_lists() {
    let mut data = list_header("grid", 0x09, 2);
    for row in [[1i8, 2], [3, 4]] {
        data.push(0x01);
        data.extend_from_slice(&2i32.to_be_bytes());
        data.extend(row.iter().map(|b| *b as u8));
    }
    let tag = read_slice::<BE>(&data).unwrap();
    let rows = tag.as_list().unwrap();
    assert_eq!(rows.element_kind(), Kind::List);
    let second = rows.get(1).unwrap().as_list().unwrap();
    assert_eq!(second.get(0).unwrap().payload(), &Payload::Byte(3));
}

// ==================== Compounds ====================

#[test]
fn test_compound_preserves_order() {
    let mut data = header(0x0A, "root");
    for name in ["zeta", "alpha", "mid"] {
        data.extend_from_slice(&header(0x01, name));
        data.push(1);
    }
    data.push(0x00);
    let tag = read_slice::<BE>(&data).unwrap();
    let keys: Vec<_> = tag.as_compound().unwrap().keys().collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let mut data = header(0x0A, "");
    data.extend_from_slice(&header(0x01, "x"));
    data.push(1);
    data.extend_from_slice(&header(0x01, "y"));
    data.push(2);
    data.extend_from_slice(&header(0x01, "x"));
    data.push(3);
    data.push(0x00);
    let tag = read_slice::<BE>(&data).unwrap();
    let compound = tag.as_compound().unwrap();
    assert_eq!(compound.len(), 2);
    assert_eq!(compound.keys().collect::<Vec<_>>(), ["x", "y"]);
    assert_eq!(compound.get("x").unwrap().payload(), &Payload::Byte(3));
}

#[test]
fn test_read_stops_after_root() {
    let mut data = header(0x01, "a");
    data.push(5);
    data.extend_from_slice(&[0xAA, 0xBB]);
    let mut cursor = data.as_slice();
    let tag = read(&mut cursor).unwrap();
    assert_eq!(tag.payload(), &Payload::Byte(5));
    assert_eq!(cursor, [0xAA, 0xBB]);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::TrailingData(2))));
}

// ==================== Errors ====================

#[test]
fn test_empty_input() {
    assert!(matches!(read_slice::<BE>(&[]), Err(Error::TruncatedStream)));
}

#[test]
fn test_truncated_name() {
    let data = vec![0x01, 0x00, 0x05, b'a', b'b'];
    assert!(matches!(read_slice::<BE>(&data), Err(Error::TruncatedStream)));
}

#[test]
fn test_truncated_byte_array() {
    let mut data = header(0x07, "blob");
    data.extend_from_slice(&100i32.to_be_bytes());
    data.extend_from_slice(&[0u8; 10]);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::TruncatedStream)));
}

#[test]
fn test_negative_byte_array_length() {
    let mut data = header(0x07, "blob");
    data.extend_from_slice(&(-1i32).to_be_bytes());
    assert!(matches!(read_slice::<BE>(&data), Err(Error::NegativeLength(-1))));
}

#[test]
fn test_truncated_list_body() {
    let mut data = list_header("xs", 0x04, 2);
    data.extend_from_slice(&1i64.to_be_bytes());
    assert!(matches!(read_slice::<BE>(&data), Err(Error::TruncatedStream)));
}

#[test]
fn test_compound_without_terminator() {
    let mut data = header(0x0A, "open");
    data.extend_from_slice(&header(0x01, "a"));
    data.push(1);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::TruncatedStream)));
}

#[test]
fn test_unknown_root_kind() {
    assert!(matches!(read_slice::<BE>(&[0x0B, 0, 0]), Err(Error::UnknownKind(0x0B))));
}

#[test]
fn test_unknown_kind_in_compound() {
    let mut data = header(0x0A, "");
    data.push(0xFF);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::UnknownKind(0xFF))));
}

#[test]
fn test_unknown_list_element_kind() {
    let data = list_header("xs", 0x0C, 0);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::UnknownKind(0x0C))));
}

#[test]
fn test_failed_child_fails_whole_decode() {
    let mut data = header(0x0A, "");
    data.extend_from_slice(&header(0x01, "ok"));
    data.push(1);
    data.extend_from_slice(&header(0x03, "short"));
    data.extend_from_slice(&[0, 1]);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::TruncatedStream)));
}

// ==================== Text and Depth ====================

#[test]
fn test_malformed_text_is_lossy() {
    let mut data = vec![0x08, 0x00, 0x01, 0xFF];
    data.extend_from_slice(&[0x00, 0x02, b'o', b'k']);
    let tag = read_slice::<BE>(&data).unwrap();
    assert!(tag.name().unwrap().contains('\u{FFFD}'));
    assert_eq!(tag.payload(), &Payload::String("ok".into()));
}

#[test]
fn test_modified_utf8_null() {
    let mut data = header(0x08, "");
    data.extend_from_slice(&[0x00, 0x03, b'a', 0xC0, 0x80]);
    let tag = read_slice::<BE>(&data).unwrap();
    assert_eq!(tag.payload(), &Payload::String("a\0".into()));
}

fn nested_compounds(depth: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for _ in 0..depth {
        data.extend_from_slice(&header(0x0A, "n"));
    }
    data.extend(std::iter::repeat_n(0x00, depth));
    data
}

#[test]
fn test_depth_limit() {
    let data = nested_compounds(4);
    let limited = ReadOptions { max_depth: Some(3) };
    assert!(matches!(
        read_with_options::<BE>(data.as_slice(), limited),
        Err(Error::DepthLimitExceeded(3))
    ));
    let tag = read_with_options::<BE>(data.as_slice(), ReadOptions { max_depth: Some(4) }).unwrap();
    assert_eq!(tag.kind(), Kind::Compound);
}

// Deep trees are still dropped and compared recursively.
fn with_large_stack(test: impl FnOnce() + Send + 'static) {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(test)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn test_hostile_nesting_hits_default_limit() {
    let data = nested_compounds(10_000);
    assert!(matches!(read_slice::<BE>(&data), Err(Error::DepthLimitExceeded(512))));

    let mut lists = header(0x09, "l");
    for _ in 0..10_000 {
        lists.extend_from_slice(&[0x09, 0x00, 0x00, 0x00, 0x01]);
    }
    lists.extend_from_slice(&[0x01, 0x00, 0x00, 0x00, 0x00]);
    assert!(matches!(read_slice::<BE>(&lists), Err(Error::DepthLimitExceeded(512))));
}

#[test]
fn test_default_limit_is_inclusive() {
    with_large_stack(|| {
        let tag = read_slice::<BE>(&nested_compounds(512)).unwrap();
        assert_eq!(tag.written_size(), 512 * 4 + 512);
    });
}

#[test]
fn test_unlimited_depth() {
    with_large_stack(|| {
        let data = nested_compounds(600);
        assert!(matches!(read_slice::<BE>(&data), Err(Error::DepthLimitExceeded(512))));
        let tag = read_with_options::<BE>(data.as_slice(), ReadOptions::unlimited()).unwrap();
        assert!(tag.find_by_name("n").unwrap().is_some());
        assert_eq!(tag.write_to_vec::<BE>().unwrap(), data);
    });
}
