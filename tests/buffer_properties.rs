//! Cross-cutting buffer properties exercised against the public API:
//! exact varint byte counts at every offset in a window, and the
//! end-to-end write/read seed.

use fury_core::MemoryBuffer;

const WINDOW: usize = 32;
const BUFFER_SIZE: usize = 64;

#[test]
fn varint_byte_counts_hold_at_every_offset_in_window() {
    let cases: &[(u32, usize)] = &[
        (1, 1),
        (1 << 6, 1),
        (1 << 7, 2),
        (1 << 13, 2),
        (1 << 14, 3),
        (1 << 20, 3),
        (1 << 21, 4),
        (1 << 27, 4),
        (1 << 28, 5),
        (1 << 30, 5),
    ];

    for &(value, expected_bytes) in cases {
        for start in 0..WINDOW {
            let mut buf = MemoryBuffer::allocate(BUFFER_SIZE);
            let written = buf
                .put_positive_varint32(start, value)
                .unwrap_or_else(|e| panic!("put failed for value={value} start={start}: {e}"));
            assert_eq!(written, expected_bytes, "value={value} start={start}");

            let (decoded, read) = buf
                .get_positive_varint32(start)
                .unwrap_or_else(|e| panic!("get failed for value={value} start={start}: {e}"));
            assert_eq!(decoded, value, "value={value} start={start}");
            assert_eq!(read, expected_bytes, "value={value} start={start}");
        }
    }
}

#[test]
fn fixed_width_round_trip_at_aligned_and_unaligned_offsets() {
    for offset in 0..24usize {
        let mut buf = MemoryBuffer::allocate(32);
        buf.put(offset, 0x1122_3344_5566_7788i64).unwrap();
        assert_eq!(buf.get::<i64>(offset).unwrap(), 0x1122_3344_5566_7788i64);
    }
}

#[test]
fn float_bit_patterns_round_trip_exactly() {
    let patterns: &[f64] = &[
        0.0,
        -0.0,
        1.11,
        f64::NAN,
        -f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::MIN_POSITIVE / 2.0, // denormal
    ];
    for &value in patterns {
        let mut buf = MemoryBuffer::allocate(8);
        buf.put(0, value).unwrap();
        let out: f64 = buf.get(0).unwrap();
        assert_eq!(out.to_bits(), value.to_bits());
    }
}

#[test]
fn end_to_end_seed_matches_spec_example() {
    let mut buf = MemoryBuffer::allocate(16);
    for (i, byte) in (b'a'..=b'p').enumerate() {
        buf.put(i, byte).unwrap();
    }
    assert_eq!(buf.to_string(), "abcdefghijklmnop");

    unsafe {
        buf.unsafe_put(0, 1.11f32);
    }
    assert_eq!(buf.get::<f32>(0).unwrap(), 1.11f32);
}

#[test]
fn varint_bytes_frame_class_names_end_to_end() {
    let mut buf = MemoryBuffer::allocate(4);
    buf.write_varint_bytes("io.fury.example.Record".as_bytes())
        .unwrap();
    buf.write_varint_bytes("io.fury.example.Other".as_bytes())
        .unwrap();

    let first = buf.read_varint_bytes().unwrap();
    let second = buf.read_varint_bytes().unwrap();
    assert_eq!(String::from_utf8(first).unwrap(), "io.fury.example.Record");
    assert_eq!(String::from_utf8(second).unwrap(), "io.fury.example.Other");
}
