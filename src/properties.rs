use std::collections::VecDeque;

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

use crate::{Error, RingBuffer};

const SIZE: usize = 32;

/// Moves both indices to `offset` so later writes start mid-storage.
fn skewed(offset: u8) -> RingBuffer<[u8; SIZE]> {
    let mut buf = RingBuffer::new([0u8; SIZE]).unwrap();
    let offset = offset as usize % (SIZE - 1);
    buf.append(&vec![0xAA; offset]).unwrap();
    buf.empty_read(offset).unwrap();
    buf
}

fn contents(buf: &RingBuffer<[u8; SIZE]>) -> Vec<u8> {
    let (front, back) = buf.as_slices();
    front.iter().chain(back).copied().collect()
}

#[quickcheck]
fn append_read_all_round_trip(bytes: Vec<u8>, offset: u8) -> TestResult {
    if bytes.len() >= SIZE {
        return TestResult::discard();
    }

    let mut buf = skewed(offset);
    assert_eq!(buf.append(&bytes), Ok(bytes.len()));

    let mut out = [0u8; SIZE];
    let n = buf.read_all(&mut out).unwrap();
    TestResult::from_bool(out[..n] == bytes[..] && buf.is_empty())
}

#[quickcheck]
fn prepend_inserts_at_front(payload: Vec<u8>, header: Vec<u8>, offset: u8) -> TestResult {
    if payload.len() + header.len() >= SIZE {
        return TestResult::discard();
    }

    let mut buf = skewed(offset);
    buf.append(&payload).unwrap();
    buf.prepend(&header).unwrap();

    let mut expected = header.clone();
    expected.extend_from_slice(&payload);
    TestResult::from_bool(contents(&buf) == expected)
}

#[quickcheck]
fn contiguate_is_idempotent(bytes: Vec<u8>, consumed: u8, offset: u8) -> TestResult {
    if bytes.len() >= SIZE {
        return TestResult::discard();
    }

    let mut buf = skewed(offset);
    buf.append(&bytes).unwrap();
    buf.empty_read(consumed as usize % (bytes.len() + 1)).unwrap();
    let expected = contents(&buf);

    buf.contiguate();
    let once = (buf.head, buf.tail, buf.data);
    buf.contiguate();

    TestResult::from_bool(
        buf.is_contiguous()
            && (buf.head, buf.tail, buf.data) == once
            && buf.read_slice() == Some(&expected[..]),
    )
}

#[derive(Clone, Debug)]
enum Op {
    Append(Vec<u8>),
    AppendByte(u8),
    Prepend(Vec<u8>),
    PrependByte(u8),
    ReadBytes(usize),
    ReadByte,
    ReadAll,
    Contiguate,
    ZeroCopyWrite(Vec<u8>),
    EmptyRead(usize),
    Clear,
}

fn chunk(g: &mut Gen) -> Vec<u8> {
    let len = usize::arbitrary(g) % 12;
    (0..len).map(|_| u8::arbitrary(g)).collect()
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 11 {
            0 => Op::Append(chunk(g)),
            1 => Op::AppendByte(u8::arbitrary(g)),
            2 => Op::Prepend(chunk(g)),
            3 => Op::PrependByte(u8::arbitrary(g)),
            4 => Op::ReadBytes(usize::arbitrary(g) % 12),
            5 => Op::ReadByte,
            6 => Op::ReadAll,
            7 => Op::Contiguate,
            8 => Op::ZeroCopyWrite(chunk(g)),
            9 => Op::EmptyRead(usize::arbitrary(g) % 12),
            _ => Op::Clear,
        }
    }
}

/// Replays `ops` against a `VecDeque` and checks both agree after each step.
fn agrees_with_model(ops: Vec<Op>) -> bool {
    let mut buf = RingBuffer::new([0u8; SIZE]).unwrap();
    let mut model: VecDeque<u8> = VecDeque::new();
    let capacity = SIZE - 1;

    for op in ops {
        let free = capacity - model.len();
        match op {
            Op::Append(bytes) => {
                let res = buf.append(&bytes);
                if bytes.len() <= free {
                    assert_eq!(res, Ok(bytes.len()));
                    model.extend(&bytes);
                } else {
                    assert_eq!(res, Err(Error::Insufficient));
                }
            }
            Op::AppendByte(byte) => {
                let res = buf.append_byte(byte);
                if free > 0 {
                    assert_eq!(res, Ok(1));
                    model.push_back(byte);
                } else {
                    assert_eq!(res, Err(Error::Insufficient));
                }
            }
            Op::Prepend(bytes) => {
                let res = buf.prepend(&bytes);
                if bytes.len() <= free {
                    assert_eq!(res, Ok(bytes.len()));
                    for &byte in bytes.iter().rev() {
                        model.push_front(byte);
                    }
                } else {
                    assert_eq!(res, Err(Error::Insufficient));
                }
            }
            Op::PrependByte(byte) => {
                let res = buf.prepend_byte(byte);
                if free > 0 {
                    assert_eq!(res, Ok(1));
                    model.push_front(byte);
                } else {
                    assert_eq!(res, Err(Error::Insufficient));
                }
            }
            Op::ReadBytes(len) => {
                let mut out = vec![0u8; len];
                let res = buf.read_bytes(&mut out);
                if len <= model.len() {
                    assert_eq!(res, Ok(len));
                    let expected: Vec<u8> = model.drain(..len).collect();
                    assert_eq!(out, expected);
                } else {
                    assert_eq!(res, Err(Error::Mismatch));
                }
            }
            Op::ReadByte => {
                assert_eq!(buf.try_read_byte(), model.pop_front());
            }
            Op::ReadAll => {
                let mut out = [0u8; SIZE];
                let n = buf.read_all(&mut out).unwrap();
                let expected: Vec<u8> = model.drain(..).collect();
                assert_eq!(&out[..n], &expected[..]);
            }
            Op::Contiguate => {
                buf.contiguate();
                assert!(buf.is_contiguous());
            }
            Op::ZeroCopyWrite(bytes) => {
                let region = buf.write_slice();
                let len = bytes.len().min(region.len());
                region[..len].copy_from_slice(&bytes[..len]);
                buf.empty_write(len);
                model.extend(&bytes[..len]);
            }
            Op::EmptyRead(len) => {
                let res = buf.empty_read(len);
                if len <= model.len() {
                    assert_eq!(res, Ok(len));
                    model.drain(..len);
                } else {
                    assert_eq!(res, Err(Error::Mismatch));
                }
            }
            Op::Clear => {
                buf.clear();
                model.clear();
            }
        }

        assert_eq!(buf.available_for_read(), model.len());
        assert_eq!(buf.available_for_read() + buf.available_for_write(), capacity);
        assert_eq!(buf.is_empty(), model.is_empty());
        assert_eq!(buf.is_full(), model.len() == capacity);
        assert_eq!(contents(&buf), model.iter().copied().collect::<Vec<u8>>());
    }

    true
}

#[test]
fn random_operations_match_vecdeque() {
    QuickCheck::new()
        .tests(500)
        .quickcheck(agrees_with_model as fn(Vec<Op>) -> bool);
}
