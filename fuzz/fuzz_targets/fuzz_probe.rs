#![no_main]

use std::io::{Cursor, Seek, SeekFrom};

use arbitrary::Arbitrary;
use imgload::CodecRegistry;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    start: u8,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let registry = CodecRegistry::all();
    let start = u64::from(input.start);

    let mut stream = Cursor::new(&input.data[..]);
    stream.seek(SeekFrom::Start(start)).unwrap();

    let first = registry.find_format(&mut stream).map(|c| c.name().to_owned());
    assert_eq!(stream.position(), start);

    let second = registry.find_format(&mut stream).map(|c| c.name().to_owned());
    assert_eq!(stream.position(), start);
    assert_eq!(first, second);
});
