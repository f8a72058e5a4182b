#![no_main]

use std::io::{self, Read};

use c8::{ByteSet, ConvError, HexDecoder, Pipeline, PipelineConfig};
use libfuzzer_sys::fuzz_target;

/// Hands out the input in pieces whose sizes come from the fuzzer.
struct Split<'a> {
    data: &'a [u8],
    sizes: &'a [u8],
    next: usize,
}

impl Read for Split<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = match self.sizes.get(self.next) {
            Some(&n) => usize::from(n).max(1),
            None => self.data.len(),
        };
        self.next += 1;
        let n = want.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn outcome(result: Result<Vec<u8>, ConvError>) -> Result<Vec<u8>, String> {
    result.map_err(|e| match e {
        ConvError::Malformed { offset } => format!("malformed {offset}"),
        ConvError::Unterminated { pending } => format!("unterminated {pending}"),
        other => panic!("unexpected error: {other}"),
    })
}

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (data, sizes) = input;
    let decoder = HexDecoder::new(ByteSet::whitespace());

    let whole = outcome(
        Pipeline::with_default_config(decoder)
            .convert_bytes(data.clone())
            .map(|b| b.to_vec()),
    );

    let config = PipelineConfig::new(4, 3).unwrap();
    let mut out = Vec::new();
    let reader = Split {
        data: &data,
        sizes: &sizes,
        next: 0,
    };
    let chunked = Pipeline::new(decoder, config).run(reader, &mut out).map(|_| out);

    // Verify: result and error position do not depend on read boundaries
    assert_eq!(outcome(chunked), whole);
});
