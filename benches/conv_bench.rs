//! Benchmarks for the c8 conversion pipeline.
//!
//! Run with:
//!     cargo bench

use std::io;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use c8::{ByteSet, HexDecoder, HexEncoder, Pipeline, PipelineConfig};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex");

    for size in [64 * 1024, 1024 * 1024] {
        // Deterministic pseudo-random data
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
        let pipeline = Pipeline::with_default_config(HexEncoder);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("encode_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let stats = pipeline.run(black_box(&data[..]), io::sink()).unwrap();
                black_box(stats.bytes_written)
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("unhex");
    let size = 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    let encoded = Pipeline::with_default_config(HexEncoder)
        .convert_bytes(data)
        .unwrap();

    // Same payload broken into 64 column lines
    let wrapped: Vec<u8> = encoded
        .chunks(64)
        .flat_map(|line| line.iter().copied().chain([b'\n']))
        .collect();

    let decoder = HexDecoder::new(ByteSet::whitespace());
    group.throughput(Throughput::Bytes(encoded.len() as u64));

    group.bench_function("dense", |b| {
        let pipeline = Pipeline::with_default_config(decoder);
        b.iter(|| black_box(pipeline.run(black_box(&encoded[..]), io::sink()).unwrap()));
    });

    group.bench_function("wrapped", |b| {
        let pipeline = Pipeline::with_default_config(decoder);
        b.iter(|| black_box(pipeline.run(black_box(&wrapped[..]), io::sink()).unwrap()));
    });

    group.finish();
}

fn bench_buffer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_sizes");
    let size = 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    for capacity in [16, 256, 0x800, 64 * 1024] {
        let config = PipelineConfig::new(capacity, capacity).unwrap();
        let pipeline = Pipeline::new(HexEncoder, config);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("encode_{capacity}"), |b| {
            b.iter(|| black_box(pipeline.convert_bytes(black_box(data.clone())).unwrap().len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_buffer_sizes);
criterion_main!(benches);
