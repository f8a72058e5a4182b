#![no_main]

use bytes::Bytes;
use c8::{ByteSet, HexDecoder, HexEncoder, Pipeline, PipelineConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let configs = vec![
        // Smallest buffers
        PipelineConfig::new(2, 2).unwrap(),
        // Odd, mismatched sizes
        PipelineConfig::new(3, 7).unwrap(),
        PipelineConfig::new(64, 5).unwrap(),
        // Default config
        PipelineConfig::default(),
    ];

    let data = Bytes::from(data);
    let reference = Pipeline::with_default_config(HexEncoder)
        .convert_bytes(data.clone())
        .unwrap();

    for config in configs {
        // Verify: encoding never depends on buffer sizes
        let encoded = Pipeline::new(HexEncoder, config)
            .convert_bytes(data.clone())
            .unwrap();
        assert_eq!(encoded, reference);
        assert_eq!(encoded.len(), data.len() * 2);

        // Verify: decoding restores the input
        let decoded = Pipeline::new(HexDecoder::new(ByteSet::whitespace()), config)
            .convert_bytes(encoded)
            .unwrap();
        assert_eq!(decoded, data);
    }
});
