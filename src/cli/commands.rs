//! Command handlers.

use std::ffi::OsString;
use std::fs::File;
use std::io::Read;

use tracing::{debug, warn};

use super::{Command, ExitFlags, HEX_BYTES_PER_LINE, Outcome, Streams, USAGE, parse_u64};
use crate::config::WidthConfig;
use crate::convert::{ByteSet, Converter, ConverterKind, HexDecoder, HexEncoder, LineWrap};
use crate::error::ConvError;
use crate::pipeline::Pipeline;
use crate::utf8;
use crate::width::{self, CodepointWidth, WidthError};

impl Command {
    /// Runs the command against `streams`.
    pub fn execute(self, streams: &mut Streams<'_>) -> Outcome {
        match self {
            Command::Help => streams.output(USAGE.as_bytes()),
            Command::Version => version(streams),
            Command::Echo { args } => echo(streams, &args),
            Command::Hex { args } => hex(streams, &args),
            Command::Unhex => unhex(streams),
            Command::Utf8Encode { values } => utf8_encode(streams, &values),
            Command::Utf8EncodeHex { values } => utf8_encode_hex(streams, &values),
            Command::UcpTermWidth { values } => ucp_term_width(streams, &values),
            Command::Utf8ArgTermWidth { args } => utf8_arg_term_width(streams, &args),
            Command::Conv { converter } => conv(streams, converter.as_deref()),
            Command::AllocTest { size } => alloc_test(streams, size.as_deref()),
        }
    }
}

fn version(streams: &mut Streams<'_>) -> Outcome {
    let line = format!(
        "c8-v{} {}-{}\n",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    streams.output(line.as_bytes())
}

fn echo(streams: &mut Streams<'_>, args: &[OsString]) -> Outcome {
    for arg in args {
        streams.output(arg.as_encoded_bytes())?;
        streams.output(b"\n")?;
    }
    Ok(())
}

fn hex(streams: &mut Streams<'_>, args: &[String]) -> Outcome {
    let mut path = None;
    for arg in args {
        match arg.strip_prefix("if=") {
            Some(_) if path.is_some() => {
                return Err(streams.fail(ExitFlags::INVOCATION, "multiple 'if=' not allowed"));
            }
            Some(p) => path = Some(p),
            None => warn!(argument = %arg, "ignoring hex argument"),
        }
    }

    let mut file = match path {
        Some(p) => Some(File::open(p).map_err(|e| {
            debug!(path = p, error = %e, "open failed");
            streams.fail(ExitFlags::INVOCATION, "failed to open input file")
        })?),
        None => None,
    };

    let pipeline = Pipeline::with_default_config(HexEncoder);
    let result = {
        let input: &mut dyn Read = match file.as_mut() {
            Some(f) => f as &mut dyn Read,
            None => &mut *streams.input,
        };
        let mut wrap = LineWrap::new(&mut *streams.out, HEX_BYTES_PER_LINE * 2);
        pipeline
            .run(input, &mut wrap)
            .and_then(|_| wrap.finish().map(drop).map_err(ConvError::Write))
    };
    result.map_err(|e| stream_failure(streams, e))
}

fn unhex(streams: &mut Streams<'_>) -> Outcome {
    stream(streams, HexDecoder::new(ByteSet::whitespace()))
}

fn conv(streams: &mut Streams<'_>, name: Option<&str>) -> Outcome {
    let Some(name) = name else {
        return Err(streams.fail(ExitFlags::INVOCATION, "missing converter name argument"));
    };
    let kind: ConverterKind = name
        .parse()
        .map_err(|e| streams.fail(ExitFlags::INVOCATION, e))?;
    stream(streams, kind.build())
}

/// Runs standard input through `converter` straight into standard output.
fn stream<C: Converter>(streams: &mut Streams<'_>, converter: C) -> Outcome {
    let pipeline = Pipeline::with_default_config(converter);
    match pipeline.run(&mut *streams.input, &mut *streams.out) {
        Ok(stats) => {
            debug!(?stats, "stream complete");
            Ok(())
        }
        Err(e) => Err(stream_failure(streams, e)),
    }
}

fn stream_failure(streams: &mut Streams<'_>, err: ConvError) -> ExitFlags {
    debug!(error = ?err, "stream failed");
    match err {
        // Transport details stay in the log; the diagnostic is fixed text.
        ConvError::Read(_) => streams.fail(ExitFlags::INPUT, "input error"),
        ConvError::Write(_) => streams.fail(ExitFlags::OUTPUT, "output error"),
        ConvError::InvalidConfig { .. } => streams.fail(ExitFlags::INVOCATION, &err),
        _ => streams.fail(ExitFlags::PROCESSING, &err),
    }
}

/// Parses a codepoint argument, reporting bad integers and invalid codepoints.
fn parse_codepoint(streams: &mut Streams<'_>, text: &str) -> Result<u32, ExitFlags> {
    let value = parse_u64(text)
        .map_err(|_| streams.fail(ExitFlags::INVOCATION, "cannot convert to integer"))?;
    u32::try_from(value)
        .ok()
        .filter(|&cp| utf8::is_valid_codepoint(cp))
        .ok_or_else(|| streams.fail(ExitFlags::PROCESSING, "invalid unicode codepoint"))
}

fn utf8_encode(streams: &mut Streams<'_>, values: &[String]) -> Outcome {
    for value in values {
        let cp = parse_codepoint(streams, value)?;
        let mut buf = [0u8; 4];
        if let Some(seq) = utf8::encode_codepoint(cp, &mut buf) {
            streams.output(seq)?;
        }
    }
    streams.output(b"\n")
}

fn utf8_encode_hex(streams: &mut Streams<'_>, values: &[String]) -> Outcome {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            streams.output(b" ")?;
        }
        let cp = parse_codepoint(streams, value)?;
        let mut buf = [0u8; 4];
        let mut hex = [0u8; 8];
        if let Some(seq) = utf8::encode_codepoint(cp, &mut buf) {
            let result = HexEncoder.convert(seq, &mut hex);
            streams.output(&hex[..result.produced])?;
        }
    }
    streams.output(b"\n")
}

fn ucp_term_width(streams: &mut Streams<'_>, values: &[String]) -> Outcome {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            streams.output(b" ")?;
        }
        let cp = parse_codepoint(streams, value)?;
        let columns = width::codepoint_width(cp);
        if columns == CodepointWidth::NonPrintable {
            debug!(cp, "non-printable codepoint");
        }
        streams.output(columns.as_i32().to_string().as_bytes())?;
    }
    streams.output(b"\n")
}

fn utf8_arg_term_width(streams: &mut Streams<'_>, args: &[OsString]) -> Outcome {
    let config = WidthConfig::default();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            streams.output(b" ")?;
        }
        let columns = width::str_width(arg.as_encoded_bytes(), &config).map_err(|e| {
            debug!(error = %e, "width failed");
            let message = match e {
                WidthError::InvalidUtf8(_) => "invalid UTF-8 argument",
                WidthError::NonPrintable { .. } => "non-printable codepoint",
                WidthError::TooWide { .. } => "width too large",
            };
            streams.fail(ExitFlags::PROCESSING, message)
        })?;
        streams.output(columns.to_string().as_bytes())?;
    }
    streams.output(b"\n")
}

fn alloc_test(streams: &mut Streams<'_>, size: Option<&str>) -> Outcome {
    let Some(text) = size else {
        return Err(streams.fail(ExitFlags::INVOCATION, "alloc-test: missing SIZE argument"));
    };
    let size = parse_u64(text).map_err(|_| {
        streams.fail(
            ExitFlags::INVOCATION,
            "alloc-test: cannot convert given argument to integer",
        )
    })?;
    let size = usize::try_from(size)
        .ok()
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(|| streams.fail(ExitFlags::PROCESSING, "alloc-test: given size is too large"))?;

    let mut block: Vec<u8> = Vec::new();
    block
        .try_reserve_exact(size)
        .map_err(|_| streams.fail(ExitFlags::PROCESSING, "alloc-test: alloc failed"))?;

    streams.output(format!("ptr: {:p}\n", block.as_ptr()).as_bytes())?;
    block.extend((0..size).map(|i| i as u8));
    debug!(size, "alloc-test filled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(command: Command, input: &[u8]) -> (Outcome, Vec<u8>, Vec<u8>) {
        let mut input = input;
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = command.execute(&mut Streams::new(&mut input, &mut out, &mut err));
        (outcome, out, err)
    }

    #[test]
    fn test_echo() {
        let args = vec!["a".into(), "-b".into()];
        let (outcome, out, _) = exec(Command::Echo { args }, b"");
        assert_eq!(outcome, Ok(()));
        assert_eq!(out, b"a\n-b\n");
    }

    #[test]
    fn test_hex_wraps_every_32_bytes() {
        let data = [0xABu8; 33];
        let (outcome, out, _) = exec(Command::Hex { args: vec![] }, &data);
        assert_eq!(outcome, Ok(()));

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["ab".repeat(32).as_str(), "ab"]);
    }

    #[test]
    fn test_hex_rejects_second_input_file() {
        let args = vec!["if=a".into(), "if=b".into()];
        let (outcome, _, err) = exec(Command::Hex { args }, b"");
        assert_eq!(outcome, Err(ExitFlags::INVOCATION));
        assert_eq!(err, b"c8: multiple 'if=' not allowed\n");
    }

    #[test]
    fn test_conv_unknown() {
        let (outcome, _, err) = exec(
            Command::Conv {
                converter: Some("rot13".into()),
            },
            b"",
        );
        assert_eq!(outcome, Err(ExitFlags::INVOCATION));
        assert_eq!(err, b"c8: unrecognised converter name \"rot13\"\n");
    }

    #[test]
    fn test_utf8_encode_hex() {
        let values = vec!["65".into(), "0x4E2D".into()];
        let (outcome, out, _) = exec(Command::Utf8EncodeHex { values }, b"");
        assert_eq!(outcome, Ok(()));
        assert_eq!(out, b"41 e4b8ad\n");
    }

    #[test]
    fn test_alloc_test_too_large() {
        let (outcome, _, err) = exec(
            Command::AllocTest {
                size: Some(u64::MAX.to_string()),
            },
            b"",
        );
        assert_eq!(outcome, Err(ExitFlags::PROCESSING));
        assert_eq!(err, b"c8: alloc-test: given size is too large\n");
    }
}
