//! The `c8` command surface.
//!
//! Commands are a closed [`Command`] enum parsed by clap; each one runs
//! against a [`Streams`] triple and returns its [`ExitFlags`]. Nothing here
//! touches process-wide state, so the whole surface runs the same against
//! real stdio or in-memory buffers.
//!
//! # Example
//!
//! ```
//! use c8::cli::{run, ExitFlags, Streams};
//!
//! let mut input = &b"6869"[..];
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//!
//! let flags = run(["c8", "unhex"], &mut Streams::new(&mut input, &mut out, &mut err));
//! assert_eq!(flags, ExitFlags::empty());
//! assert_eq!(out, b"hi");
//! ```

mod commands;
mod number;
mod status;

use std::ffi::OsString;
use std::fmt::Display;
use std::io::{Read, Write};

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::debug;

pub use number::parse_u64;
pub use status::ExitFlags;

/// Name used to prefix every diagnostic line.
pub const TOOL_NAME: &str = "c8";

/// Raw bytes per line of `hex` output.
pub const HEX_BYTES_PER_LINE: usize = 0x20;

pub(crate) const USAGE: &str = "\
c8 - compilation of portable tools
Usage: c8 CMD [ARGS]
Commands:
  help                            prints this text
  version                         prints program version and target
  echo ARGS                       prints given args, one per line
  hex [if=PATH]                   reads from standard input (or PATH) and
                                  writes the bytes in hex form, 32 per line
  unhex                           reads hex data ignoring whitespace and
                                  writes the binary data
  utf8-encode INT_LIST            converts given ints into UTF-8
  utf8-encode-hex INT_LIST        converts given ints into UTF-8 and prints
                                  each sequence in hex, separating them
                                  with spaces
  ucp-term-width INT_LIST         prints the terminal width of each Unicode
                                  codepoint given as an integer;
                                  uses -1 for non-printable codepoints
  utf8-arg-term-width STRINGS     prints the terminal width of each argument
  conv CONVERTER                  converts standard input to standard output
                                  using the specified converter:
                                  hex   - writes the input bytes in hex form
                                  unhex - reads hex data ignoring whitespace
                                          and produces binary data
  alloc-test SIZE                 allocates and fills a buffer of SIZE bytes
";

/// Parsed command line.
#[derive(Parser, Debug)]
#[command(
    name = "c8",
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Command to run; none means `help`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// The command table.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage.
    #[command(name = "help", short_flag = 'h', long_flag = "help")]
    Help,

    /// Print program version.
    #[command(name = "version")]
    Version,

    /// Print each argument on its own line.
    #[command(name = "echo", disable_help_flag = true)]
    Echo {
        /// Arguments to print.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Hex dump input, 32 bytes per line.
    #[command(name = "hex", disable_help_flag = true)]
    Hex {
        /// `if=PATH` reads from PATH instead of standard input.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Decode hex input, ignoring whitespace.
    #[command(name = "unhex")]
    Unhex,

    /// Write codepoints as UTF-8.
    #[command(name = "utf8-encode", disable_help_flag = true)]
    Utf8Encode {
        /// Codepoints as integers.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Write the UTF-8 of each codepoint in hex.
    #[command(name = "utf8-encode-hex", disable_help_flag = true)]
    Utf8EncodeHex {
        /// Codepoints as integers.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Print the terminal width of each codepoint.
    #[command(name = "ucp-term-width", disable_help_flag = true)]
    UcpTermWidth {
        /// Codepoints as integers.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Print the terminal width of each argument.
    #[command(name = "utf8-arg-term-width", disable_help_flag = true)]
    Utf8ArgTermWidth {
        /// Strings to measure.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Stream standard input through a named converter.
    #[command(name = "conv", disable_help_flag = true)]
    Conv {
        /// `hex` or `unhex`.
        #[arg(allow_hyphen_values = true)]
        converter: Option<String>,
    },

    /// Allocate and fill a buffer.
    #[command(name = "alloc-test", disable_help_flag = true)]
    AllocTest {
        /// Size in bytes.
        #[arg(allow_hyphen_values = true)]
        size: Option<String>,
    },
}

/// Result of a command handler: `Err` carries the accumulated failure bits.
pub type Outcome = Result<(), ExitFlags>;

/// The input, output and diagnostic streams of one invocation.
pub struct Streams<'a> {
    pub(crate) input: &'a mut dyn Read,
    pub(crate) out: &'a mut dyn Write,
    pub(crate) err: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    /// Bundles the three streams.
    pub fn new(
        input: &'a mut dyn Read,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
    ) -> Self {
        Self { input, out, err }
    }

    /// Writes to the output sink, reporting a failure once.
    pub(crate) fn output(&mut self, bytes: &[u8]) -> Outcome {
        self.out.write_all(bytes).map_err(|e| {
            debug!(error = %e, "output write failed");
            self.fail(ExitFlags::OUTPUT, "output error")
        })
    }

    /// Writes one `c8: ...` diagnostic line.
    ///
    /// Returns [`ExitFlags::GENERIC`] if the diagnostic itself could not be
    /// written.
    pub(crate) fn report(&mut self, message: impl Display) -> ExitFlags {
        match writeln!(self.err, "{TOOL_NAME}: {message}") {
            Ok(()) => ExitFlags::empty(),
            Err(_) => ExitFlags::GENERIC,
        }
    }

    /// Reports `message` and returns `flag` merged with any reporting failure.
    pub(crate) fn fail(&mut self, flag: ExitFlags, message: impl Display) -> ExitFlags {
        flag | self.report(message)
    }
}

/// Parses `args` (including the program name) and runs the command.
pub fn run<I, T>(args: I, streams: &mut Streams<'_>) -> ExitFlags
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let command = match Cli::try_parse_from(&args) {
        Ok(cli) => cli.command.unwrap_or(Command::Help),
        Err(e) => return parse_failure(streams, &e, &args),
    };

    debug!(?command, "dispatch");
    match command.execute(streams) {
        Ok(()) => ExitFlags::empty(),
        Err(flags) => flags,
    }
}

fn parse_failure(streams: &mut Streams<'_>, e: &clap::Error, args: &[OsString]) -> ExitFlags {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            match streams.output(e.render().to_string().as_bytes()) {
                Ok(()) => ExitFlags::empty(),
                Err(flags) => flags,
            }
        }
        ErrorKind::InvalidSubcommand => {
            let name = args.get(1).map(|a| a.to_string_lossy()).unwrap_or_default();
            streams.fail(ExitFlags::INVOCATION, format_args!("unknown command \"{name}\""))
        }
        _ => {
            let rendered = e.render().to_string();
            let line = rendered.lines().next().unwrap_or("invalid arguments");
            let line = line.strip_prefix("error: ").unwrap_or(line);
            streams.fail(ExitFlags::INVOCATION, line)
        }
    }
}
