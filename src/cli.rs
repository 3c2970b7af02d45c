// SPDX-License-Identifier: MPL-2.0
//! Command-line arguments for the `avatar-crop` binary.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;

pub const HELP: &str = "\
avatar-crop: crop an image into a square avatar

USAGE:
    avatar-crop [OPTIONS] <IMAGE>

OPTIONS:
    --zoom <PCT>           Zoom percentage, clamped to the configured range
    --drag <DX,DY>         Pan by a pointer drag of DX,DY preview pixels (repeatable)
    --output <FILE>        Write the exported JPEG to FILE
    --upload <SERVER_URL>  Upload the avatar to SERVER_URL/profile/upload-avatar
                           (defaults to server_url from settings when a token is given)
    --csrf-token <TOKEN>   Anti-forgery token sent with the upload
    --csrf-page <FILE>     Saved profile page to read the anti-forgery token from
    --cookie <COOKIE>      Cookie header carrying the session for the upload
    --config <FILE>        Settings file (defaults to the user config directory)
    -v, --verbose          More logging; repeat for trace output
    -q, --quiet            Only log errors
    -h, --help             Print this help
";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub image: Option<PathBuf>,
    pub zoom: Option<f32>,
    pub drags: Vec<(f32, f32)>,
    pub output: Option<PathBuf>,
    pub upload: Option<String>,
    pub csrf_token: Option<String>,
    pub csrf_page: Option<PathBuf>,
    pub cookie: Option<String>,
    pub config: Option<PathBuf>,
    pub verbose: u8,
    pub quiet: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses the process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed or unexpected arguments.
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    /// Parses an explicit argument list (without the program name).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed or unexpected arguments.
    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let mut parsed = Self {
            help: args.contains(["-h", "--help"]),
            quiet: args.contains(["-q", "--quiet"]),
            ..Self::default()
        };
        while args.contains(["-v", "--verbose"]) {
            parsed.verbose = parsed.verbose.saturating_add(1);
        }

        parsed.zoom = args.opt_value_from_str("--zoom").map_err(cli_error)?;
        parsed.drags = args
            .values_from_fn("--drag", parse_drag)
            .map_err(cli_error)?;
        parsed.output = args.opt_value_from_str("--output").map_err(cli_error)?;
        parsed.upload = args.opt_value_from_str("--upload").map_err(cli_error)?;
        parsed.csrf_token = args
            .opt_value_from_str("--csrf-token")
            .map_err(cli_error)?;
        parsed.csrf_page = args.opt_value_from_str("--csrf-page").map_err(cli_error)?;
        parsed.cookie = args.opt_value_from_str("--cookie").map_err(cli_error)?;
        parsed.config = args.opt_value_from_str("--config").map_err(cli_error)?;
        parsed.image = args.opt_free_from_str().map_err(cli_error)?;

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(Error::Config(format!("unexpected arguments: {rest:?}")));
        }
        Ok(parsed)
    }
}

fn cli_error(err: pico_args::Error) -> Error {
    Error::Config(err.to_string())
}

/// Parses a `DX,DY` pair.
fn parse_drag(value: &str) -> std::result::Result<(f32, f32), String> {
    let (dx, dy) = value
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid drag component '{part}'"))
    };
    Ok((parse(dx)?, parse(dy)?))
}
