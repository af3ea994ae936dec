//! Handling the lenstrace CLI
//!
//! This module handles the command line parsing as well as basic information (e.g. help dialog, version information, etc.).
use crate::error::{TraceError, TraceResult};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// errors only
    Error,
    /// errors and warnings
    Warn,
    /// general progress information
    Info,
    /// detailed tracing information
    Debug,
    /// everything
    Trace,
}
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Command line arguments as parsed by clap.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// scene description (.yaml, .yml or .json). The built-in default scene is used if omitted
    #[arg(short, long)]
    config: Option<String>,

    /// image file to be written (.png or .svg)
    #[arg(short, long, default_value = "out.png")]
    output: String,

    /// override the maximum number of surface interactions per ray
    #[arg(short, long)]
    max_bounces: Option<usize>,

    /// logging level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

/// Validated command line arguments of the lenstrace application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// file path of the scene description, if any
    pub config: Option<PathBuf>,
    /// file path of the rendered image
    pub output: PathBuf,
    /// bounce limit overriding the scene setting
    pub max_bounces: Option<usize>,
    /// maximum log level
    pub log_level: LevelFilter,
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Checks if the passed scene file path is valid.
fn config_path_is_valid(path: &Path) -> bool {
    path.is_file() && has_extension(path, &["yaml", "yml", "json"])
}

impl TryFrom<PartialArgs> for Args {
    type Error = TraceError;

    fn try_from(part_args: PartialArgs) -> TraceResult<Self> {
        let config = match part_args.config {
            Some(c) => {
                let path = PathBuf::from(c);
                if !config_path_is_valid(&path) {
                    return Err(TraceError::Console(format!(
                        "invalid scene file {}: must be an existing .yaml, .yml or .json file",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => None,
        };
        let output = PathBuf::from(part_args.output);
        if !has_extension(&output, &["png", "svg"]) {
            return Err(TraceError::Console(format!(
                "invalid output file {}: must be a .png or .svg file",
                output.display()
            )));
        }
        Ok(Self {
            config,
            output,
            max_bounces: part_args.max_bounces,
            log_level: part_args.log_level.into(),
        })
    }
}
impl Args {
    /// Parse and validate the command line of the current process.
    ///
    /// # Errors
    ///
    /// This function returns an error if the scene file or the output file are invalid.
    pub fn from_cli() -> TraceResult<Self> {
        Self::try_from(PartialArgs::parse())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> TraceResult<Args> {
        let partial = PartialArgs::try_parse_from(std::iter::once("lenstrace").chain(args.iter().copied()))
            .map_err(|e| TraceError::Console(e.to_string()))?;
        Args::try_from(partial)
    }
    #[test]
    fn log_level() {
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::Info);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::Debug);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.max_bounces, None);
        assert_eq!(args.log_level, LevelFilter::Info);
    }
    #[test]
    fn all_options() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("scene.yaml");
        std::fs::write(&config, "max_bounces: 3\n").unwrap();
        let config_str = config.to_str().unwrap();
        let args = parse(&[
            "--config",
            config_str,
            "-o",
            "scene.SVG",
            "--max-bounces",
            "5",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.config, Some(config));
        assert_eq!(args.output, PathBuf::from("scene.SVG"));
        assert_eq!(args.max_bounces, Some(5));
        assert_eq!(args.log_level, LevelFilter::Debug);
    }
    #[test]
    fn invalid_config() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert_matches!(
            parse(&["-c", missing.to_str().unwrap()]),
            Err(TraceError::Console(_))
        );
        let wrong_ext = dir.path().join("scene.toml");
        std::fs::write(&wrong_ext, "").unwrap();
        assert!(parse(&["-c", wrong_ext.to_str().unwrap()]).is_err());
    }
    #[test]
    fn invalid_output() {
        assert_matches!(parse(&["-o", "out.jpg"]), Err(TraceError::Console(_)));
        assert!(parse(&["-o", "out"]).is_err());
    }
    #[test]
    fn invalid_values() {
        assert!(parse(&["--max-bounces", "-1"]).is_err());
        assert!(parse(&["--log-level", "verbose"]).is_err());
    }
}
