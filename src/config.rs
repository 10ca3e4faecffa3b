use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;

use crate::{
    cli::{Args, Mode, OutputFormat},
    format::ReadFormat,
    input::Input,
    kmer::{KmerLength, Windowing},
};

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: Input,
    pub mode: Mode,
    pub k: KmerLength,
    pub min_contig_len: usize,
    pub windowing: Windowing,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub input_format: ReadFormat,
}

impl Config {
    /// Validates parsed command-line arguments into a run config.
    pub fn from_args(args: &Args) -> Result<Config, Box<dyn Error>> {
        Ok(Config {
            input: checked_input(&args.path)?,
            mode: args.mode,
            k: KmerLength::new(args.k)?,
            min_contig_len: args.min_contig_len,
            windowing: if args.full_windows {
                Windowing::Full
            } else {
                Windowing::ExcludeFinal
            },
            out_dir: args.out_dir.clone(),
            format: args.format,
            input_format: args.input_format,
        })
    }
}

fn checked_input(path: &Path) -> Result<Input, Box<dyn Error>> {
    let input = Input::from_path(path);
    if let Some(path) = input.as_path() {
        if let Err(e) = fs::metadata(path) {
            return Err(format!("Issue with file path: {}", e.to_string().bold()).into());
        }
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::NamedTempFile;

    #[test]
    fn from_args_maps_flags() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "kontig",
            path,
            "g",
            "5",
            "--full-windows",
            "-f",
            "json",
            "-o",
            "out",
        ])
        .unwrap();

        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.mode, Mode::Filter);
        assert_eq!(config.k.get(), 5);
        assert_eq!(config.windowing, Windowing::Full);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(!config.input.is_stdin());
    }

    #[test]
    fn missing_file_is_rejected() {
        let args = Args::try_parse_from(["kontig", "/no/such/reads.txt", "c", "3"]).unwrap();
        let err = Config::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("Issue with file path"));
    }

    #[test]
    fn stdin_needs_no_file() {
        let args = Args::try_parse_from(["kontig", "-", "contigs", "3"]).unwrap();
        let config = Config::from_args(&args).unwrap();
        assert!(config.input.is_stdin());
        assert_eq!(config.windowing, Windowing::ExcludeFinal);
        assert_eq!(config.min_contig_len, crate::traverse::DEFAULT_MIN_CONTIG_LEN);
    }
}
