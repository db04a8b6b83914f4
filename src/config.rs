use std::ffi::OsString;
use std::fmt;
use std::iter;

use clap::{Parser, ValueEnum};

use crate::{Error, Result};

/// How the all-pairs table is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// The five-vertex hand-checkable graph, sequentially
    Small,
    /// One source after another on a single thread
    Sequential,
    /// Sources spread over the rayon pool
    Parallel,
    /// Fixed worker group with row partition and gather
    Distributed,
}

/// How the finished table is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    /// Timing only
    None,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::Small => "small",
            RunMode::Sequential => "sequential",
            RunMode::Parallel => "parallel",
            RunMode::Distributed => "distributed",
        };
        f.write_str(name)
    }
}

/// Configuration for one all-pairs run
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "apsp", about = "All-pairs shortest paths with Dijkstra", version)]
pub struct RunConfig {
    #[arg(long, value_enum, default_value_t = RunMode::Sequential)]
    pub mode: RunMode,
    /// Vertices in the generated graph
    #[arg(long = "vertices", default_value_t = 1024)]
    pub vertex_count: usize,
    /// Largest edge weight drawn by the generator
    #[arg(long, default_value_t = 20)]
    pub max_weight: u32,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Ranks in the distributed worker group
    #[arg(long, default_value_t = 4)]
    pub workers: usize,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Sequential,
            vertex_count: 1024,
            max_weight: 20,
            seed: 42,
            workers: 4,
            output: OutputFormat::Text,
        }
    }
}

impl RunConfig {
    /// Parses command line flags on top of the defaults
    ///
    /// `args` excludes the program name. Parse failures, including a request
    /// for `--help`, come back as [`Error::InvalidConfig`].
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv = iter::once(OsString::from("apsp")).chain(args.into_iter().map(Into::into));
        let config =
            RunConfig::try_parse_from(argv).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_weight == 0 {
            return Err(Error::InvalidWeightBound);
        }
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        RunConfig::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = RunConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.vertex_count, 1024);
        assert_eq!(config.max_weight, 20);
    }

    #[test]
    fn test_all_flags() {
        let config = RunConfig::from_args(args(&[
            "--mode", "distributed", "--vertices", "64", "--max-weight", "7",
            "--seed", "9", "--workers", "3", "--output", "json",
        ]))
        .unwrap();
        assert_eq!(config.mode, RunMode::Distributed);
        assert_eq!(config.vertex_count, 64);
        assert_eq!(config.max_weight, 7);
        assert_eq!(config.seed, 9);
        assert_eq!(config.workers, 3);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            RunConfig::from_args(args(&["--mode", "mpi"])),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RunConfig::from_args(args(&["--vertices"])),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RunConfig::from_args(args(&["--vertices", "-3"])),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RunConfig::from_args(args(&["--workers", "0"])),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RunConfig::from_args(args(&["--max-weight", "0"])),
            Err(Error::InvalidWeightBound)
        ));
        assert!(matches!(
            RunConfig::from_args(args(&["--verbose"])),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            RunConfig::from_args(args(&["--help"])),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_equals_form_and_mode_display() {
        let config = RunConfig::from_args(args(&["--mode=parallel", "--output=none"])).unwrap();
        assert_eq!(config.mode, RunMode::Parallel);
        assert_eq!(config.output, OutputFormat::None);
        assert_eq!(config.mode.to_string(), "parallel");
    }
}
