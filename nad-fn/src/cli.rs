use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global_args: GlobalArgs,
    #[command(flatten)]
    pub io_args: IoArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose_logging: bool,
    /// enable trace output (more detailed than verbose, overrides it if present)
    #[arg(long = "trace")]
    pub trace_logging: bool,
}

impl GlobalArgs {
    pub fn get_log_level(&self) -> LogLevel {
        if self.trace_logging {
            return LogLevel::Trace;
        }

        if self.verbose_logging {
            return LogLevel::Verbose;
        }

        LogLevel::Normal
    }
}

pub enum LogLevel {
    Normal,
    Verbose,
    Trace,
}

#[derive(Debug, Args)]
pub struct IoArgs {
    /// read the ResourceList from a file instead of stdin
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,
    /// write the ResourceList to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// format of the written ResourceList
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
    JsonPretty,
}
