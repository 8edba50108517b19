use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use anyhow::Context;
use clap::Parser;
use cli::{GlobalArgs, IoArgs, LogLevel};
use env_logger::Target;
use log::{error, LevelFilter};
use nad_fn_core::function::{self, resource_list::ResourceList};
use output::CliWrite;

use crate::cli::Cli;

mod cli;
mod output;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    configure_logging(&cli.global_args);

    let mut resource_list = read_resource_list(cli.io_args.input.as_deref())?;
    let result = function::run(&mut resource_list);

    match &result {
        Ok(count) => resource_list
            .push_info(format!("generated {count} NetworkAttachmentDefinition(s)")),
        Err(error) => {
            error!("{error}");
            resource_list.push_error(error.to_string());
        }
    }

    write_resource_list(&resource_list, &cli.io_args)?;

    result.context("Couldn't generate the NetworkAttachmentDefinitions!")?;

    Ok(())
}

fn read_resource_list(input: Option<&Path>) -> anyhow::Result<ResourceList> {
    let mut raw = String::new();

    match input {
        Some(path) => {
            File::open(path)
                .and_then(|mut file| file.read_to_string(&mut raw))
                .with_context(|| format!("Couldn't read the input file '{}'!", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut raw)
                .context("Couldn't read the ResourceList from stdin!")?;
        }
    }

    serde_yaml::from_str(&raw).context("Couldn't parse the ResourceList!")
}

fn write_resource_list(resource_list: &ResourceList, io_args: &IoArgs) -> anyhow::Result<()> {
    let mut writer: Box<dyn Write> = match &io_args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Couldn't create the output file '{}'!", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    resource_list
        .write_as(io_args.output_format, &mut writer)
        .context("Couldn't write the ResourceList!")?;
    writer.flush().context("Couldn't write the ResourceList!")?;

    Ok(())
}

fn configure_logging(global_args: &GlobalArgs) {
    let log_level = global_args.get_log_level();
    let mut logger = env_logger::builder();

    logger
        .format_timestamp(None)
        .format_module_path(matches!(log_level, LogLevel::Trace))
        .format_target(false)
        .target(Target::Stderr);

    if let LogLevel::Normal = log_level {
        logger.filter(Some("nad_fn"), LevelFilter::Info);
    }

    if let LogLevel::Verbose = log_level {
        logger.filter(Some("nad_fn"), LevelFilter::Debug);
    }

    if let LogLevel::Trace = log_level {
        logger.filter(None, LevelFilter::Trace);
    }

    logger.init();
}
