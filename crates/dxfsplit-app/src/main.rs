//! dxfsplit 命令行入口
//! 读取一张DXF图纸，按图层名拆分为多个独立的DXF文件

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use dxfsplit_file::{ErrorKind, LayerSet, SplitError};

mod commands;
mod config;

use config::SplitConfig;

#[derive(Debug, Parser)]
#[command(name = "dxfsplit", version, about = "Split a DXF drawing into files by layer")]
struct Cli {
    /// 配置文件路径（默认查找 $DXFSPLIT_CONFIG 或 ./config/dxfsplit.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 日志级别，覆盖配置文件
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 按配置的输出项拆分图纸
    Split {
        input: PathBuf,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// 以JSON输出结果
        #[arg(long)]
        json: bool,
    },
    /// 移出指定图层上的实体并保存剩余部分
    Strip {
        input: PathBuf,
        #[arg(short, long = "layer", required = true)]
        layers: Vec<String>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// 列出模型空间图层及实体数量
    Layers {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    if let Err(e) = init_logging(level) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn load_configuration(cli: &Cli) -> Result<SplitConfig> {
    match &cli.config {
        Some(path) => SplitConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => SplitConfig::discover().context("discovering config"),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let level = Level::from_str(level).with_context(|| format!("invalid log level `{level}`"))?;
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )?;
    Ok(())
}

fn run(command: Command, config: &SplitConfig) -> Result<()> {
    match command {
        Command::Split {
            input,
            output_dir,
            json,
        } => {
            let report = commands::split(&input, &config.outputs, &output_dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for output in &report.outputs {
                    match &output.file {
                        Some(file) => println!(
                            "{}: {} entities -> {}",
                            output.name,
                            output.entities,
                            file.display()
                        ),
                        None => println!("{}: no entities found", output.name),
                    }
                }
            }
        }
        Command::Strip {
            input,
            layers,
            output,
        } => {
            let layers: LayerSet = layers.into_iter().collect();
            let report = commands::strip(&input, &layers, &output)?;
            println!(
                "Removed {} entities, {} remaining -> {}",
                report.removed,
                report.remaining,
                report.output.display()
            );
        }
        Command::Layers { input, json } => {
            let usage = commands::layers(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&usage)?);
            } else {
                for entry in &usage {
                    println!("{:>8}  {}", entry.entities, entry.layer);
                }
            }
        }
    }
    Ok(())
}

/// 面向用户的错误提示
fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<SplitError>().map(SplitError::kind) {
        Some(ErrorKind::Input) => format!("The DXF file was not provided or is empty: {err}"),
        Some(ErrorKind::Parse) => format!("Error while reading the DXF file: {err}"),
        Some(ErrorKind::Persistence) => format!("Error while saving the DXF file: {err}"),
        None => format!("Error: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_strip() {
        let cli = Cli::try_parse_from([
            "dxfsplit", "strip", "in.dxf", "-l", "A", "--layer", "B", "-o", "out.dxf",
        ])
        .expect("parse");

        match cli.command {
            Command::Strip { layers, output, .. } => {
                assert_eq!(layers, vec!["A", "B"]);
                assert_eq!(output, PathBuf::from("out.dxf"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_strip_requires_layers() {
        assert!(Cli::try_parse_from(["dxfsplit", "strip", "in.dxf", "-o", "out.dxf"]).is_err());
    }

    #[test]
    fn test_user_message_by_kind() {
        let err = anyhow::Error::new(SplitError::Parse("unexpected end of input".into()));
        assert!(user_message(&err).starts_with("Error while reading"));

        let err = anyhow::Error::new(SplitError::EmptyInput);
        assert!(user_message(&err).starts_with("The DXF file was not provided"));
    }
}
