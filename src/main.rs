mod checks;
mod commands;
mod core;
mod lint;
mod requirement;
mod specifier;
mod yaml;

use crate::core::config::Mode;
use crate::core::error::{AlphaError, ExitCode, print_error};
use clap::Parser;
use std::path::PathBuf;

/// Verify that RAPIDS packages in dependencies.yaml do (or do not) have the alpha spec
#[derive(Parser)]
#[command(name = "check-alpha-spec")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// dependencies.yaml files to check
  #[arg(required = true)]
  files: Vec<PathBuf>,

  /// Mode to use (development has the alpha spec, release does not)
  #[arg(long, value_enum, default_value_t = Mode::Development)]
  mode: Mode,

  /// Apply fixes to the files in place
  #[arg(long)]
  fix: bool,

  /// Output the report in JSON format
  #[arg(long)]
  json: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  match commands::check::run(&cli.files, cli.mode, cli.fix, cli.json) {
    Ok(true) => {}
    Ok(false) => std::process::exit(ExitCode::Validation.as_i32()),
    Err(err) => handle_error(err),
  }
}

fn handle_error(err: AlphaError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
