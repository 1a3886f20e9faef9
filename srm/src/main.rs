// srm/src/main.rs
//! srm entry point.

use anyhow::Context;
use clap::Parser;
use std::process;

use srm::cli::Cli;
use srm::commands::delete::{run_delete, EXIT_FAILURE, EXIT_INVALID_CONFIG};
use srm::logger;
use srm::ui::output_format::error_msg;
use srm::ui::theme::{build_theme_map, ThemeStyle};

fn main() {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level());

    let theme = match build_theme_map(cli.theme.as_deref()).context("Theme error") {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            process::exit(EXIT_INVALID_CONFIG);
        }
    };

    let code = match run_delete(&cli, &theme) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme);
            EXIT_FAILURE
        }
    };
    process::exit(code);
}
