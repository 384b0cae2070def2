use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::Path;

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        println!("Verbose: {}", msg);
    }
}

fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Log to stderr. Used by the CLI.
pub fn init_term_logger(verbose: bool) {
    let config = ConfigBuilder::new()
        .add_filter_allow_str("bookclub")
        .build();
    // A second init (tests, embedding) keeps the first logger.
    let _ = TermLogger::init(
        level_for(verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Log to a file. Used by the TUI so output does not corrupt the alternate screen.
pub fn init_file_logger(path: &Path, verbose: bool) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let config = ConfigBuilder::new()
        .add_filter_allow_str("bookclub")
        .build();
    let _ = WriteLogger::init(level_for(verbose), config, file);
    Ok(())
}
