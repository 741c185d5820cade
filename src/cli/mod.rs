mod handlers;
pub mod parse;

use clap::Parser;
pub use parse::Cli;
use tracing::Level;

use crate::core::error::PlotError;
use handlers::XyKind;

/// Parse the command line and run the chosen subcommand.
pub fn run() -> Result<(), PlotError> {
    let cli = parse::Cli::parse();
    init_tracing(cli.debug);
    match cli.cmd {
        parse::Command::Line(a) => handlers::xy(XyKind::Line, &a),
        parse::Command::Scatter(a) => handlers::xy(XyKind::Scatter, &a),
        parse::Command::Density(a) => handlers::xy(XyKind::Density, &a),
        parse::Command::Bar(a) => handlers::bar(&a),
        parse::Command::Heatmap(a) => handlers::heatmap(&a),
        parse::Command::Box(a) => handlers::boxplot(&a),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}

/// Diagnostics go to stderr so they never mix with the plot.
fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
