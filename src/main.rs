// Entrypoint for the backlog CLI.
// - Keeps `main` small: read flags and environment, set up logging, build
//   the app and hand it to the menu loop.

use backlog_cli::{
    cli::Args,
    config::Config,
    logging,
    ui::{main_menu, App},
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.debug);

    // Service URLs and timeout come from the environment, see `Config::from_env`.
    let config = Config::from_env()?;
    let app = App::new(&config, &args)?;

    // Blocks until the user picks "Quit".
    main_menu(app)?;
    Ok(())
}
