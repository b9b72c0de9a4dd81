use clap::Parser;
use radclock::config;
use radclock::gui::app::AppModel;
use radclock::gui::clock::State;
use radclock::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "radclock", version, about, long_about = None)]
struct Cli {
    /// Read the configuration from this file instead of the per-user config
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the default configuration (if missing), print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config(cli.config.as_deref())?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(cli.config.as_deref());
    let state = State::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(cli.config.clone(), tx);

    // GTK must not see our own flags
    let app = RelmApp::new("org.radclock.RadClock").with_args(Vec::new());

    app.run::<AppModel>((state, cli.config, rx));
    Ok(())
}
