#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod aligner;
mod classify;
mod cli;
mod config;
mod error;
mod output;
mod sam;
mod sniff;
mod utils;

fn main() -> anyhow::Result<()> {
    // Set up configuration from CLI
    let cfg = config::handle_cli()?;
    debug!("{:?}", cfg);

    // Align, count and classify
    let mut aligner = aligner::Minimap2::new();
    let stdout = std::io::stdout();
    sniff::sniff(&cfg, &mut aligner, &mut stdout.lock())?;
    Ok(())
}
