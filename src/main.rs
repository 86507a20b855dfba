use chemprep::command_line::{convert_3d, validate};
use clap::Command;
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = Command::new("chemprep")
        .about("Small-molecule preparation: SMILES to 3D conformers")
        .subcommand_required(true)
        .subcommand(convert_3d::command())
        .subcommand(validate::command())
        .get_matches();

    match matches.subcommand() {
        Some((convert_3d::NAME, sub_matches)) => convert_3d::action(sub_matches),
        Some((validate::NAME, sub_matches)) => validate::action(sub_matches),
        Some((other, _)) => Err(eyre::eyre!("Unknown subcommand: {}", other)),
        None => Err(eyre::eyre!("No subcommand given")),
    }
}
