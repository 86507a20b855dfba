use crate::command_line::prelude::*;
use crate::input::load_containers;
use crate::toolkit::MolHandle;

pub const NAME: &str = "validate";

pub fn command() -> Command {
    Command::new(NAME)
        .about("Report which inputs would be discarded before 3D embedding")
        .arg(
            Arg::new("input")
                .required(true)
                .long("input")
                .short('i')
                .num_args(1),
        )
}

pub fn action(matches: &ArgMatches) -> eyre::Result<()> {
    let input_path = matches
        .get_one::<String>("input")
        .ok_or(eyre::eyre!("Failed to extract input path"))?;

    let mut containers = load_containers(input_path)?;

    let mut unparsable = 0;
    let mut bizarre = 0;
    let mut total = 0;
    for mol in containers.iter_mut().flat_map(|c| c.mols.iter_mut()) {
        total += 1;
        match mol.handle.as_mut() {
            None => {
                unparsable += 1;
                log::warn!("{} ({}) could not be parsed", mol.input_smiles, mol.name);
            }
            Some(handle) => {
                handle.sanitize();
                if handle.has_bizarre_substructure() {
                    bizarre += 1;
                    log::warn!(
                        "{} ({}) has an improbable substructure",
                        handle.to_smiles(),
                        mol.name
                    );
                }
            }
        }
    }

    log::info!(
        "{} molecules checked: {} unparsable, {} with improbable substructures",
        total,
        unparsable,
        bizarre
    );

    Ok(())
}
