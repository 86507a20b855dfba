use crate::config::ConversionParams;
use crate::molecule::{Container, Molecule};
use crate::parallel::{strip_none, Parallelizer};
use crate::selection::VariantSelector;
use crate::toolkit::{ConformerEmbedder, MolHandle};

/// Outcome of embedding a single molecule.
#[derive(Debug)]
pub enum Embedding<H> {
    Embedded(Molecule<H>),
    Discarded,
}

impl<H> Embedding<H> {
    pub fn into_molecule(self) -> Option<Molecule<H>> {
        match self {
            Embedding::Embedded(mol) => Some(mol),
            Embedding::Discarded => None,
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Embedding::Discarded)
    }
}

/// Converts every molecule of every container to 3D, then lets `selector`
/// decide which embedded variants each container keeps.
///
/// Molecules are moved out of the containers for the parallel phase, so the
/// containers are only written to again by the selector once all workers have
/// finished. Molecules that fail to embed are dropped with a warning.
pub fn convert_2d_to_3d<H, P, E, S>(
    containers: &mut [Container<H>],
    params: &ConversionParams,
    parallelizer: &P,
    embedder: &E,
    selector: &S,
) -> eyre::Result<()>
where
    H: MolHandle,
    P: Parallelizer,
    E: ConformerEmbedder<H>,
    S: VariantSelector<H>,
{
    log::info!("Converting all molecules to 3D structures.");

    let work_items = containers
        .iter_mut()
        .flat_map(|contnr| contnr.mols.drain(..))
        .collect::<Vec<_>>();
    let num_submitted = work_items.len();

    let results = parallelizer.run(
        work_items,
        |mol| parallel_make_3d(mol, embedder),
        params.num_workers,
        params.mode,
    )?;

    let embedded = strip_none(
        results
            .into_iter()
            .map(Embedding::into_molecule)
            .collect(),
    );

    log::debug!(
        "{} of {} molecules were embedded",
        embedded.len(),
        num_submitted
    );

    selector.select(
        containers,
        embedded,
        params.max_variants_per_compound,
        params.thoroughness,
    );

    Ok(())
}

/// Assigns 3D coordinates to one molecule. Runs inside the worker pool and
/// touches nothing but its own argument.
pub fn parallel_make_3d<H, E>(mut mol: Molecule<H>, embedder: &E) -> Embedding<H>
where
    H: MolHandle,
    E: ConformerEmbedder<H>,
{
    let embedded = match mol.handle.as_mut() {
        None => false,
        Some(handle) => {
            handle.sanitize();

            if handle.has_bizarre_substructure() {
                false
            } else {
                match embedder.embed_unminimized(handle) {
                    Ok(conformers) => {
                        mol.conformers = conformers;
                        !mol.conformers.is_empty()
                    }
                    Err(e) => {
                        log::debug!("embedding {} raised: {:?}", mol.name, e);
                        false
                    }
                }
            }
        }
    };

    if embedded {
        let smiles = mol.smiles();
        mol.genealogy
            .push(format!("{} (3D coordinates assigned)", smiles));
        Embedding::Embedded(mol)
    } else {
        log::warn!(
            "Warning: Could not generate 3D geometry for {} ({}). Molecule discarded.",
            mol.smiles(),
            mol.name
        );
        Embedding::Discarded
    }
}
