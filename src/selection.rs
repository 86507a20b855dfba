use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::molecule::{Container, Molecule};
use crate::toolkit::MolHandle;

/// Decides which variants each container keeps after a pipeline step.
pub trait VariantSelector<H> {
    fn select(
        &self,
        containers: &mut [Container<H>],
        molecules: Vec<Molecule<H>>,
        max_variants_per_compound: usize,
        thoroughness: usize,
    );
}

/// Keeps up to `max_variants_per_compound` distinct variants per container,
/// sampling at random when there are more. No energies are computed, so
/// `thoroughness` has no effect here.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepBestPerContainer {
    pub seed: u64,
}

impl KeepBestPerContainer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl<H: MolHandle> VariantSelector<H> for KeepBestPerContainer {
    fn select(
        &self,
        containers: &mut [Container<H>],
        molecules: Vec<Molecule<H>>,
        max_variants_per_compound: usize,
        _thoroughness: usize,
    ) {
        let positions = containers
            .iter()
            .enumerate()
            .map(|(pos, contnr)| (contnr.index, pos))
            .collect::<HashMap<usize, usize>>();

        let mut grouped: Vec<Vec<Molecule<H>>> = containers.iter().map(|_| Vec::new()).collect();
        let mut seen: Vec<HashSet<String>> = containers.iter().map(|_| HashSet::new()).collect();

        for mol in molecules {
            let Some(&pos) = positions.get(&mol.container_index) else {
                log::debug!(
                    "dropping {} ({}), container {} does not exist",
                    mol.smiles(),
                    mol.name,
                    mol.container_index
                );
                continue;
            };

            if seen[pos].insert(mol.smiles()) {
                grouped[pos].push(mol);
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);

        for (contnr, mols) in containers.iter_mut().zip(grouped) {
            if mols.is_empty() {
                log::warn!(
                    "Warning: No 3D variants were generated for {} ({}).",
                    contnr.orig_smiles,
                    contnr.name
                );
                contnr.mols = Vec::new();
                continue;
            }

            contnr.mols = if mols.len() > max_variants_per_compound {
                let keep = rand::seq::index::sample(&mut rng, mols.len(), max_variants_per_compound)
                    .into_iter()
                    .collect::<HashSet<_>>();

                mols.into_iter()
                    .enumerate()
                    .filter(|(idx, _)| keep.contains(idx))
                    .map(|(_, mol)| mol)
                    .collect()
            } else {
                mols
            };
        }
    }
}
