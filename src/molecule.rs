use serde::Serialize;

use crate::toolkit::MolHandle;

/// One 3D coordinate assignment for a molecule's atoms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conformer {
    pub elements: Vec<String>,
    pub coordinates: Vec<[f64; 3]>,
}

impl Conformer {
    pub fn new(elements: Vec<String>, coordinates: Vec<[f64; 3]>) -> Self {
        Self {
            elements,
            coordinates,
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.coordinates.len()
    }
}

/// A single molecule variant. A molecule without a toolkit handle is invalid
/// and is discarded by every step that needs the handle.
#[derive(Debug, Clone)]
pub struct Molecule<H> {
    pub handle: Option<H>,
    pub name: String,
    pub input_smiles: String,
    pub container_index: usize,
    pub conformers: Vec<Conformer>,
    /// Provenance log, one entry per transformation applied.
    pub genealogy: Vec<String>,
}

impl<H: MolHandle> Molecule<H> {
    pub fn new(
        handle: Option<H>,
        input_smiles: impl Into<String>,
        name: impl Into<String>,
        container_index: usize,
    ) -> Self {
        let input_smiles = input_smiles.into();
        let genealogy = vec![format!("{} (source)", input_smiles)];

        Self {
            handle,
            name: name.into(),
            input_smiles,
            container_index,
            conformers: Vec::new(),
            genealogy,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    /// Canonical SMILES from the handle, or the input SMILES when there is no
    /// handle to render.
    pub fn smiles(&self) -> String {
        match &self.handle {
            Some(handle) => handle.to_smiles(),
            None => self.input_smiles.clone(),
        }
    }
}

/// Variants of one input record (protonation states, tautomers, ...).
#[derive(Debug, Clone)]
pub struct Container<H> {
    pub index: usize,
    pub orig_smiles: String,
    pub name: String,
    pub mols: Vec<Molecule<H>>,
}

impl<H: MolHandle> Container<H> {
    pub fn new(index: usize, orig_smiles: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index,
            orig_smiles: orig_smiles.into(),
            name: name.into(),
            mols: Vec::new(),
        }
    }

    /// Container holding a single molecule built from its own input record.
    pub fn with_molecule(
        index: usize,
        orig_smiles: impl Into<String>,
        name: impl Into<String>,
        handle: Option<H>,
    ) -> Self {
        let mut container = Self::new(index, orig_smiles, name);
        let mol = Molecule::new(handle, container.orig_smiles.clone(), container.name.clone(), index);
        container.mols.push(mol);
        container
    }

    pub fn add_mol(&mut self, handle: Option<H>, smiles: impl Into<String>) {
        let mol = Molecule::new(handle, smiles, self.name.clone(), self.index);
        self.mols.push(mol);
    }

    pub fn is_empty(&self) -> bool {
        self.mols.is_empty()
    }
}
