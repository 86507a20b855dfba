use crate::molecule::Conformer;

pub mod mol_block;
#[cfg(feature = "python-embedding")]
pub mod python_embedder;
pub mod rdkit;

/// Native molecule handle provided by a chemistry toolkit.
pub trait MolHandle: Send {
    /// Canonical SMILES.
    fn to_smiles(&self) -> String;

    /// Normalizes the handle in place before substructure checks.
    fn sanitize(&mut self);

    /// Whether the molecule contains improbable substructures. Does not
    /// modify the handle.
    fn has_bizarre_substructure(&self) -> bool;
}

/// Generates 3D conformers for a handle without minimizing them.
pub trait ConformerEmbedder<H>: Sync {
    /// Returns the generated conformers; an empty vec means embedding failed.
    fn embed_unminimized(&self, mol: &H) -> eyre::Result<Vec<Conformer>>;
}
