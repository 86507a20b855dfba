use pyo3::prelude::*;
use pyo3::types::{PyDict, PyModule};

use crate::molecule::Conformer;
use crate::toolkit::mol_block::conformer_from_mol_block;
use crate::toolkit::rdkit::RdkitMol;
use crate::toolkit::{ConformerEmbedder, MolHandle};

/// Embeds one conformer with RDKit's ETKDG through the Python bindings.
/// Hydrogens are added first and the geometry is not minimized.
pub struct PythonRdkitEmbedder {
    pub random_seed: i64,
}

impl PythonRdkitEmbedder {
    pub fn new(random_seed: i64) -> Self {
        Self { random_seed }
    }

    fn embedded_mol_block(&self, smiles: &str) -> PyResult<Option<String>> {
        Python::with_gil(|py| {
            let chem = PyModule::import_bound(py, "rdkit.Chem")?;
            let all_chem = PyModule::import_bound(py, "rdkit.Chem.AllChem")?;

            let mol = chem.call_method1("MolFromSmiles", (smiles,))?;
            if mol.is_none() {
                return Ok(None);
            }
            let mol_with_hs = chem.call_method1("AddHs", (mol,))?;

            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("randomSeed", self.random_seed)?;
            let conf_id: i32 = all_chem
                .call_method("EmbedMolecule", (&mol_with_hs,), Some(&kwargs))?
                .extract()?;
            if conf_id < 0 {
                return Ok(None);
            }

            let mol_block: String = chem.call_method1("MolToMolBlock", (mol_with_hs,))?.extract()?;
            Ok(Some(mol_block))
        })
    }
}

impl ConformerEmbedder<RdkitMol> for PythonRdkitEmbedder {
    fn embed_unminimized(&self, mol: &RdkitMol) -> eyre::Result<Vec<Conformer>> {
        match self.embedded_mol_block(&mol.to_smiles())? {
            Some(mol_block) => Ok(vec![conformer_from_mol_block(&mol_block)?]),
            None => Ok(Vec::new()),
        }
    }
}
