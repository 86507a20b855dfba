use std::fmt;

use rdkit::{set_hybridization, substruct_match, ROMol, SubstructMatchParameters, RWMol};

use crate::toolkit::MolHandle;

/// Substructures that only show up as artifacts of protonation or tautomer
/// enumeration.
pub const BIZARRE_SMARTS: [&str; 5] = [
    "[#8]=[#8]",
    "[#8-][#8-]",
    "[#7-][#7-]",
    "[#7+]~[#7+]",
    "[#6]=[#7;X2]=[#8]",
];

pub fn parse_smarts(smarts: &str) -> eyre::Result<ROMol> {
    let pattern =
        RWMol::from_smarts(smarts).map_err(|e| eyre::eyre!("bad smarts {}: {}", smarts, e))?;
    Ok(pattern.to_ro_mol())
}

#[derive(Clone)]
pub struct RdkitMol {
    romol: ROMol,
}

impl RdkitMol {
    pub fn from_smiles(smiles: &str) -> eyre::Result<Self> {
        let romol = ROMol::from_smiles(smiles)?;
        Ok(Self { romol })
    }

    pub fn from_romol(romol: ROMol) -> Self {
        Self { romol }
    }
}

impl fmt::Debug for RdkitMol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RdkitMol").field(&self.romol.as_smiles()).finish()
    }
}

impl MolHandle for RdkitMol {
    fn to_smiles(&self) -> String {
        self.romol.as_smiles()
    }

    fn sanitize(&mut self) {
        self.romol.update_property_cache(false);
        set_hybridization(&mut self.romol);
    }

    fn has_bizarre_substructure(&self) -> bool {
        let params = SubstructMatchParameters::default();

        // ROMol is not Sync, so patterns are parsed per call rather than shared
        for smarts in BIZARRE_SMARTS {
            let pattern = match parse_smarts(smarts) {
                Ok(pattern) => pattern,
                Err(e) => {
                    log::error!("{:?}", e);
                    continue;
                }
            };

            if !substruct_match(&self.romol, &pattern, &params).is_empty() {
                return true;
            }
        }

        false
    }
}
