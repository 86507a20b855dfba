use bio_files::Sdf;

use crate::molecule::Conformer;

/// Builds a conformer from the atom block of a mol block.
pub fn conformer_from_mol_block(mol_block: &str) -> eyre::Result<Conformer> {
    let sdf = Sdf::new(mol_block)?;

    let elements = sdf
        .atoms
        .iter()
        .map(|atom| atom.element.to_letter().to_string())
        .collect();
    let coordinates = sdf
        .atoms
        .iter()
        .map(|atom| [atom.posit.x, atom.posit.y, atom.posit.z])
        .collect();

    Ok(Conformer::new(elements, coordinates))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = "water
     RDKit          3D

  3  2  0  0  0  0  0  0  0  0999 V2000
    0.0021   -0.0041    0.0020 O   0  0  0  0  0  0  0  0  0  0  0  0
   -0.8669    0.3710   -0.2431 H   0  0  0  0  0  0  0  0  0  0  0  0
    0.8648    0.3669    0.2411 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  1  3  1  0
M  END
";

    #[test]
    fn test_water_conformer() {
        let conformer = conformer_from_mol_block(WATER).unwrap();
        assert_eq!(conformer.num_atoms(), 3);
        assert_eq!(conformer.elements, vec!["O", "H", "H"]);
        assert_eq!(conformer.coordinates[1], [-0.8669, 0.3710, -0.2431]);
    }

    #[test]
    fn test_truncated_block() {
        let truncated = WATER.lines().take(5).collect::<Vec<_>>().join("\n");
        assert!(conformer_from_mol_block(&truncated).is_err());
    }
}
