use std::io::Write;

use chemprep::config::{ConversionParams, ExecutionMode};
use chemprep::input::{load_containers, load_sdf_gz, load_smi};
use chemprep::molecule::Conformer;
use chemprep::output::write_report;
use chemprep::parallel::RayonParallelizer;
use chemprep::selection::KeepBestPerContainer;
use chemprep::threed::convert_2d_to_3d;
use chemprep::toolkit::rdkit::RdkitMol;
use chemprep::toolkit::{ConformerEmbedder, MolHandle};
use tempdir::TempDir;

/// Puts every heavy atom of the canonical SMILES on the x axis.
struct LinearEmbedder;

impl ConformerEmbedder<RdkitMol> for LinearEmbedder {
    fn embed_unminimized(&self, mol: &RdkitMol) -> eyre::Result<Vec<Conformer>> {
        let elements = mol
            .to_smiles()
            .chars()
            .filter(|c| c.is_ascii_uppercase())
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        let coordinates = (0..elements.len())
            .map(|i| [1.5 * i as f64, 0.0, 0.0])
            .collect();

        Ok(vec![Conformer::new(elements, coordinates)])
    }
}

fn write_smi(dir: &TempDir, contents: &str) -> eyre::Result<std::path::PathBuf> {
    let path = dir.path().join("input.smi");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

#[test]
fn test_bizarre_substructures() -> eyre::Result<()> {
    for smiles in ["O=O", "[O-][O-]", "C[NH+]=[NH+]C"] {
        let mut mol = RdkitMol::from_smiles(smiles)?;
        mol.sanitize();
        assert!(mol.has_bizarre_substructure(), "{} should be bizarre", smiles);
    }

    for smiles in ["CCO", "c1ccccc1C(=O)O", "C[N+](C)(C)C", "[N-]=[N+]=N"] {
        let mut mol = RdkitMol::from_smiles(smiles)?;
        mol.sanitize();
        assert!(!mol.has_bizarre_substructure(), "{} should be fine", smiles);
    }

    Ok(())
}

#[test]
fn test_load_smi() -> eyre::Result<()> {
    let dir = TempDir::new("chemprep")?;
    let path = write_smi(&dir, "# comment\nOCC ethanol\n\nC1CC\nCC(=O)O acetic acid\n")?;

    let containers = load_smi(&path)?;

    assert_eq!(containers.len(), 3);
    assert_eq!(containers[0].name, "ethanol");
    assert_eq!(containers[0].mols[0].smiles(), "CCO");
    assert_eq!(containers[1].name, "untitled_1");
    assert!(!containers[1].mols[0].is_valid());
    assert_eq!(containers[2].name, "acetic acid");
    assert_eq!(containers[2].index, 2);
    Ok(())
}

#[test]
fn test_load_sdf_gz_skips_unreadable_records() -> eyre::Result<()> {
    let containers = load_containers("tests/data/small.sdf.gz")?;

    assert_eq!(containers.len(), 2);
    assert_eq!(
        containers.iter().map(|c| c.index).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert_eq!(
        containers.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["ethanol", "methane"]
    );
    assert_eq!(containers[0].mols[0].name, "ethanol");
    assert_eq!(containers[0].mols[0].smiles(), "CCO");
    assert_eq!(containers[1].mols[0].smiles(), "C");
    Ok(())
}

#[test]
fn test_load_sdf_gz_missing_file() {
    assert!(load_sdf_gz("tests/data/does_not_exist.sdf.gz").is_err());
}

#[test]
fn test_end_to_end_conversion() -> eyre::Result<()> {
    let dir = TempDir::new("chemprep")?;
    let path = write_smi(&dir, "OCC ethanol\nO=O oxygen\nC1CC broken\n")?;
    let mut containers = load_containers(&path)?;

    let params = ConversionParams {
        num_workers: 2,
        mode: ExecutionMode::Multithreading,
        ..ConversionParams::default()
    };
    convert_2d_to_3d(
        &mut containers,
        &params,
        &RayonParallelizer,
        &LinearEmbedder,
        &KeepBestPerContainer::default(),
    )?;

    assert_eq!(containers[0].mols.len(), 1);
    assert!(containers[1].mols.is_empty());
    assert!(containers[2].mols.is_empty());

    let ethanol = &containers[0].mols[0];
    assert_eq!(
        ethanol.genealogy,
        vec!["OCC (source)", "CCO (3D coordinates assigned)"]
    );
    assert_eq!(ethanol.conformers[0].num_atoms(), 3);

    let mut report = Vec::new();
    let written = write_report(&containers, &mut report)?;
    assert_eq!(written, 1);

    let record: serde_json::Value = serde_json::from_slice(&report)?;
    assert_eq!(record["name"], "ethanol");
    assert_eq!(record["smiles"], "CCO");
    assert_eq!(record["conformers"][0]["coordinates"][2][0], 3.0);
    Ok(())
}
