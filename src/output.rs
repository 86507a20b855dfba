use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::molecule::{Conformer, Container};
use crate::toolkit::MolHandle;

#[derive(Debug, Serialize)]
pub struct MoleculeRecord<'a> {
    pub container_index: usize,
    pub name: &'a str,
    pub smiles: String,
    pub genealogy: &'a [String],
    pub conformers: &'a [Conformer],
}

/// Writes one JSON object per molecule still held by the containers.
/// Returns how many records were written.
pub fn write_report<H: MolHandle, W: Write>(
    containers: &[Container<H>],
    mut writer: W,
) -> eyre::Result<usize> {
    let mut written = 0;

    for contnr in containers {
        for mol in &contnr.mols {
            let record = MoleculeRecord {
                container_index: contnr.index,
                name: &mol.name,
                smiles: mol.smiles(),
                genealogy: &mol.genealogy,
                conformers: &mol.conformers,
            };

            serde_json::to_writer(&mut writer, &record)?;
            writeln!(writer)?;
            written += 1;
        }
    }

    writer.flush()?;
    Ok(written)
}

pub fn write_report_file<H: MolHandle>(
    containers: &[Container<H>],
    path: impl AsRef<Path>,
) -> eyre::Result<usize> {
    let file = File::create(path)?;
    write_report(containers, BufWriter::new(file))
}
