use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::bufread::GzDecoder;
use rdkit::RWMol;

use crate::molecule::Container;
use crate::toolkit::rdkit::RdkitMol;

/// Splits a `.smi` line into its SMILES and optional name. Blank lines and
/// `#` comments yield `None`.
pub fn parse_smi_line(line: &str) -> Option<(String, Option<String>)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.split_whitespace();
    let smiles = fields.next()?.to_string();
    let name = fields.collect::<Vec<_>>().join(" ");
    let name = match name.is_empty() {
        true => None,
        false => Some(name),
    };

    Some((smiles, name))
}

pub fn load_smi(path: impl AsRef<Path>) -> eyre::Result<Vec<Container<RdkitMol>>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut containers = Vec::new();
    for result_line in reader.lines() {
        let line = result_line?;
        let Some((smiles, name)) = parse_smi_line(&line) else {
            continue;
        };

        let index = containers.len();
        let name = name.unwrap_or_else(|| format!("untitled_{}", index));

        let handle = match RdkitMol::from_smiles(&smiles) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::debug!("could not parse {} ({}): {}", smiles, name, e);
                None
            }
        };

        containers.push(Container::with_molecule(index, smiles, name, handle));
    }

    Ok(containers)
}

/// Splits SDF text into mol blocks, keeping each block's title line intact.
pub fn split_sdf_records(text: &str) -> Vec<&str> {
    text.split("$$$$")
        .map(|block| {
            block
                .strip_prefix("\r\n")
                .or_else(|| block.strip_prefix('\n'))
                .unwrap_or(block)
        })
        .filter(|block| !block.trim().is_empty())
        .collect()
}

pub fn load_sdf_gz(path: impl AsRef<Path>) -> eyre::Result<Vec<Container<RdkitMol>>> {
    let file = File::open(path)?;
    let mut text = String::new();
    GzDecoder::new(BufReader::new(file)).read_to_string(&mut text)?;

    let mut containers = Vec::new();
    let mut skipped = 0;
    for (record_idx, block) in split_sdf_records(&text).into_iter().enumerate() {
        let Some(mol) = RWMol::from_mol_block(block, false, false, false) else {
            log::debug!("skipping sdf record {}", record_idx);
            skipped += 1;
            continue;
        };

        let name = match block.lines().next().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("mol_{}", record_idx),
        };

        let romol = mol.to_ro_mol();
        let smiles = romol.as_smiles();
        let index = containers.len();
        containers.push(Container::with_molecule(
            index,
            smiles,
            name,
            Some(RdkitMol::from_romol(romol)),
        ));
    }

    if skipped > 0 {
        log::info!("{} unreadable sdf records were skipped", skipped);
    }

    Ok(containers)
}

/// Loads containers, picking the reader from the file extension.
pub fn load_containers(path: impl AsRef<Path>) -> eyre::Result<Vec<Container<RdkitMol>>> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or(eyre::eyre!("Could not extract input file name"))?
        .to_lowercase();

    if file_name.ends_with(".smi") || file_name.ends_with(".can") {
        load_smi(path)
    } else if file_name.ends_with(".sdf.gz") {
        load_sdf_gz(path)
    } else {
        Err(eyre::eyre!("Unsupported input format: {}", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_smi_line() {
        assert_eq!(
            parse_smi_line("CCO ethanol"),
            Some(("CCO".to_string(), Some("ethanol".to_string())))
        );
        assert_eq!(
            parse_smi_line("  CC(=O)O\tacetic acid "),
            Some(("CC(=O)O".to_string(), Some("acetic acid".to_string())))
        );
        assert_eq!(parse_smi_line("C"), Some(("C".to_string(), None)));
        assert_eq!(parse_smi_line("   "), None);
        assert_eq!(parse_smi_line("# header"), None);
    }

    #[test]
    fn test_split_sdf_records_keeps_blank_titles() {
        let text = "first\n  prog\n\nbody\n$$$$\n\n  prog\n\nbody\n$$$$\n";
        let records = split_sdf_records(text);

        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with("first\n"));
        assert!(records[1].starts_with("\n  prog"));
    }

    #[test]
    fn test_missing_sdf_is_an_error() {
        assert!(load_containers("/nonexistent/chemprep/missing.sdf.gz").is_err());
    }

    #[test]
    fn test_unknown_extension() {
        assert!(load_containers("molecules.mol2").is_err());
    }
}
