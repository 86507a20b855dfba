use crate::command_line::parse_optional;
use crate::command_line::prelude::*;
use crate::config::{ConversionParams, ExecutionMode};
use crate::input::load_containers;
use crate::output::write_report_file;
use crate::parallel::RayonParallelizer;
use crate::selection::KeepBestPerContainer;
use crate::threed::convert_2d_to_3d;

pub const NAME: &str = "convert-3d";

pub fn command() -> Command {
    Command::new(NAME)
        .about(
            "Assign 3D coordinates to every input molecule. \
             Embedding needs a build with `--features python-embedding`",
        )
        .arg(
            Arg::new("input")
                .required(true)
                .long("input")
                .short('i')
                .num_args(1),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .long("output")
                .short('o')
                .num_args(1),
        )
        .arg(
            Arg::new("config")
                .required(false)
                .long("config")
                .short('c')
                .num_args(1),
        )
        .arg(
            Arg::new("max-variants")
                .required(false)
                .long("max-variants")
                .short('m')
                .num_args(1),
        )
        .arg(
            Arg::new("thoroughness")
                .required(false)
                .long("thoroughness")
                .short('t')
                .num_args(1),
        )
        .arg(
            Arg::new("num-workers")
                .required(false)
                .long("num-workers")
                .short('n')
                .num_args(1),
        )
        .arg(Arg::new("mode").required(false).long("mode").num_args(1))
}

pub fn params_from_matches(matches: &ArgMatches) -> eyre::Result<ConversionParams> {
    let mut params = match matches.get_one::<String>("config") {
        Some(config_path) => ConversionParams::from_json_file(config_path)?,
        None => ConversionParams::default(),
    };

    if let Some(max_variants) = parse_optional::<usize>(matches, "max-variants")? {
        params.max_variants_per_compound = max_variants;
    }
    if let Some(thoroughness) = parse_optional::<usize>(matches, "thoroughness")? {
        params.thoroughness = thoroughness;
    }
    if let Some(num_workers) = parse_optional::<usize>(matches, "num-workers")? {
        params.num_workers = num_workers;
    }
    if let Some(mode) = parse_optional::<ExecutionMode>(matches, "mode")? {
        params.mode = mode;
    }

    params.validate()?;
    Ok(params)
}

pub fn action(matches: &ArgMatches) -> eyre::Result<()> {
    let input_path = matches
        .get_one::<String>("input")
        .ok_or(eyre::eyre!("Failed to extract input path"))?;
    let output_path = matches
        .get_one::<String>("output")
        .ok_or(eyre::eyre!("Failed to extract output path"))?;
    let params = params_from_matches(matches)?;

    log::info!(
        "converting input={}, output={}, params={:?}",
        input_path,
        output_path,
        params
    );

    let embedder = embedder(&params)?;
    let mut containers = load_containers(input_path)?;
    let num_inputs = containers.len();

    let selector = KeepBestPerContainer::new(params.seed);
    convert_2d_to_3d(
        &mut containers,
        &params,
        &RayonParallelizer,
        &embedder,
        &selector,
    )?;

    let written = write_report_file(&containers, output_path)?;
    log::info!(
        "{} variants from {} input compounds written to {}",
        written,
        num_inputs,
        output_path
    );

    Ok(())
}

#[cfg(feature = "python-embedding")]
fn embedder(
    params: &ConversionParams,
) -> eyre::Result<crate::toolkit::python_embedder::PythonRdkitEmbedder> {
    Ok(crate::toolkit::python_embedder::PythonRdkitEmbedder::new(
        params.embedding_seed()?,
    ))
}

#[cfg(not(feature = "python-embedding"))]
fn embedder(_params: &ConversionParams) -> eyre::Result<NoEmbedder> {
    Err(eyre::eyre!(
        "No conformer embedder available; rebuild with `--features python-embedding`"
    ))
}

#[cfg(not(feature = "python-embedding"))]
enum NoEmbedder {}

#[cfg(not(feature = "python-embedding"))]
impl crate::toolkit::ConformerEmbedder<crate::toolkit::rdkit::RdkitMol> for NoEmbedder {
    fn embed_unminimized(
        &self,
        _mol: &crate::toolkit::rdkit::RdkitMol,
    ) -> eyre::Result<Vec<crate::molecule::Conformer>> {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let matches = command()
            .try_get_matches_from([NAME, "-i", "in.smi", "-o", "out.jsonl", "-m", "2", "--mode", "serial"])
            .unwrap();
        let params = params_from_matches(&matches).unwrap();

        assert_eq!(params.max_variants_per_compound, 2);
        assert_eq!(params.thoroughness, 3);
        assert_eq!(params.mode, ExecutionMode::Serial);
    }

    #[test]
    fn test_about_names_embedding_feature() {
        let about = command().get_about().map(|a| a.to_string()).unwrap();
        assert!(about.contains("python-embedding"));
    }

    #[test]
    fn test_rejects_bad_number() {
        let matches = command()
            .try_get_matches_from([NAME, "-i", "in.smi", "-o", "out.jsonl", "-n", "many"])
            .unwrap();
        assert!(params_from_matches(&matches).is_err());
    }
}
