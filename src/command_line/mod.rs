pub mod convert_3d;
pub mod validate;

pub mod prelude {
    pub use clap::{Arg, ArgMatches, Command};
}

use prelude::ArgMatches;

/// Parses an optional flag, failing on values that do not parse.
pub fn parse_optional<T>(matches: &ArgMatches, id: &str) -> eyre::Result<Option<T>>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    matches
        .get_one::<String>(id)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| eyre::eyre!("Invalid value for {}: {}", id, e))
        })
        .transpose()
}
