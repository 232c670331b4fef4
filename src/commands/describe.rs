//! `ogrinfo-report describe` command.

use serde::Serialize;

use crate::algorithm::{Algorithm, OgrInfo, OutputDefinition, ParameterDefinition};

/// Serializable summary of an algorithm's declarations.
#[derive(Debug, Serialize)]
struct Description {
    name: &'static str,
    display_name: &'static str,
    group: &'static str,
    parameters: Vec<ParameterDefinition>,
    outputs: Vec<OutputDefinition>,
}

fn describe(algorithm: &dyn Algorithm) -> Description {
    Description {
        name: algorithm.name(),
        display_name: algorithm.display_name(),
        group: algorithm.group(),
        parameters: algorithm.parameters(),
        outputs: algorithm.outputs(),
    }
}

/// Execute the `describe` command: print the algorithm's parameters and
/// outputs as YAML.
///
/// # Errors
///
/// Returns an error string if the description cannot be serialized.
pub fn run() -> Result<(), String> {
    let yaml = serde_yaml::to_string(&describe(&OgrInfo)).map_err(|e| e.to_string())?;
    print!("{yaml}");
    Ok(())
}
