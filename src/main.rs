use anyhow::{Result, anyhow, bail};
use mavis_testdata::{
    Config, FileGenerator, Generator, create_child_list_from_file, get_session_id, setup_logging,
};
use std::env;

const USAGE: &str = "\
Usage: mavis-testdata <command>

Commands:
  render <scenario_id> [session_id]   render the scenario's template and print the file path
  expected <scenario_id>              print the scenario's expected error lines
  session-id <path>                   print the session id of a rendered or downloaded file
  children <path> [--vaccinations]    print the children listed in a file
  onboarding                          print a generated onboarding document as JSON";

fn main() -> Result<()> {
    setup_logging()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, rest) = args.split_first().ok_or_else(|| anyhow!(USAGE))?;

    match (command.as_str(), rest) {
        ("render", [scenario_id]) => render(scenario_id, None),
        ("render", [scenario_id, session_id]) => render(scenario_id, Some(session_id)),
        ("expected", [scenario_id]) => {
            let files = FileGenerator::from_config(&Config::from_env()?)?;
            for line in files.get_expected_errors(scenario_id)?.unwrap_or_default() {
                println!("{line}");
            }
            Ok(())
        }
        ("session-id", [path]) => {
            println!("{}", get_session_id(path)?);
            Ok(())
        }
        ("children", [path]) => print_children(path, false),
        ("children", [path, flag]) if flag == "--vaccinations" => print_children(path, true),
        ("onboarding", []) => {
            let config = Config::from_env()?;
            let mut generator = match config.seed {
                Some(seed) => Generator::seeded(seed),
                None => Generator::from_entropy(),
            };
            let onboarding = generator.generate_onboarding(config.programme_group);
            println!("{}", serde_json::to_string_pretty(&onboarding.to_onboarding())?);
            Ok(())
        }
        _ => bail!(USAGE),
    }
}

fn render(scenario_id: &str, session_id: Option<&String>) -> Result<()> {
    let mut files = FileGenerator::from_config(&Config::from_env()?)?;
    if let Some(session_id) = session_id {
        files.test_data_mut().session_id = Some(session_id.clone());
    }

    let path = files.create_file_from_template(scenario_id).inspect_err(|e| {
        tracing::warn!(scenario = scenario_id, "rendering failed: {e}");
    })?;
    println!("{}", path.display());
    Ok(())
}

fn print_children(path: &str, is_vaccination_file: bool) -> Result<()> {
    for child in create_child_list_from_file(path, is_vaccination_file)? {
        println!("{child}");
    }
    Ok(())
}
