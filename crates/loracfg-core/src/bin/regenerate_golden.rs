use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use loracfg_core::{Family, RegisterBlock};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("reply.hex");
        if !input.exists() {
            continue;
        }
        let family = family_of(&path)?;
        let output = path.join("expected_config.json");
        regenerate_one(family, &input, &output)?;
    }

    Ok(())
}

/// Case directories are prefixed with the family name, e.g. `e32_fixed_point`.
fn family_of(dir: &Path) -> Result<Family, String> {
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("unreadable case name: {}", dir.display()))?;
    let prefix = name.split('_').next().unwrap_or(name);
    prefix.parse()
}

fn regenerate_one(family: Family, input: &Path, output: &Path) -> Result<(), String> {
    let text = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let reply = RegisterBlock::from_hex(&text)
        .map_err(|err| format!("bad hex in {}: {}", input.display(), err))?;
    let block = family
        .parse_config_reply(reply.as_bytes())
        .map_err(|err| format!("bad reply in {}: {}", input.display(), err))?;
    let config = family
        .decode(&block)
        .map_err(|err| format!("decode failed for {}: {}", input.display(), err))?;
    let mut json = serde_json::to_string_pretty(&config)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
