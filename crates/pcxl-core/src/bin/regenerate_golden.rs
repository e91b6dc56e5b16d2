use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pcxl_core::{Decoder, UplinkInput};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let decoder =
        Decoder::pc_l_xl().map_err(|err| format!("failed to build command registry: {}", err))?;
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.json");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected.json");
        regenerate_one(&decoder, &input, &output)?;
    }

    Ok(())
}

fn regenerate_one(decoder: &Decoder, input: &Path, output: &Path) -> Result<(), String> {
    let raw = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let uplink: UplinkInput = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid uplink in {}: {}", input.display(), err))?;
    let result = decoder.decode(&uplink);
    let mut json = serde_json::to_string(&result)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
