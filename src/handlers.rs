/*
 * This file is part of Rampage.
 *
 * Copyright (C) 2025 Rampage contributors
 *
 * Rampage is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Rampage is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Rampage. If not, see <https://www.gnu.org/licenses/>.
 */

//! Command handlers. Each one drives the same callbacks a host menu would.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use rp_core::menu::REMOVE_PROMPT;
use rp_core::{
    add_preset, apply_preset, choose_preset, rename_preset_of_kind, replace_preset, PresetStore,
    RampKind, RampParameter, RampageError,
};
use serde_json::json;

use crate::cli::Command;
use crate::logger::log_event;
use crate::prompt::{Answers, CliPrompter};
use crate::ramp_file::RampFile;

/// Run one command. Prompts go to `prompts`, results to `out`.
pub fn run<R, E, W>(
    store: &PresetStore,
    command: Command,
    input: R,
    prompts: E,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: BufRead,
    E: Write,
    W: Write,
{
    match command {
        Command::List { kind } => list(store, kind, out),
        Command::Show { kind, key } => show(store, kind, &key, out),
        Command::Add { from, name } => {
            let answers = Answers {
                input: name,
                ..Default::default()
            };
            add(store, &from, &mut CliPrompter::new(answers, input, prompts), out)
        }
        Command::Replace { from, name } => {
            let answers = Answers {
                choice: name,
                ..Default::default()
            };
            replace(store, &from, &mut CliPrompter::new(answers, input, prompts), out)
        }
        Command::Remove { kind, name } => {
            let answers = Answers {
                choice: name,
                ..Default::default()
            };
            remove(store, kind, &mut CliPrompter::new(answers, input, prompts), out)
        }
        Command::Rename {
            kind,
            name,
            new_name,
        } => {
            let answers = Answers {
                choice: name,
                new_name,
                ..Default::default()
            };
            rename(store, kind, &mut CliPrompter::new(answers, input, prompts), out)
        }
        Command::Apply { to, kind, key } => apply(store, &to, kind, &key, out),
    }
}

pub fn list<W: Write>(store: &PresetStore, kind: Option<RampKind>, out: &mut W) -> anyhow::Result<()> {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => RampKind::ALL.to_vec(),
    };

    for kind in kinds {
        let presets = store.load(kind)?;
        writeln!(out, "{} ({})", kind, presets.len())?;
        for (key, preset) in &presets {
            writeln!(
                out,
                "  {:<24} {} [{} keys]",
                key,
                preset.name,
                preset.definition.len()
            )?;
        }
    }
    Ok(())
}

pub fn show<W: Write>(store: &PresetStore, kind: RampKind, key: &str, out: &mut W) -> anyhow::Result<()> {
    let preset = store
        .get(kind, key)?
        .ok_or_else(|| RampageError::PresetNotFound(key.to_string()))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&preset)?)?;
    Ok(())
}

pub fn add<R: BufRead, E: Write, W: Write>(
    store: &PresetStore,
    from: &Path,
    prompter: &mut CliPrompter<R, E>,
    out: &mut W,
) -> anyhow::Result<()> {
    let file = RampFile::new(from);
    let added = add_preset(store, &file, prompter)
        .with_context(|| format!("could not add preset from {}", from.display()))?;

    match added {
        Some(key) => {
            let kind = file.ramp_kind().map(|k| k.as_str()).unwrap_or_default();
            log_event("preset_added", json!({ "kind": kind, "key": key }));
            writeln!(out, "Added preset '{}'", key)?;
        }
        None => writeln!(out, "Cancelled")?,
    }
    Ok(())
}

pub fn replace<R: BufRead, E: Write, W: Write>(
    store: &PresetStore,
    from: &Path,
    prompter: &mut CliPrompter<R, E>,
    out: &mut W,
) -> anyhow::Result<()> {
    let file = RampFile::new(from);
    let replaced = replace_preset(store, &file, prompter)
        .with_context(|| format!("could not replace preset from {}", from.display()))?;

    match replaced {
        Some(key) => {
            let kind = file.ramp_kind().map(|k| k.as_str()).unwrap_or_default();
            log_event("preset_replaced", json!({ "kind": kind, "key": key }));
            writeln!(out, "Replaced preset '{}'", key)?;
        }
        None => cancelled(prompter, out)?,
    }
    Ok(())
}

pub fn remove<R: BufRead, E: Write, W: Write>(
    store: &PresetStore,
    kind: RampKind,
    prompter: &mut CliPrompter<R, E>,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(key) = choose_preset(store, kind, prompter, REMOVE_PROMPT)? else {
        return cancelled(prompter, out);
    };

    if store.remove(kind, &key)? {
        log_event("preset_removed", json!({ "kind": kind.as_str(), "key": key }));
        writeln!(out, "Removed preset '{}'", key)?;
    }
    Ok(())
}

pub fn rename<R: BufRead, E: Write, W: Write>(
    store: &PresetStore,
    kind: RampKind,
    prompter: &mut CliPrompter<R, E>,
    out: &mut W,
) -> anyhow::Result<()> {
    match rename_preset_of_kind(store, kind, prompter)? {
        Some(new_key) => {
            log_event("preset_renamed", json!({ "kind": kind.as_str(), "key": new_key }));
            writeln!(out, "Renamed preset to '{}'", new_key)?;
        }
        None => cancelled(prompter, out)?,
    }
    Ok(())
}

pub fn apply<W: Write>(
    store: &PresetStore,
    to: &Path,
    kind: Option<RampKind>,
    key: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut file = RampFile::new(to).with_kind(kind);
    if apply_preset(store, &mut file, key)? {
        let path = file.path().display().to_string();
        log_event("preset_applied", json!({ "key": key, "to": path }));
        writeln!(out, "Applied preset '{}' to {}", key, path)?;
        Ok(())
    } else {
        Err(RampageError::PresetNotFound(key.to_string()).into())
    }
}

/// Short message for errors the user caused, such as a taken or unknown name.
///
/// Returns `None` for failures that deserve the full error chain.
pub fn user_message(err: &anyhow::Error) -> Option<String> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<RampageError>())
        .filter(|e| e.is_user_facing())
        .map(|e| e.to_string())
}

/// A prompt came back empty. That is a cancel, unless the preset was named
/// on the command line and nothing matched it.
fn cancelled<R: BufRead, E: Write, W: Write>(
    prompter: &CliPrompter<R, E>,
    out: &mut W,
) -> anyhow::Result<()> {
    if let Some(name) = prompter.missing_choice() {
        return Err(RampageError::PresetNotFound(name.to_string()).into());
    }
    writeln!(out, "Cancelled")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{sink, Cursor};

    fn write_ramp(path: &Path, last: f64) {
        let json = format!(
            r#"{{"ramp_type": "float", "basis": ["Linear", "Linear"], "keys": [0.0, 1.0], "values": [0.0, {}]}}"#,
            last
        );
        fs::write(path, json).unwrap();
    }

    fn run_cmd(store: &PresetStore, command: Command, input: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(store, command, Cursor::new(input.to_string()), sink(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_add_list_show() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path().join("presets"));
        let ramp = dir.path().join("ramp.json");
        write_ramp(&ramp, 0.5);

        let out = run_cmd(
            &store,
            Command::Add { from: ramp.clone(), name: Some("Half Way".into()) },
            "",
        )
        .unwrap();
        assert_eq!(out, "Added preset 'halfway'\n");

        let out = run_cmd(&store, Command::List { kind: Some(RampKind::Float) }, "").unwrap();
        assert!(out.starts_with("float (1)\n"));
        assert!(out.contains("halfway"));
        assert!(out.contains("Half Way [2 keys]"));

        let out = run_cmd(
            &store,
            Command::Show { kind: RampKind::Float, key: "halfway".into() },
            "",
        )
        .unwrap();
        assert!(out.contains("\"name\": \"Half Way\""));
    }

    #[test]
    fn test_add_name_from_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let ramp = dir.path().join("ramp.json");
        write_ramp(&ramp, 0.5);

        let out = run_cmd(&store, Command::Add { from: ramp.clone(), name: None }, "Typed Name\n").unwrap();
        assert_eq!(out, "Added preset 'typedname'\n");

        let out = run_cmd(&store, Command::Add { from: ramp, name: None }, "").unwrap();
        assert_eq!(out, "Cancelled\n");
    }

    #[test]
    fn test_show_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let err = run_cmd(&store, Command::Show { kind: RampKind::Color, key: "none".into() }, "")
            .unwrap_err();
        assert!(err.to_string().contains("Preset not found"));
    }

    #[test]
    fn test_remove_and_rename() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let ramp = dir.path().join("ramp.json");
        write_ramp(&ramp, 0.5);
        run_cmd(&store, Command::Add { from: ramp.clone(), name: Some("First".into()) }, "").unwrap();
        run_cmd(&store, Command::Add { from: ramp, name: Some("Second".into()) }, "").unwrap();

        let out = run_cmd(
            &store,
            Command::Rename {
                kind: RampKind::Float,
                name: Some("first".into()),
                new_name: Some("Primary".into()),
            },
            "",
        )
        .unwrap();
        assert_eq!(out, "Renamed preset to 'primary'\n");

        let out = run_cmd(
            &store,
            Command::Remove { kind: RampKind::Float, name: None },
            "1\n",
        )
        .unwrap();
        assert_eq!(out, "Removed preset 'second'\n");

        let keys: Vec<String> = store
            .load(RampKind::Float)
            .unwrap()
            .keys()
            .map(str::to_string)
            .collect();
        assert_eq!(keys, vec!["primary"]);
    }

    #[test]
    fn test_unmatched_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let ramp = dir.path().join("ramp.json");
        write_ramp(&ramp, 0.5);

        // Nothing stored yet, so the name is never offered to a prompt
        let err = run_cmd(
            &store,
            Command::Replace { from: ramp.clone(), name: Some("typo".into()) },
            "",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Preset not found: typo"));

        run_cmd(&store, Command::Add { from: ramp, name: Some("Kept".into()) }, "").unwrap();

        let err = run_cmd(
            &store,
            Command::Remove { kind: RampKind::Float, name: Some("typo".into()) },
            "",
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RampageError>(),
            Some(RampageError::PresetNotFound(name)) if name == "typo"
        ));

        let err = run_cmd(
            &store,
            Command::Rename {
                kind: RampKind::Float,
                name: Some("typo".into()),
                new_name: Some("Other".into()),
            },
            "",
        )
        .unwrap_err();
        assert!(err.to_string().contains("typo"));

        // An empty interactive answer is still a cancel
        let out = run_cmd(&store, Command::Remove { kind: RampKind::Float, name: None }, "\n").unwrap();
        assert_eq!(out, "Cancelled\n");
        assert!(store.load(RampKind::Float).unwrap().contains_key("kept"));
    }

    #[test]
    fn test_user_message() {
        let err = anyhow::Error::from(RampageError::duplicate_name("A", "a"))
            .context("could not add preset from ramp.json");
        assert_eq!(
            user_message(&err).as_deref(),
            Some("Preset name 'A' already exists (key 'a')")
        );

        let err = anyhow::Error::from(RampageError::invalid_ramp("bad"));
        assert_eq!(user_message(&err), None);
    }

    #[test]
    fn test_apply() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let ramp = dir.path().join("ramp.json");
        write_ramp(&ramp, 0.9);
        run_cmd(&store, Command::Add { from: ramp.clone(), name: Some("High".into()) }, "").unwrap();

        let target = dir.path().join("target.json");
        let out = run_cmd(
            &store,
            Command::Apply { to: target.clone(), kind: Some(RampKind::Float), key: "high".into() },
            "",
        )
        .unwrap();
        assert!(out.starts_with("Applied preset 'high'"));
        assert_eq!(
            RampFile::new(&target).eval_ramp().unwrap(),
            RampFile::new(&ramp).eval_ramp().unwrap()
        );

        assert!(run_cmd(
            &store,
            Command::Apply { to: target, kind: None, key: "missing".into() },
            "",
        )
        .is_err());
    }
}
