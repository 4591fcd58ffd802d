//! Host callback surface
//!
//! The host application owns the ramp parameters and the dialogs. It is seen
//! here through two traits: [`RampParameter`] for the selected control and
//! [`Prompter`] for the modal prompts. Every prompt returns `None` when the user
//! cancels, and a cancelled callback returns without touching the store.

use tracing::debug;

use crate::data::{normalize, RampKind};
use crate::error::{RampageError, Result};
use crate::ramp::Ramp;
use crate::store::PresetStore;

/// A parameter the preset menu was opened on
#[cfg_attr(test, mockall::automock)]
pub trait RampParameter {
    fn name(&self) -> String;

    /// True when the parameter is a ramp control
    fn is_ramp(&self) -> bool;

    /// Kind of ramp, `None` for non-ramp parameters
    fn ramp_kind(&self) -> Option<RampKind>;

    /// Current value of the ramp
    fn eval_ramp(&self) -> Result<Ramp>;

    fn set_ramp(&mut self, ramp: &Ramp) -> Result<()>;
}

/// Modal prompts shown by the host
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Free-text input
    fn read_input(&mut self, message: &str) -> Option<String>;

    /// Exclusive choice among `labels`, returning the chosen index
    fn select_one(&mut self, message: &str, labels: &[String]) -> Option<usize>;

    /// Pick one of `items` (shown as `labels`) and type a new name for it.
    /// Returns the chosen item and the new name.
    fn rename_dialog(&mut self, labels: &[String], items: &[String]) -> Option<(String, String)>;
}

pub const ADD_PROMPT: &str = "Name of the preset:";
pub const REPLACE_PROMPT: &str = "Select preset to replace";
pub const REMOVE_PROMPT: &str = "Select preset to remove";

fn ramp_kind_of<P: RampParameter + ?Sized>(parm: &P) -> Result<RampKind> {
    if !parm.is_ramp() {
        return Err(RampageError::NotRampParameter(parm.name()));
    }
    parm.ramp_kind()
        .ok_or_else(|| RampageError::NotRampParameter(parm.name()))
}

/// The preset menu is offered for a single selected ramp parameter
pub fn should_display_menu<P: RampParameter>(parms: &[P]) -> bool {
    matches!(parms, [parm] if parm.is_ramp())
}

/// Flattened `[key, label, ...]` menu for the selected parameter
pub fn menu_strip<P: RampParameter>(store: &PresetStore, parms: &[P]) -> Result<Vec<String>> {
    let [parm] = parms else {
        return Ok(Vec::new());
    };
    if !parm.is_ramp() {
        return Ok(Vec::new());
    }
    let kind = ramp_kind_of(parm)?;
    Ok(store.load(kind)?.menu_strip())
}

/// Ask the user to pick one preset of `kind`, returning its key
pub fn choose_preset<Q: Prompter + ?Sized>(
    store: &PresetStore,
    kind: RampKind,
    prompter: &mut Q,
    message: &str,
) -> Result<Option<String>> {
    let presets = store.load(kind)?;
    if presets.is_empty() {
        debug!(kind = %kind, "No presets to choose from");
        return Ok(None);
    }

    let Some(index) = prompter.select_one(message, &presets.names()) else {
        return Ok(None);
    };
    Ok(presets.key_at(index).map(str::to_string))
}

/// Save the parameter's current ramp under a name typed by the user
pub fn add_preset<P, Q>(store: &PresetStore, parm: &P, prompter: &mut Q) -> Result<Option<String>>
where
    P: RampParameter + ?Sized,
    Q: Prompter + ?Sized,
{
    let kind = ramp_kind_of(parm)?;
    let Some(name) = prompter.read_input(ADD_PROMPT) else {
        return Ok(None);
    };

    let ramp = parm.eval_ramp()?;
    store.add(kind, &name, ramp.to_definition()).map(Some)
}

/// Overwrite a chosen preset with the parameter's current ramp
pub fn replace_preset<P, Q>(store: &PresetStore, parm: &P, prompter: &mut Q) -> Result<Option<String>>
where
    P: RampParameter + ?Sized,
    Q: Prompter + ?Sized,
{
    let kind = ramp_kind_of(parm)?;
    let Some(key) = choose_preset(store, kind, prompter, REPLACE_PROMPT)? else {
        return Ok(None);
    };

    let ramp = parm.eval_ramp()?;
    store.replace(kind, &key, ramp.to_definition())?;
    Ok(Some(key))
}

/// Delete a chosen preset
pub fn remove_preset<P, Q>(store: &PresetStore, parm: &P, prompter: &mut Q) -> Result<Option<String>>
where
    P: RampParameter + ?Sized,
    Q: Prompter + ?Sized,
{
    let kind = ramp_kind_of(parm)?;
    let Some(key) = choose_preset(store, kind, prompter, REMOVE_PROMPT)? else {
        return Ok(None);
    };

    store.remove(kind, &key)?;
    Ok(Some(key))
}

/// Show the rename dialog and apply the result, returning the new key
pub fn rename_preset<P, Q>(store: &PresetStore, parm: &P, prompter: &mut Q) -> Result<Option<String>>
where
    P: RampParameter + ?Sized,
    Q: Prompter + ?Sized,
{
    let kind = ramp_kind_of(parm)?;
    rename_preset_of_kind(store, kind, prompter)
}

/// Rename dialog for a ramp kind, without a parameter to derive it from
pub fn rename_preset_of_kind<Q: Prompter + ?Sized>(
    store: &PresetStore,
    kind: RampKind,
    prompter: &mut Q,
) -> Result<Option<String>> {
    let presets = store.load(kind)?;
    let labels = presets.names();
    let items: Vec<String> = presets.keys().map(str::to_string).collect();

    let Some((old_key, new_name)) = prompter.rename_dialog(&labels, &items) else {
        return Ok(None);
    };
    if new_name.trim().is_empty() {
        return Ok(None);
    }

    let new_key = normalize(&new_name);
    Ok(store.rename(kind, &old_key, &new_name)?.map(|_| new_key))
}

/// Set the parameter from the preset selected in the menu.
///
/// Returns false when `token` does not name a stored preset.
pub fn apply_preset<P: RampParameter + ?Sized>(
    store: &PresetStore,
    parm: &mut P,
    token: &str,
) -> Result<bool> {
    let kind = ramp_kind_of(parm)?;
    let Some(preset) = store.get(kind, token)? else {
        debug!(kind = %kind, token = %token, "Selected preset no longer exists");
        return Ok(false);
    };

    let ramp = Ramp::from_definition(&preset.definition)?;
    parm.set_ramp(&ramp)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RampValue;
    use crate::ramp::RampBasis;
    use mockall::predicate::eq;

    fn float_ramp(last: f64) -> Ramp {
        Ramp::new(
            RampKind::Float,
            vec![RampBasis::Linear, RampBasis::Linear],
            vec![0.0, 1.0],
            vec![RampValue::Scalar(0.0), RampValue::Scalar(last)],
        )
        .unwrap()
    }

    fn float_parm(last: f64) -> MockRampParameter {
        let mut parm = MockRampParameter::new();
        parm.expect_name().return_const("ramp".to_string());
        parm.expect_is_ramp().return_const(true);
        parm.expect_ramp_kind().return_const(Some(RampKind::Float));
        parm.expect_eval_ramp().returning(move || Ok(float_ramp(last)));
        parm
    }

    fn non_ramp_parm() -> MockRampParameter {
        let mut parm = MockRampParameter::new();
        parm.expect_name().return_const("scale".to_string());
        parm.expect_is_ramp().return_const(false);
        parm.expect_ramp_kind().return_const(None);
        parm
    }

    fn temp_store() -> (tempfile::TempDir, PresetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_should_display_menu() {
        assert!(should_display_menu(&[float_parm(1.0)]));
        assert!(!should_display_menu::<MockRampParameter>(&[]));
        assert!(!should_display_menu(&[float_parm(1.0), float_parm(0.5)]));
        assert!(!should_display_menu(&[non_ramp_parm()]));
    }

    #[test]
    fn test_menu_strip_in_store_order() {
        let (_tmp, store) = temp_store();
        store.add(RampKind::Float, "B Ramp", float_ramp(1.0).to_definition()).unwrap();
        store.add(RampKind::Float, "A Ramp", float_ramp(0.5).to_definition()).unwrap();

        let strip = menu_strip(&store, &[float_parm(1.0)]).unwrap();
        assert_eq!(strip, vec!["bramp", "B Ramp", "aramp", "A Ramp"]);

        assert!(menu_strip(&store, &[float_parm(1.0), float_parm(1.0)]).unwrap().is_empty());
        assert!(menu_strip(&store, &[non_ramp_parm()]).unwrap().is_empty());
    }

    #[test]
    fn test_add_preset() {
        let (_tmp, store) = temp_store();
        let mut prompter = MockPrompter::new();
        prompter
            .expect_read_input()
            .with(eq(ADD_PROMPT))
            .times(1)
            .returning(|_| Some("Soft Falloff".to_string()));

        let key = add_preset(&store, &float_parm(0.3), &mut prompter).unwrap();
        assert_eq!(key.as_deref(), Some("softfalloff"));

        let preset = store.get(RampKind::Float, "softfalloff").unwrap().unwrap();
        assert_eq!(preset.definition, float_ramp(0.3).to_definition());
    }

    #[test]
    fn test_add_preset_cancelled() {
        let (_tmp, store) = temp_store();
        let mut prompter = MockPrompter::new();
        prompter.expect_read_input().returning(|_| None);

        assert!(add_preset(&store, &float_parm(0.3), &mut prompter).unwrap().is_none());
        assert!(store.load(RampKind::Float).unwrap().is_empty());
    }

    #[test]
    fn test_add_preset_duplicate() {
        let (_tmp, store) = temp_store();
        store.add(RampKind::Float, "Taken", float_ramp(1.0).to_definition()).unwrap();

        let mut prompter = MockPrompter::new();
        prompter.expect_read_input().returning(|_| Some("TAKEN".to_string()));
        let result = add_preset(&store, &float_parm(0.3), &mut prompter);
        assert!(matches!(result, Err(RampageError::DuplicateName { .. })));
    }

    #[test]
    fn test_not_ramp_parameter() {
        let (_tmp, store) = temp_store();
        let mut prompter = MockPrompter::new();
        let result = add_preset(&store, &non_ramp_parm(), &mut prompter);
        assert!(matches!(result, Err(RampageError::NotRampParameter(name)) if name == "scale"));

        let mut parm = non_ramp_parm();
        assert!(apply_preset(&store, &mut parm, "anything").is_err());
    }

    #[test]
    fn test_replace_preset() {
        let (_tmp, store) = temp_store();
        store.add(RampKind::Float, "First", float_ramp(1.0).to_definition()).unwrap();
        store.add(RampKind::Float, "Second", float_ramp(1.0).to_definition()).unwrap();

        let mut prompter = MockPrompter::new();
        prompter
            .expect_select_one()
            .withf(|message, labels| {
                message == REPLACE_PROMPT && labels == ["First".to_string(), "Second".to_string()]
            })
            .returning(|_, _| Some(1));

        let key = replace_preset(&store, &float_parm(0.1), &mut prompter).unwrap();
        assert_eq!(key.as_deref(), Some("second"));

        let preset = store.get(RampKind::Float, "second").unwrap().unwrap();
        assert_eq!(preset.name, "Second");
        assert_eq!(preset.definition, float_ramp(0.1).to_definition());
        let untouched = store.get(RampKind::Float, "first").unwrap().unwrap();
        assert_eq!(untouched.definition, float_ramp(1.0).to_definition());
    }

    #[test]
    fn test_remove_preset_and_cancel() {
        let (_tmp, store) = temp_store();
        store.add(RampKind::Float, "Doomed", float_ramp(1.0).to_definition()).unwrap();

        let mut cancel = MockPrompter::new();
        cancel.expect_select_one().returning(|_, _| None);
        assert!(remove_preset(&store, &float_parm(1.0), &mut cancel).unwrap().is_none());
        assert_eq!(store.load(RampKind::Float).unwrap().len(), 1);

        let mut pick = MockPrompter::new();
        pick.expect_select_one()
            .withf(|message, _| message == REMOVE_PROMPT)
            .returning(|_, _| Some(0));
        let key = remove_preset(&store, &float_parm(1.0), &mut pick).unwrap();
        assert_eq!(key.as_deref(), Some("doomed"));
        assert!(store.load(RampKind::Float).unwrap().is_empty());
    }

    #[test]
    fn test_choose_preset_empty_store_skips_prompt() {
        let (_tmp, store) = temp_store();
        let mut prompter = MockPrompter::new();
        prompter.expect_select_one().never();
        let chosen = choose_preset(&store, RampKind::Color, &mut prompter, "pick").unwrap();
        assert!(chosen.is_none());
    }

    #[test]
    fn test_rename_preset() {
        let (_tmp, store) = temp_store();
        store.add(RampKind::Float, "Old Name", float_ramp(1.0).to_definition()).unwrap();

        let mut prompter = MockPrompter::new();
        prompter
            .expect_rename_dialog()
            .withf(|labels, items| labels == ["Old Name".to_string()] && items == ["oldname".to_string()])
            .returning(|_, _| Some(("oldname".to_string(), "New Name".to_string())));

        let key = rename_preset(&store, &float_parm(1.0), &mut prompter).unwrap();
        assert_eq!(key.as_deref(), Some("newname"));
        assert_eq!(store.get(RampKind::Float, "newname").unwrap().unwrap().name, "New Name");
        assert!(store.get(RampKind::Float, "oldname").unwrap().is_none());
    }

    #[test]
    fn test_rename_preset_blank_name_is_cancel() {
        let (_tmp, store) = temp_store();
        store.add(RampKind::Float, "Keep", float_ramp(1.0).to_definition()).unwrap();

        let mut prompter = MockPrompter::new();
        prompter
            .expect_rename_dialog()
            .returning(|_, _| Some(("keep".to_string(), "   ".to_string())));
        assert!(rename_preset(&store, &float_parm(1.0), &mut prompter).unwrap().is_none());
        assert!(store.get(RampKind::Float, "keep").unwrap().is_some());
    }

    #[test]
    fn test_apply_preset() {
        let (_tmp, store) = temp_store();
        store.add(RampKind::Float, "Peak", float_ramp(0.75).to_definition()).unwrap();

        let mut parm = float_parm(0.0);
        parm.expect_set_ramp()
            .withf(|ramp| *ramp == float_ramp(0.75))
            .times(1)
            .returning(|_| Ok(()));

        assert!(apply_preset(&store, &mut parm, "peak").unwrap());
    }

    #[test]
    fn test_apply_unknown_token_is_noop() {
        let (_tmp, store) = temp_store();
        let mut parm = float_parm(0.0);
        parm.expect_set_ramp().never();
        assert!(!apply_preset(&store, &mut parm, "missing").unwrap());
    }
}
