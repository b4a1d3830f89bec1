use crate::commands::{CmdMessage, CmdResult, PricePaths};
use crate::config::PriceConfig;
use crate::error::{PriceError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &PricePaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = PriceConfig::load(&paths.config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config
                .get_key(&key)
                .ok_or_else(|| PriceError::Config(format!("Unknown config key: {}", key)))?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::Set(key, value) => {
            config.set_key(&key, &value)?;
            config.save(&paths.config_dir)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, value)));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(dir: &tempfile::TempDir) -> PricePaths {
        PricePaths {
            config_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn show_all_returns_defaults_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(PriceConfig::default()));
        assert!(result.messages.is_empty());
    }

    #[test]
    fn set_persists() {
        let dir = tempfile::tempdir().unwrap();
        run(
            &paths(&dir),
            ConfigAction::Set("base-url".into(), "http://10.1.1.1:5000/".into()),
        )
        .unwrap();

        let result = run(&paths(&dir), ConfigAction::ShowKey("base-url".into())).unwrap();
        assert_eq!(result.messages[0].content, "base-url = http://10.1.1.1:5000");
    }

    #[test]
    fn invalid_value_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            &paths(&dir),
            ConfigAction::Set("timeout-secs".into(), "soon".into()),
        );
        assert!(err.is_err());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&paths(&dir), ConfigAction::ShowKey("colour".into())).is_err());
    }
}
