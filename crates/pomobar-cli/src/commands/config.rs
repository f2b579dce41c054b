use clap::Subcommand;
use pomobar_core::{Result, SettingKey, SettingsProvider, SettingsStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "work-minutes", "long-break-interval")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset one key, or every key, to its default
    Reset {
        /// Config key; omit to reset everything
        key: Option<String>,
    },
}

pub fn run(action: ConfigAction) -> Result<()> {
    let store = SettingsStore::load()?;
    match action {
        ConfigAction::Get { key } => {
            let key: SettingKey = key.parse()?;
            println!("{}", store.get_int(key));
        }
        ConfigAction::Set { key, value } => {
            store.set_from_str(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            for key in SettingKey::ALL {
                let (min, max) = key.bounds();
                println!("{key} = {} [{min}, {max}]", store.get_int(key));
            }
            println!("notifications.enabled = {}", store.notifications_enabled());
        }
        ConfigAction::Reset { key: Some(key) } => {
            let key: SettingKey = key.parse()?;
            store.reset(key)?;
            println!("{key} reset to {}", key.default_value());
        }
        ConfigAction::Reset { key: None } => {
            store.reset_all()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
