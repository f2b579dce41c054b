//! Settings store backing the preferences surface.
//!
//! Holds a [`Config`] behind a `RefCell`, optionally mirrored to a TOML file,
//! and fans every committed edit out to its subscribers.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info};

use super::config::Config;
use super::data_dir;
use crate::error::ConfigError;
use crate::settings::{ChangeCallback, SettingKey, SettingsProvider, SubscriptionId};

const CONFIG_FILE: &str = "config.toml";

pub struct SettingsStore {
    config: RefCell<Config>,
    path: Option<PathBuf>,
    subscribers: RefCell<Vec<(SubscriptionId, Rc<dyn Fn()>)>>,
    next_id: Cell<u64>,
}

impl SettingsStore {
    /// Store with no file behind it.
    pub fn in_memory(config: Config) -> Self {
        Self {
            config: RefCell::new(config),
            path: None,
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Load `config.toml` from the data directory, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing
    /// file is unreadable or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from an explicit file path, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Config::load_from(&path)?
        } else {
            let cfg = Config::default();
            cfg.save_to(&path)?;
            info!(path = %path.display(), "wrote default configuration");
            cfg
        };
        Ok(Self {
            path: Some(path),
            ..Self::in_memory(config)
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of the current configuration.
    pub fn config(&self) -> Config {
        self.config.borrow().clone()
    }

    pub fn notifications_enabled(&self) -> bool {
        self.config.borrow().notifications.enabled
    }

    /// Bounds-check, persist, then notify subscribers.
    ///
    /// Writing the value already stored is accepted and does not notify.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for values outside the key's
    /// bounds, or a save error if the file could not be written.
    pub fn set_int(&self, key: SettingKey, value: i64) -> Result<(), ConfigError> {
        key.validate(value)?;
        self.commit(key, value)
    }

    /// Parse `key` and `value` from text and apply them with [`Self::set_int`].
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, non-integer values, or anything
    /// [`Self::set_int`] rejects.
    pub fn set_from_str(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key: SettingKey = key.parse()?;
        let value = value
            .trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidValue {
                key: key.as_str().to_string(),
                message: e.to_string(),
            })?;
        self.set_int(key, value)
    }

    /// Restore one key to its default.
    ///
    /// # Errors
    ///
    /// Returns a save error if the file could not be written.
    pub fn reset(&self, key: SettingKey) -> Result<(), ConfigError> {
        self.commit(key, key.default_value())
    }

    /// Restore every key to its default, one key at a time.
    ///
    /// # Errors
    ///
    /// Stops at the first save error.
    pub fn reset_all(&self) -> Result<(), ConfigError> {
        for key in SettingKey::ALL {
            self.reset(key)?;
        }
        Ok(())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn commit(&self, key: SettingKey, value: i64) -> Result<(), ConfigError> {
        if self.config.borrow().get(key) == value {
            return Ok(());
        }
        let mut next = self.config();
        next.set(key, value);
        if let Some(path) = &self.path {
            next.save_to(path)?;
        }
        *self.config.borrow_mut() = next;
        debug!(key = %key, value, "setting changed");
        self.emit_changed();
        Ok(())
    }

    fn emit_changed(&self) {
        // Callbacks may subscribe or unsubscribe, so run them on a copy.
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::in_memory(Config::default())
    }
}

impl SettingsProvider for SettingsStore {
    fn get_int(&self, key: SettingKey) -> i64 {
        self.config.borrow().get(key)
    }

    fn subscribe(&self, on_change: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::from(on_change)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sub, _)| *sub != id);
    }
}
