//! Key bindings: which key code drives which action.
//!
//! Key codes are physical-key names in the `"KeyW"` / `"ArrowLeft"` style.
//! The table persists as a JSON object keyed by action name; entries missing
//! from a file keep their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Action;

#[derive(Debug, Error)]
pub enum BindingsError {
    #[error("failed to access key bindings at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed key bindings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown action in key bindings: {0:?}")]
    UnknownAction(String),
}

/// On-disk form: `{ "MoveForward": "KeyW", ... }`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct BindingsFile {
    entries: BTreeMap<String, String>,
}

/// One key code per action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    codes: [String; Action::COUNT],
}

impl Default for KeyBindings {
    fn default() -> Self {
        let codes = Action::ALL.map(|action| {
            match action {
                Action::MoveForward => "KeyW",
                Action::MoveBackward => "KeyS",
                Action::MoveLeft => "KeyA",
                Action::MoveRight => "KeyD",
                Action::ForceDown => "KeyX",
                Action::RotateZCcw => "KeyQ",
                Action::RotateZCw => "KeyE",
                Action::RotateYCcw => "KeyZ",
                Action::RotateYCw => "KeyC",
            }
            .to_string()
        });
        Self { codes }
    }
}

impl KeyBindings {
    pub fn code(&self, action: Action) -> &str {
        &self.codes[action.index()]
    }

    /// First action (in evaluation order) bound to `code`
    pub fn action_for(&self, code: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|a| self.codes[a.index()] == code)
    }

    pub fn rebind(&mut self, action: Action, code: impl Into<String>) {
        let code = code.into();
        info!("bind {} -> {code}", action.as_str());
        self.codes[action.index()] = code;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, &str)> + '_ {
        Action::ALL
            .into_iter()
            .map(move |a| (a, self.codes[a.index()].as_str()))
    }

    /// Parse a JSON object of action name to key code over the defaults.
    pub fn from_json(json: &str) -> Result<Self, BindingsError> {
        let file: BindingsFile = serde_json::from_str(json)?;
        let mut bindings = Self::default();
        for (name, code) in file.entries {
            let action =
                Action::from_str(&name).ok_or_else(|| BindingsError::UnknownAction(name.clone()))?;
            bindings.codes[action.index()] = code;
        }
        Ok(bindings)
    }

    pub fn to_json(&self) -> Result<String, BindingsError> {
        let file = BindingsFile {
            entries: self
                .iter()
                .map(|(a, code)| (a.as_str().to_string(), code.to_string()))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, BindingsError> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no key bindings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(BindingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), BindingsError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| BindingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
