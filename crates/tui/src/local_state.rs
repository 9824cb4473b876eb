use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{client::Session, error::Result};

/// Client state persisted between runs: currently only the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LocalState {
    #[serde(default)]
    pub token: Option<String>,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn session(&self) -> Session {
        Session::new(self.token.clone())
    }

    pub fn remember(&mut self, session: &Session) {
        self.token = session.token().map(str::to_string);
    }
}
