use super::GitCommand;
use crate::error::Result;
use std::path::Path;

impl GitCommand {
    pub fn config_set(&self, key: &str, value: &str, cwd: &Path) -> Result<()> {
        self.run(&["config", key, value], cwd, true)?;
        Ok(())
    }
}
