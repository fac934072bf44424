//! Command handlers module.
//!
//! - `barillet.rs`: lifecycle commands (new, list, show, edit-theme,
//!   duplicate, delete, categories)
//! - `io.rs`: import and export

mod barillet;
mod io;

use std::sync::Arc;

use ::barillet::config::BarilletConfig;
use ::barillet::models::{Barillet, BarilletId, Session};
use ::barillet::services::BarilletService;
use ::barillet::storage::{PersistenceBackend, open_backend};
use ::barillet::{Error, Result};

pub use self::barillet::{
    ThemeEdit, cmd_categories, cmd_delete, cmd_duplicate, cmd_edit_theme, cmd_list, cmd_new,
    cmd_show,
};
pub use self::io::{cmd_export, cmd_import};

/// Everything a command needs: configuration, the service and who is acting.
pub struct AppContext {
    /// Loaded configuration.
    pub config: BarilletConfig,
    /// Lifecycle service over the configured store.
    pub service: BarilletService,
    /// Acting user.
    pub session: Session,
}

impl AppContext {
    /// Opens the store under the configured data directory.
    pub fn open(config: BarilletConfig) -> Result<Self> {
        let backend: Arc<dyn PersistenceBackend> = open_backend(Some(config.data_dir.as_path()))?;
        let session = config.session();
        Ok(Self {
            service: BarilletService::new(backend),
            session,
            config,
        })
    }

    /// Fetches a barillet the acting user owns.
    pub fn owned(&self, id: &str) -> Result<Barillet> {
        self.session.require_identity()?;
        let id = BarilletId::new(id);
        let barillet = self.service.get(&id)?;
        if self.session.is_owner(&barillet) {
            Ok(barillet)
        } else {
            Err(Error::NotFound {
                entity: "barillet",
                id: id.to_string(),
            })
        }
    }
}
