//! Runner configuration artifact.
//!
//! The external test runner reads an ini-style configuration file
//! parameterized by the discovered deployment: tenant name, admin
//! identity, and the identity endpoint URL. Generating it is a thin
//! templating step over ServiceDiscovery's outputs.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// Parameters rendered into the runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Tenant the runner authenticates against.
    pub tenant_name: String,

    /// Admin username.
    pub admin_user: String,

    /// Admin password.
    pub admin_password: String,

    /// Identity endpoint URL.
    pub identity_url: String,
}

impl RunnerConfig {
    /// Render the ini-style configuration document.
    pub fn render(&self) -> String {
        format!(
            "[identity]\n\
             uri = {identity_url}\n\
             username = {admin_user}\n\
             password = {admin_password}\n\
             tenant_name = {tenant_name}\n\
             admin_username = {admin_user}\n\
             admin_password = {admin_password}\n\
             admin_tenant_name = {tenant_name}\n\
             \n\
             [compute]\n\
             allow_tenant_isolation = false\n\
             allow_tenant_reuse = true\n",
            identity_url = self.identity_url,
            admin_user = self.admin_user,
            admin_password = self.admin_password,
            tenant_name = self.tenant_name,
        )
    }

    /// Write the rendered configuration to `path`.
    ///
    /// The file handle is scoped to this call and closes on every exit
    /// path, including failure.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let config_err = |source| RunnerError::Config {
            path: path.to_path_buf(),
            source,
        };

        let rendered = self.render();
        let mut file = File::create(path).map_err(config_err)?;
        file.write_all(rendered.as_bytes()).map_err(config_err)?;
        file.flush().map_err(config_err)?;
        Ok(())
    }
}
