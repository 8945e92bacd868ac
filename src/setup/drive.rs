//! Drive alias for the toolchain source tree

use crate::config::DriveConfig;
use crate::error::SwenvResult;
use crate::host::Host;
use crate::session::SessionEnv;
use std::path::Path;
use tracing::{debug, info};

/// Map the drive onto `source` unless the drive root already exists, then
/// move the session to the drive root.
pub async fn initialize_drive_alias(
    env: &mut SessionEnv,
    host: &dyn Host,
    drive: &DriveConfig,
    source: &Path,
) -> SwenvResult<()> {
    let root = drive.root();

    if host.path_exists(&root) {
        debug!("{} already exists, reusing it", root.display());
    } else {
        host.create_alias(&drive.drive(), source).await?;
        info!("Mapped {} to {}", drive.drive(), source.display());
    }

    env.set_current_dir(root);
    Ok(())
}
