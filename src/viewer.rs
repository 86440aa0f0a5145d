//! Opening rendered charts with an image viewer.
//!
//! The pipeline only talks to the [`ImageViewer`] trait, so analysis and
//! rendering stay free of platform-specific code. [`show`] is the best-effort
//! entry point: viewer failures are logged and never propagated.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use crate::error::ViewerError;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Something that can display an image file.
pub trait ImageViewer {
    fn open(&self, path: &Path) -> Result<(), ViewerError>;
}

/// A viewer that does nothing; used for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViewer;

impl ImageViewer for NoViewer {
    fn open(&self, _path: &Path) -> Result<(), ViewerError> {
        Ok(())
    }
}

/// The host's default image viewer.
///
/// Uses `open` on macOS, `cmd /C start` on Windows and `xdg-open` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl SystemViewer {
    #[cfg(target_os = "macos")]
    const PROGRAM: &'static str = "open";
    #[cfg(target_os = "windows")]
    const PROGRAM: &'static str = "cmd";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const PROGRAM: &'static str = "xdg-open";

    fn command(path: &Path) -> Command {
        let mut command = Command::new(Self::PROGRAM);
        #[cfg(target_os = "windows")]
        command.args(["/C", "start", ""]);
        command.arg(path);
        command
    }
}

impl ImageViewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<(), ViewerError> {
        let status = Self::command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ViewerError::Launch {
                source,
                program: Self::PROGRAM,
                path: path.to_path_buf(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ViewerError::Exit {
                program: Self::PROGRAM,
                status,
                path: path.to_path_buf(),
            })
        }
    }
}

/// Opens `path` with `viewer`, logging instead of failing.
///
/// Returns whether the viewer reported success.
pub fn show(viewer: &dyn ImageViewer, path: &Path) -> bool {
    match viewer.open(path) {
        Ok(()) => {
            #[cfg(feature = "tracing")]
            debug!(path = %path.display(), "Opened chart");
            true
        }
        Err(err) => {
            #[cfg(feature = "tracing")]
            warn!(error = %err, "Could not open chart");
            #[cfg(not(feature = "tracing"))]
            drop(err);
            false
        }
    }
}
