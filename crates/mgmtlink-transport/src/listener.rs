use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::stream::ControlStream;

/// Listening end of the management control channel.
///
/// Bound by the coordinating process; managed proxies and administrative
/// clients connect. The socket file is created with restrictive
/// permissions and removed again on drop, provided it is still the file
/// we created.
pub struct ControlSocket {
    listener: UnixListener,
    path: PathBuf,
    created_inode: Option<(u64, u64)>,
}

impl ControlSocket {
    /// Default permission mode for the socket path.
    pub const DEFAULT_SOCKET_MODE: u32 = 0o600;

    /// Maximum socket path length (`sockaddr_un.sun_path`).
    #[cfg(target_os = "linux")]
    const MAX_PATH_LEN: usize = 108;
    #[cfg(not(target_os = "linux"))]
    const MAX_PATH_LEN: usize = 104;

    /// Bind and listen on a filesystem-path socket.
    ///
    /// A pre-existing file at `path` is removed first if (and only if) it
    /// is a socket, so a crashed coordinator can rebind after restart.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
        Self::bind_with_mode(path, Self::DEFAULT_SOCKET_MODE)
    }

    /// Bind with an explicit permission mode on the socket path.
    pub fn bind_with_mode(path: impl AsRef<Path>, mode: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let path_bytes = path.as_os_str().len();
        if path_bytes >= Self::MAX_PATH_LEN {
            return Err(TransportError::PathTooLong {
                path,
                len: path_bytes,
                max: Self::MAX_PATH_LEN,
            });
        }

        let bind_err = |path: &PathBuf| {
            let path = path.clone();
            move |e: std::io::Error| TransportError::Bind { path, source: e }
        };

        // Remove a stale socket, but never remove anything else.
        if path.exists() {
            let metadata = std::fs::symlink_metadata(&path).map_err(bind_err(&path))?;
            if metadata.file_type().is_socket() {
                debug!(?path, "removing stale control socket");
                std::fs::remove_file(&path).map_err(bind_err(&path))?;
            } else {
                return Err(TransportError::Bind {
                    path: path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "existing path is not a unix socket",
                    ),
                });
            }
        }

        let listener = UnixListener::bind(&path).map_err(bind_err(&path))?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
            .map_err(bind_err(&path))?;

        let created = std::fs::symlink_metadata(&path).map_err(bind_err(&path))?;
        let created_inode = Some((created.dev(), created.ino()));

        info!(?path, "control socket listening");

        Ok(Self {
            listener,
            path,
            created_inode,
        })
    }

    /// Accept one incoming control connection (blocking).
    pub fn accept(&self) -> Result<ControlStream> {
        let (stream, _addr) = self.listener.accept().map_err(TransportError::Accept)?;
        debug!("accepted control connection");
        Ok(ControlStream::from_unix(stream))
    }

    /// Connect to a listening control socket (blocking).
    pub fn connect(path: impl AsRef<Path>) -> Result<ControlStream> {
        let path = path.as_ref();
        let stream = UnixStream::connect(path).map_err(|e| TransportError::Connect {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(?path, "connected to control socket");
        Ok(ControlStream::from_unix(stream))
    }

    /// The path this socket is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ControlSocket {
    fn drop(&mut self) {
        if let Some((expected_dev, expected_ino)) = self.created_inode {
            if let Ok(metadata) = std::fs::symlink_metadata(&self.path) {
                if metadata.file_type().is_socket()
                    && metadata.dev() == expected_dev
                    && metadata.ino() == expected_ino
                {
                    debug!(path = ?self.path, "removing control socket file");
                    let _ = std::fs::remove_file(&self.path);
                } else {
                    debug!(path = ?self.path, "socket path identity changed; leaving file");
                }
            }
        }
    }
}
