//! Request dispatch for the display files
//!
//! [`DeviceFs`] owns the display controller behind a blocking mutex, so
//! every request runs to completion before the next one starts. Writes are
//! always accepted: bad input shows "Err!" on the display and is not
//! reported to the client. Only hardware faults fail a request.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;
use tm1650_core::config::{ServiceConfig, MAX_NAME_LEN};
use tm1650_core::{DisplayController, FlushError, HardwareSink};

use crate::file::{DevFile, FileInfo, Handle, Node, DIR_PERM, DMDIR};

/// Errors returned to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsError<E> {
    /// No such file
    NotFound,
    /// Exclusive file already open
    Busy,
    /// Service not started, or already ended
    NotStarted,
    /// Writing to the display hardware failed
    Hardware(FlushError<E>),
}

impl<E> From<FlushError<E>> for FsError<E> {
    fn from(error: FlushError<E>) -> Self {
        FsError::Hardware(error)
    }
}

struct Inner<S> {
    controller: DisplayController<S>,
    open: [bool; DevFile::ALL.len()],
    started: bool,
    /// Bumped on every start; handles from earlier sessions are stale
    session: u32,
}

impl<S: HardwareSink> Inner<S> {
    fn check_started(&self) -> Result<(), FsError<S::Error>> {
        if self.started {
            Ok(())
        } else {
            Err(FsError::NotStarted)
        }
    }

    fn check_handle(&self, handle: &Handle) -> Result<(), FsError<S::Error>> {
        self.check_started()?;
        if handle.session() == self.session {
            Ok(())
        } else {
            Err(FsError::NotStarted)
        }
    }
}

/// The display service: a directory with `ctl` and `display`
pub struct DeviceFs<M: RawMutex, S> {
    name: String<MAX_NAME_LEN>,
    inner: Mutex<M, RefCell<Inner<S>>>,
}

impl<M: RawMutex, S: HardwareSink> DeviceFs<M, S> {
    /// Create the service; call [`Self::start`] before serving requests
    pub fn new(controller: DisplayController<S>, service: &ServiceConfig) -> Self {
        Self {
            name: service.name.clone(),
            inner: Mutex::new(RefCell::new(Inner {
                controller,
                open: [false; DevFile::ALL.len()],
                started: false,
                session: 0,
            })),
        }
    }

    /// Service name, also the directory name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initialize the display and begin a new session
    ///
    /// Handles opened before this call are stale.
    pub fn start(&self) -> Result<(), FsError<S::Error>> {
        self.with_inner(|inner| {
            inner.started = false;
            inner.open = [false; DevFile::ALL.len()];
            inner.session = inner.session.wrapping_add(1);
            inner.controller.init()?;
            inner.started = true;

            #[cfg(feature = "defmt")]
            defmt::info!("serving {}", self.name.as_str());

            Ok(())
        })
    }

    /// Clear and power off the display, and close every handle
    ///
    /// Does nothing if the service is not started. If the display cannot
    /// be cleared the service keeps serving and `end` can be retried.
    pub fn end(&self) -> Result<(), FsError<S::Error>> {
        self.with_inner(|inner| {
            if !inner.started {
                return Ok(());
            }
            inner.controller.shutdown()?;
            inner.started = false;
            inner.open = [false; DevFile::ALL.len()];
            Ok(())
        })
    }

    /// Check if requests are being served
    pub fn is_started(&self) -> bool {
        self.inner.lock(|inner| inner.borrow().started)
    }

    /// Resolve a path
    ///
    /// Accepts `<service>`, `<service>/<file>` and `<file>`, with or
    /// without a leading `/`.
    pub fn walk(&self, path: &str) -> Result<Node, FsError<S::Error>> {
        let path = path.trim_start_matches('/');
        let path = match path.strip_prefix(self.name.as_str()) {
            Some("") => return Ok(Node::Root),
            Some(rest) if rest.starts_with('/') => &rest[1..],
            _ => path,
        };

        if path.is_empty() {
            return Ok(Node::Root);
        }
        DevFile::from_name(path)
            .map(Node::File)
            .ok_or(FsError::NotFound)
    }

    /// Name and mode of a node
    pub fn stat(&self, node: Node) -> FileInfo<'_> {
        match node {
            Node::Root => FileInfo {
                name: &self.name,
                mode: DMDIR | DIR_PERM,
            },
            Node::File(file) => FileInfo {
                name: file.name(),
                mode: file.mode(),
            },
        }
    }

    /// Directory listing
    pub fn list(&self) -> impl Iterator<Item = FileInfo<'static>> {
        DevFile::ALL.into_iter().map(|file| FileInfo {
            name: file.name(),
            mode: file.mode(),
        })
    }

    /// Open a file for reading and writing
    pub fn open(&self, file: DevFile) -> Result<Handle, FsError<S::Error>> {
        self.with_inner(|inner| {
            inner.check_started()?;
            let open = &mut inner.open[file.index()];
            if *open {
                return Err(FsError::Busy);
            }
            *open = true;
            Ok(Handle::new(file, inner.session))
        })
    }

    /// Close a handle
    ///
    /// A stale handle is dropped without touching the current session.
    pub fn clunk(&self, handle: Handle) {
        self.with_inner(|inner| {
            if handle.session() == inner.session {
                inner.open[handle.file().index()] = false;
            }
        });
    }

    /// Read the file's status record starting at `offset`
    ///
    /// Returns the number of bytes copied; 0 at or past the end.
    pub fn read(
        &self,
        handle: &Handle,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, FsError<S::Error>> {
        self.with_inner(|inner| {
            inner.check_handle(handle)?;
            let count = match handle.file() {
                DevFile::Ctl => copy_from(&inner.controller.read_control(), offset, buf),
                DevFile::Display => copy_from(&inner.controller.read_display(), offset, buf),
            };
            Ok(count)
        })
    }

    /// Apply a write and report the whole buffer as accepted
    pub fn write(&self, handle: &Handle, data: &[u8]) -> Result<usize, FsError<S::Error>> {
        self.with_inner(|inner| {
            inner.check_handle(handle)?;
            let result = match handle.file() {
                DevFile::Ctl => inner.controller.apply_command(data),
                DevFile::Display => inner.controller.set_text(data),
            };

            match result {
                Ok(_) => Ok(data.len()),
                Err(error) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("{} write failed at {}", handle.file(), error.endpoint);
                    Err(error.into())
                }
            }
        })
    }

    /// Inspect the controller
    pub fn with_controller<R>(&self, f: impl FnOnce(&DisplayController<S>) -> R) -> R {
        self.inner.lock(|inner| f(&inner.borrow().controller))
    }

    /// Take back the controller, e.g. to release the sink after [`Self::end`]
    pub fn into_controller(self) -> DisplayController<S> {
        self.inner.into_inner().into_inner().controller
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner<S>) -> R) -> R {
        self.inner.lock(|inner| f(&mut inner.borrow_mut()))
    }
}

/// Copy `src[offset..]` into `buf`
fn copy_from(src: &[u8], offset: usize, buf: &mut [u8]) -> usize {
    let Some(rest) = src.get(offset..) else {
        return 0;
    };
    let count = rest.len().min(buf.len());
    buf[..count].copy_from_slice(&rest[..count]);
    count
}
