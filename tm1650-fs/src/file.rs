//! File tree of the display service
//!
//! ```text
//! <service>/        d 0555
//!     ctl           exclusive 0666
//!     display       exclusive 0666
//! ```

/// Directory bit of a file mode
pub const DMDIR: u32 = 0x8000_0000;

/// Exclusive-use bit of a file mode; only one open handle at a time
pub const DMEXCL: u32 = 0x2000_0000;

/// Permission bits of the service directory
pub const DIR_PERM: u32 = 0o555;

/// Permission bits of the device files
pub const FILE_PERM: u32 = 0o666;

/// The device files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DevFile {
    /// Power and brightness
    Ctl,
    /// Digit contents
    Display,
}

impl DevFile {
    /// All files in directory order
    pub const ALL: [Self; 2] = [DevFile::Ctl, DevFile::Display];

    /// File name
    pub const fn name(self) -> &'static str {
        match self {
            DevFile::Ctl => "ctl",
            DevFile::Display => "display",
        }
    }

    /// Look up a file by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|file| file.name() == name)
    }

    /// Mode bits
    pub const fn mode(self) -> u32 {
        DMEXCL | FILE_PERM
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            DevFile::Ctl => 0,
            DevFile::Display => 1,
        }
    }
}

/// A node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Node {
    /// The service directory
    Root,
    /// A device file
    File(DevFile),
}

/// Name and mode of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FileInfo<'a> {
    /// File or directory name
    pub name: &'a str,
    /// Permission bits plus `DMDIR`/`DMEXCL`
    pub mode: u32,
}

impl FileInfo<'_> {
    /// Check if the node is a directory
    pub fn is_dir(&self) -> bool {
        self.mode & DMDIR != 0
    }

    /// Check if the node allows only one open handle
    pub fn is_exclusive(&self) -> bool {
        self.mode & DMEXCL != 0
    }
}

/// An open device file
///
/// Not `Clone`: the exclusive-open rule allows one handle per file, and
/// giving it back with `DeviceFs::clunk` releases the file. A handle is
/// bound to the session it was opened in and goes stale once the service
/// is ended or restarted.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handle {
    file: DevFile,
    session: u32,
}

impl Handle {
    pub(crate) const fn new(file: DevFile, session: u32) -> Self {
        Self { file, session }
    }

    pub(crate) const fn session(&self) -> u32 {
        self.session
    }

    /// The opened file
    pub const fn file(&self) -> DevFile {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(DevFile::from_name("ctl"), Some(DevFile::Ctl));
        assert_eq!(DevFile::from_name("display"), Some(DevFile::Display));
        assert_eq!(DevFile::from_name("Display"), None);
        assert_eq!(DevFile::from_name(""), None);
    }

    #[test]
    fn test_modes() {
        let info = FileInfo {
            name: "ctl",
            mode: DevFile::Ctl.mode(),
        };
        assert!(info.is_exclusive());
        assert!(!info.is_dir());
        assert_eq!(info.mode & 0o777, 0o666);
    }
}
