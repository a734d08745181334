//! Boot-file inventory
//!
//! Lists the loader binaries in the TFTP root with a derived type
//! classification and human-readable sizes.

use std::fs;
use std::io;
use std::path::Path;

/// Derived classification of a boot loader binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootFileKind {
    /// Legacy BIOS loader (`.kpxe` or an `undionly` build)
    Bios,
    /// UEFI application
    Uefi,
    Other,
}

impl BootFileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BootFileKind::Bios => "bios",
            BootFileKind::Uefi => "uefi",
            BootFileKind::Other => "other",
        }
    }

    fn classify(name: &str) -> Self {
        if name.contains(".kpxe") || name.contains("undionly") {
            BootFileKind::Bios
        } else if name.contains(".efi") {
            BootFileKind::Uefi
        } else {
            BootFileKind::Other
        }
    }
}

/// One file in the TFTP root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootFile {
    pub name: String,
    /// Human-readable size: KB below 1 MiB, MB at or above
    pub size: String,
    pub kind: BootFileKind,
}

/// List the files in the TFTP root, sorted by name.
///
/// Subdirectories are skipped. A missing root surfaces as the underlying
/// I/O error; that belongs to the caller, not the engine.
pub fn list_boot_files(root: &Path) -> io::Result<Vec<BootFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push(BootFile {
            kind: BootFileKind::classify(&name),
            size: format_size(metadata.len()),
            name,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn format_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, len: usize) {
        let mut f = File::create(dir.path().join(name)).unwrap();
        f.write_all(&vec![0u8; len]).unwrap();
    }

    #[test]
    fn test_classification() {
        assert_eq!(BootFileKind::classify("undionly.kpxe"), BootFileKind::Bios);
        assert_eq!(BootFileKind::classify("undionly.pxe"), BootFileKind::Bios);
        assert_eq!(BootFileKind::classify("ipxe.efi"), BootFileKind::Uefi);
        assert_eq!(BootFileKind::classify("memdisk"), BootFileKind::Other);
    }

    #[test]
    fn test_format_size_boundary() {
        assert_eq!(format_size(512), "0.5 KB");
        assert_eq!(format_size(1024 * 1024 - 1), "1024.0 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.5 MB");
    }

    #[test]
    fn test_list_boot_files() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "undionly.kpxe", 70 * 1024);
        write_file(&dir, "ipxe.efi", 2 * 1024 * 1024);
        write_file(&dir, "notes.txt", 10);
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let files = list_boot_files(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["ipxe.efi", "notes.txt", "undionly.kpxe"]);

        assert_eq!(files[0].kind, BootFileKind::Uefi);
        assert_eq!(files[0].size, "2.0 MB");
        assert_eq!(files[1].kind, BootFileKind::Other);
        assert_eq!(files[2].kind, BootFileKind::Bios);
        assert_eq!(files[2].size, "70.0 KB");
    }

    #[test]
    fn test_list_boot_files_missing_root() {
        assert!(list_boot_files(Path::new("/nonexistent/tftp/root")).is_err());
    }
}
