//! File browser over the controller's flat path list
//!
//! The controller reports full paths such as `parts/gear.gcode`. The
//! browser shows one directory level at a time, directories first.

use heapless::{String, Vec};

use crate::traits::{FileList, MAX_FILES, MAX_PATH_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    Directory,
    File,
}

/// One row of the current directory
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Entry {
    pub kind: EntryKind,
    pub name: String<MAX_PATH_LEN>,
}

/// Result of selecting an entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selected {
    /// Browser moved into a subdirectory
    Directory,
    /// Full path of the chosen file
    File(String<MAX_PATH_LEN>),
}

/// Directory view over a flat path list
#[derive(Debug, Clone, Default)]
pub struct FileBrowser {
    paths: FileList,
    prefix: String<MAX_PATH_LEN>,
    entries: Vec<Entry, MAX_FILES>,
}

impl FileBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the path list and return to the top directory
    pub fn load(&mut self, paths: FileList) {
        self.paths = paths;
        self.prefix.clear();
        self.rebuild();
    }

    /// Entries of the current directory
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the browser is at the top directory
    pub fn is_root(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Current directory, with a trailing `/` unless at the top
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Select entry `index` of the current directory
    pub fn select(&mut self, index: usize) -> Option<Selected> {
        let entry = self.entries.get(index)?;
        match entry.kind {
            EntryKind::Directory => {
                let mut prefix = self.prefix.clone();
                prefix.push_str(&entry.name).ok()?;
                prefix.push('/').ok()?;
                self.prefix = prefix;
                self.rebuild();
                Some(Selected::Directory)
            }
            EntryKind::File => {
                let mut path = self.prefix.clone();
                path.push_str(&entry.name).ok()?;
                Some(Selected::File(path))
            }
        }
    }

    /// Go up one directory; returns false at the top
    pub fn up(&mut self) -> bool {
        if self.prefix.is_empty() {
            return false;
        }
        let trimmed = self.prefix.trim_end_matches('/');
        let keep = trimmed.rfind('/').map(|i| i + 1).unwrap_or(0);
        self.prefix.truncate(keep);
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        self.entries.clear();
        let mut files: Vec<Entry, MAX_FILES> = Vec::new();

        for path in self.paths.iter() {
            let Some(rest) = path.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            match rest.split_once('/') {
                Some((dir, _)) => {
                    let exists = self
                        .entries
                        .iter()
                        .any(|e| e.kind == EntryKind::Directory && e.name == dir);
                    if !exists {
                        if let Some(entry) = make_entry(EntryKind::Directory, dir) {
                            let _ = self.entries.push(entry);
                        }
                    }
                }
                None => {
                    if let Some(entry) = make_entry(EntryKind::File, rest) {
                        let _ = files.push(entry);
                    }
                }
            }
        }

        for file in files {
            if self.entries.push(file).is_err() {
                break;
            }
        }
    }
}

fn make_entry(kind: EntryKind, name: &str) -> Option<Entry> {
    let mut entry = Entry {
        kind,
        name: String::new(),
    };
    entry.name.push_str(name).ok()?;
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> FileList {
        let mut out = FileList::new();
        for p in list {
            let mut s = String::new();
            s.push_str(p).unwrap();
            out.push(s).unwrap();
        }
        out
    }

    #[test]
    fn test_directories_listed_first() {
        let mut browser = FileBrowser::new();
        browser.load(paths(&[
            "cube.gcode",
            "parts/gear.gcode",
            "benchy.gcode",
            "parts/shaft.gcode",
            "calibration/flow.gcode",
        ]));

        let entries = browser.entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].name, "parts");
        assert_eq!(entries[1].name, "calibration");
        assert_eq!(entries[2].name, "cube.gcode");
        assert_eq!(entries[3].name, "benchy.gcode");
    }

    #[test]
    fn test_descend_and_select_file() {
        let mut browser = FileBrowser::new();
        browser.load(paths(&["parts/small/pin.gcode", "parts/gear.gcode"]));
        assert!(browser.is_root());

        assert_eq!(browser.select(0), Some(Selected::Directory));
        assert_eq!(browser.prefix(), "parts/");
        assert_eq!(browser.entries()[0].name, "small");
        assert_eq!(browser.entries()[1].name, "gear.gcode");

        match browser.select(1) {
            Some(Selected::File(path)) => assert_eq!(path, "parts/gear.gcode"),
            other => panic!("unexpected selection {:?}", other),
        }
    }

    #[test]
    fn test_up_to_root() {
        let mut browser = FileBrowser::new();
        browser.load(paths(&["a/b/c.gcode"]));
        browser.select(0);
        browser.select(0);
        assert_eq!(browser.prefix(), "a/b/");

        assert!(browser.up());
        assert_eq!(browser.prefix(), "a/");
        assert!(browser.up());
        assert!(browser.is_root());
        assert!(!browser.up());
        assert_eq!(browser.entries()[0].name, "a");
    }

    #[test]
    fn test_empty_listing() {
        let mut browser = FileBrowser::new();
        browser.load(FileList::new());
        assert!(browser.is_empty());
        assert_eq!(browser.select(0), None);
    }
}
