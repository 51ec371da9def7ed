use std::path::{Path, PathBuf};

/// Identity of one selection event. Picking the same path twice yields two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionId(u64);

/// The file the user picked, plus the name shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedInput {
    pub id: SelectionId,
    pub path: PathBuf,
    pub display_name: String,
}

#[derive(Debug, Default)]
pub struct SelectionTracker {
    current: Option<SelectedInput>,
    next_id: u64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection.
    ///
    /// Returns `None` and leaves the selection untouched when the path has no
    /// usable file name, which is treated like an empty picker event.
    pub fn select(&mut self, path: impl Into<PathBuf>) -> Option<&SelectedInput> {
        let path = path.into();
        let display_name = display_name(&path)?;
        self.next_id += 1;
        self.current = Some(SelectedInput {
            id: SelectionId(self.next_id),
            path,
            display_name,
        });
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&SelectedInput> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<SelectionId> {
        self.current.as_ref().map(|s| s.id)
    }
}

fn display_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let tracker = SelectionTracker::new();
        assert!(tracker.current().is_none());
        assert!(tracker.current_id().is_none());
    }

    #[test]
    fn display_name_is_file_name() {
        let mut tracker = SelectionTracker::new();
        let selected = tracker.select("/tmp/voices/sample.wav").unwrap();
        assert_eq!(selected.display_name, "sample.wav");
        assert_eq!(selected.path, PathBuf::from("/tmp/voices/sample.wav"));
    }

    #[test]
    fn display_name_is_trimmed() {
        let mut tracker = SelectionTracker::new();
        let selected = tracker.select("/tmp/ clip.mp3 ").unwrap();
        assert_eq!(selected.display_name, "clip.mp3");
    }

    #[test]
    fn reselecting_replaces_and_issues_new_id() {
        let mut tracker = SelectionTracker::new();
        let first = tracker.select("a.wav").unwrap().id;
        let second = tracker.select("a.wav").unwrap().id;
        assert_ne!(first, second);
        assert_eq!(tracker.current_id(), Some(second));

        tracker.select("b.wav");
        assert_eq!(tracker.current().unwrap().display_name, "b.wav");
    }

    #[test]
    fn path_without_file_name_is_ignored() {
        let mut tracker = SelectionTracker::new();
        tracker.select("keep.wav");
        assert!(tracker.select("..").is_none());
        assert!(tracker.select("/").is_none());
        assert_eq!(tracker.current().unwrap().display_name, "keep.wav");
    }
}
