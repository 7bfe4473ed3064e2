use crate::bounding_box::BoundingBox;
use anyhow::Context;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Current,
    Left,
    Right,
    Top,
    Bottom,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Current,
        Slot::Left,
        Slot::Right,
        Slot::Top,
        Slot::Bottom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Current => "current",
            Slot::Left => "left",
            Slot::Right => "right",
            Slot::Top => "top",
            Slot::Bottom => "bottom",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::Current => "current_coords.txt",
            Slot::Left => "left_coords.txt",
            Slot::Right => "right_coords.txt",
            Slot::Top => "top_coords.txt",
            Slot::Bottom => "bottom_coords.txt",
        }
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five slot files inside one directory.
///
/// Writes truncate and rewrite the whole file. Readers polling the
/// directory may observe a partially written file.
#[derive(Debug, Clone)]
pub struct SlotFiles {
    dir: PathBuf,
}

impl SlotFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(slot.file_name())
    }

    /// Creates every missing slot file empty. Existing files keep their content.
    pub fn ensure_created(&self) -> anyhow::Result<()> {
        for slot in Slot::ALL {
            let path = self.path(slot);
            if !path.exists() {
                fs::write(&path, "")
                    .with_context(|| format!("Failed to create slot file {}", path.display()))?;
                tracing::debug!(slot = %slot, path = %path.display(), "created empty slot file");
            }
        }
        Ok(())
    }

    pub fn store(&self, slot: Slot, bbox: &BoundingBox) -> anyhow::Result<()> {
        let path = self.path(slot);
        fs::write(&path, bbox.to_string())
            .with_context(|| format!("Failed to write slot file {}", path.display()))
    }

    pub fn read_raw(&self, slot: Slot) -> anyhow::Result<Option<String>> {
        let path = self.path(slot);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read slot file {}", path.display()))
            }
        }
    }

    pub fn load(&self, slot: Slot) -> anyhow::Result<Option<BoundingBox>> {
        match self.read_raw(slot)? {
            Some(text) if !text.trim().is_empty() => {
                let bbox = text.parse::<BoundingBox>().with_context(|| {
                    format!("Malformed slot file {}", self.path(slot).display())
                })?;
                Ok(Some(bbox))
            }
            _ => Ok(None),
        }
    }

    pub fn load_all(&self) -> anyhow::Result<Vec<(Slot, Option<BoundingBox>)>> {
        Slot::ALL
            .into_iter()
            .map(|slot| Ok((slot, self.load(slot)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn slot_files() -> (TempDir, SlotFiles) {
        let dir = tempfile::tempdir().unwrap();
        let files = SlotFiles::new(dir.path());
        (dir, files)
    }

    #[test]
    fn ensure_created_makes_five_empty_files() {
        let (_dir, files) = slot_files();
        files.ensure_created().unwrap();

        for slot in Slot::ALL {
            assert_eq!(fs::read_to_string(files.path(slot)).unwrap(), "");
            assert_eq!(files.load(slot).unwrap(), None);
        }
    }

    #[test]
    fn ensure_created_twice_keeps_existing_content() {
        let (_dir, files) = slot_files();
        files.ensure_created().unwrap();
        files
            .store(Slot::Left, &BoundingBox::new(1, 2, 3, 4))
            .unwrap();

        files.ensure_created().unwrap();

        assert_eq!(
            fs::read_to_string(files.path(Slot::Left)).unwrap(),
            "1,2,3,4"
        );
    }

    #[test]
    fn store_overwrites_previous_value() {
        let (_dir, files) = slot_files();
        files
            .store(Slot::Current, &BoundingBox::new(1, 2, 3, 4))
            .unwrap();
        files
            .store(Slot::Current, &BoundingBox::new(5, 6, 7, 8))
            .unwrap();

        assert_eq!(
            fs::read_to_string(files.path(Slot::Current)).unwrap(),
            "5,6,7,8"
        );
    }

    #[test]
    fn missing_file_reads_as_none() {
        let (_dir, files) = slot_files();
        assert_eq!(files.read_raw(Slot::Top).unwrap(), None);
        assert_eq!(files.load(Slot::Top).unwrap(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let (_dir, files) = slot_files();
        fs::write(files.path(Slot::Bottom), "garbage").unwrap();
        assert!(files.load(Slot::Bottom).is_err());
    }

    #[test]
    fn store_into_missing_directory_fails() {
        let (dir, _) = slot_files();
        let files = SlotFiles::new(dir.path().join("does-not-exist"));
        assert!(files
            .store(Slot::Current, &BoundingBox::new(0, 0, 1, 1))
            .is_err());
    }

    #[test]
    fn load_all_reports_every_slot() {
        let (_dir, files) = slot_files();
        files.ensure_created().unwrap();
        let face = BoundingBox::new(750, 50, 100, 100);
        files.store(Slot::Right, &face).unwrap();

        let loaded = files.load_all().unwrap();

        assert_eq!(loaded.len(), 5);
        for (slot, bbox) in loaded {
            let expected = (slot == Slot::Right).then_some(face);
            assert_eq!(bbox, expected, "slot {slot}");
        }
    }

    #[test]
    fn slot_names_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_name(slot.name()), Some(slot));
        }
        assert_eq!(Slot::from_name("middle"), None);
    }
}
