use crate::bounding_box::BoundingBox;
use crate::slots::{Slot, SlotFiles};
use std::collections::HashMap;

pub struct SlotWatcher {
    files: SlotFiles,
    last_seen: HashMap<Slot, String>,
}

impl SlotWatcher {
    pub fn new(files: SlotFiles) -> Self {
        Self {
            files,
            last_seen: HashMap::new(),
        }
    }

    /// Changed, non-empty slots in `Slot::ALL` order.
    ///
    /// Missing files are skipped. Files that cannot be read and text that
    /// does not parse (a write caught half way) are skipped without being
    /// remembered, so the next poll looks at them again.
    pub fn poll(&mut self) -> Vec<(Slot, BoundingBox)> {
        let mut changed = Vec::new();
        for slot in Slot::ALL {
            let text = match self.files.read_raw(slot) {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(%slot, err = %format!("{:#}", err), "slot read failed");
                    continue;
                }
            };
            if text.trim().is_empty() || self.last_seen.get(&slot) == Some(&text) {
                continue;
            }
            match text.parse::<BoundingBox>() {
                Ok(bbox) => {
                    changed.push((slot, bbox));
                    self.last_seen.insert(slot, text);
                }
                Err(err) => {
                    tracing::warn!(%slot, %err, "skipping unreadable slot file");
                }
            }
        }
        changed
    }
}
