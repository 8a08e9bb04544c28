//! Keyboard snapshot for deterministic replay testing

use crate::navigator::Selection;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Observable keyboard state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardSnapshot {
    pub selection: Selection,
    pub cursor: usize,
    pub text: String,
    pub clear_default_text: bool,
    pub overlay_visible: bool,
    pub overlay_message: String,
    pub minimum_length: usize,
}

impl KeyboardSnapshot {
    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update([self.selection.layout.index() as u8]);
        hasher.update(self.selection.row.to_le_bytes());
        hasher.update(self.selection.column.to_le_bytes());
        hasher.update([self.selection.cursor_select as u8]);

        hasher.update(self.cursor.to_le_bytes());
        hasher.update(self.text.as_bytes());
        hasher.update([0]);
        hasher.update([self.clear_default_text as u8]);

        hasher.update([self.overlay_visible as u8]);
        hasher.update(self.overlay_message.as_bytes());
        hasher.update(self.minimum_length.to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}
