use crc32fast::Hasher;

use crate::index::DocumentIndex;

/// Stable seed for a document key (page uri, file path)
pub fn document_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for elements added to a document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // CRC32 of the document key
    count: u32,
}

impl IdGenerator {
    pub fn new(key: &str) -> Self {
        Self {
            seed: document_seed(key),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Next sequential id for an element kind
    pub fn new_id(&mut self, kind: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", kind, self.seed, self.count)
    }

    /// Next id not already used in the document
    pub fn fresh_id(&mut self, kind: &str, index: &DocumentIndex) -> String {
        loop {
            let id = self.new_id(kind);
            if !index.contains_id(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
