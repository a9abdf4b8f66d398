//! SPIR-V word decoding
//!
//! SPIR-V is a stream of 32-bit words. Modules on disk are little-endian, so
//! bytes `[4i, 4i+1, 4i+2, 4i+3]` become word `i` with byte `4i` as the least
//! significant byte.

const WORD_SIZE: usize = std::mem::size_of::<u32>();

/// Words decoded from a binary module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpirvWords {
    words: Vec<u32>,
    dropped_bytes: usize,
}

impl SpirvWords {
    pub fn as_slice(&self) -> &[u32] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Size in bytes of the decoded words (always `4 * len()`)
    pub fn byte_len(&self) -> usize {
        self.words.len() * WORD_SIZE
    }

    /// Trailing bytes (0-3) that did not form a whole word
    pub fn dropped_bytes(&self) -> usize {
        self.dropped_bytes
    }

    /// Re-encode the words as little-endian bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    pub fn into_words(self) -> Vec<u32> {
        self.words
    }
}

/// Decode a byte buffer into little-endian words.
///
/// A trailing partial word is discarded, not reported as an error.
pub fn decode_words(bytes: &[u8]) -> SpirvWords {
    let chunks = bytes.chunks_exact(WORD_SIZE);
    let dropped_bytes = chunks.remainder().len();
    let words = chunks
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    SpirvWords { words, dropped_bytes }
}
