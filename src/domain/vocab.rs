// ============================================================
// Layer 3: Character Vocabulary
// ============================================================
// Maps single characters (plus a few special tokens such as
// <PAD> and <UNK>) to integer ids and back.
//
//   word2idx: "<UNK>" → 0, "<PAD>" → 1, "的" → 2, ...
//   idx2word: 0 → "<UNK>", 1 → "<PAD>", 2 → "的", ...
//
// Any token missing from word2idx encodes as id 0.

use std::collections::HashMap;

pub const PAD_TOKEN: &str = "<PAD>";
pub const UNK_TOKEN: &str = "<UNK>";

/// Id used for tokens that are not in the vocabulary.
pub const UNKNOWN_INDEX: i64 = 0;

#[derive(Debug, Clone)]
pub struct Vocab {
    word2idx:  HashMap<String, i64>,
    idx2word:  HashMap<i64, String>,
    pad_index: i64,
}

impl Vocab {
    pub fn new(word2idx: HashMap<String, i64>, idx2word: HashMap<i64, String>) -> Self {
        let pad_index = word2idx.get(PAD_TOKEN).copied().unwrap_or(UNKNOWN_INDEX);
        Self { word2idx, idx2word, pad_index }
    }

    /// Number of entries in word2idx
    pub fn len(&self) -> usize {
        self.word2idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word2idx.is_empty()
    }

    pub fn pad_index(&self) -> i64 {
        self.pad_index
    }

    pub fn index_of(&self, token: &str) -> i64 {
        self.word2idx.get(token).copied().unwrap_or(UNKNOWN_INDEX)
    }

    pub fn index_of_char(&self, c: char) -> i64 {
        let mut buf = [0u8; 4];
        self.index_of(c.encode_utf8(&mut buf))
    }

    /// Encode characters, then right-pad with the <PAD> id or truncate
    /// so the result has exactly `len` ids.
    pub fn encode_padded(&self, chars: &[char], len: usize) -> Vec<i64> {
        let mut ids: Vec<i64> = chars
            .iter()
            .take(len)
            .map(|&c| self.index_of_char(c))
            .collect();
        ids.resize(len, self.pad_index);
        ids
    }

    /// Token for an id; ids outside idx2word come back as <UNK>.
    pub fn token_of(&self, index: i64) -> &str {
        self.idx2word
            .get(&index)
            .map(String::as_str)
            .unwrap_or(UNK_TOKEN)
    }

    /// Turn ids back into text, dropping padding.
    pub fn decode(&self, ids: &[i64]) -> String {
        ids.iter()
            .filter(|&&id| id != self.pad_index)
            .map(|&id| self.token_of(id))
            .collect()
    }
}

/// Six-entry vocabulary shared by unit tests across the crate:
/// <UNK>=0, <PAD>=1, a=2, b=3, c=4, é=5.
#[cfg(test)]
pub(crate) fn sample_vocab() -> Vocab {
    let words = ["<UNK>", "<PAD>", "a", "b", "c", "é"];
    let word2idx = words
        .iter()
        .enumerate()
        .map(|(i, w)| (w.to_string(), i as i64))
        .collect();
    let idx2word = words
        .iter()
        .enumerate()
        .map(|(i, w)| (i as i64, w.to_string()))
        .collect();
    Vocab::new(word2idx, idx2word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_token_maps_to_zero() {
        let v = sample_vocab();
        assert_eq!(v.index_of("z"), 0);
        assert_eq!(v.index_of_char('b'), 3);
        assert_eq!(v.index_of_char('é'), 5);
    }

    #[test]
    fn test_encode_pads_with_pad_index() {
        let v = sample_vocab();
        assert_eq!(v.encode_padded(&['a', 'z'], 4), vec![2, 0, 1, 1]);
    }

    #[test]
    fn test_encode_truncates() {
        let v = sample_vocab();
        assert_eq!(v.encode_padded(&['a', 'b', 'c'], 2), vec![2, 3]);
    }

    #[test]
    fn test_missing_pad_entry_pads_with_unknown() {
        let word2idx = HashMap::from([("a".to_string(), 4)]);
        let v = Vocab::new(word2idx, HashMap::new());
        assert_eq!(v.pad_index(), UNKNOWN_INDEX);
        assert_eq!(v.encode_padded(&['a'], 3), vec![4, 0, 0]);
    }

    #[test]
    fn test_decode_skips_padding() {
        let v = sample_vocab();
        assert_eq!(v.decode(&[2, 3, 1, 1]), "ab");
        assert_eq!(v.decode(&[0, 99]), "<UNK><UNK>");
    }
}
