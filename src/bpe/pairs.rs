use super::Pair;
use crate::word::Vocabulary;
use std::{
    cmp::Ordering::{self, Equal},
    collections::HashMap,
};

/// 相邻符号对的频率表，按词频加权。
///
/// 表中只保存计数为正的符号对。
#[derive(Clone, Default, Debug)]
pub struct PairTable {
    counts: HashMap<Pair, i64>,
}

impl PairTable {
    /// 遍历所有词的所有相邻符号对，累加词频。
    pub fn build(vocab: &Vocabulary) -> Self {
        let mut ans = Self::default();
        for entry in vocab.iter() {
            for (a, b) in entry.word.pairs() {
                ans.adjust(a, b, entry.freq as i64);
            }
        }
        ans
    }

    /// 在整个词表上执行一次合并，并增量维护计数。
    ///
    /// 只有包含 `pair` 的词会被改写，只有合并边界处的符号对会被调整。
    /// 返回被改写的词数。
    pub fn merge(&mut self, vocab: &mut Vocabulary, pair: &Pair) -> usize {
        let Pair { first, second } = pair;
        let fused = pair.fused();
        let mut touched = 0;
        for entry in vocab.iter_mut() {
            if !entry.word.contains(first, second) {
                continue;
            }
            let freq = entry.freq as i64;
            entry
                .word
                .merge_with(first, second, &fused, |a, b, d| self.adjust(a, b, d * freq));
            touched += 1;
        }
        // 合并后 (first, second) 不可能再以相邻对的形式出现
        self.counts.remove(pair);
        touched
    }

    /// 选出下一个要合并的符号对。
    ///
    /// 频率最高者优先；频率相同时第二个符号字典序较小者优先，
    /// 再相同时第一个符号字典序较小者优先。表空时返回 `None`。
    pub fn best(&self) -> Option<(&Pair, i64)> {
        self.counts
            .iter()
            .filter(|&(_, &freq)| freq > 0)
            .map(|(pair, &freq)| Candidate { pair, freq })
            .max()
            .map(|Candidate { pair, freq }| (pair, freq))
    }

    #[inline]
    pub fn get(&self, first: &str, second: &str) -> i64 {
        self.counts
            .get(&Pair::new(first, second))
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Pair, i64)> + '_ {
        self.counts.iter().map(|(pair, &freq)| (pair, freq))
    }

    fn adjust(&mut self, first: &str, second: &str, delta: i64) {
        use std::collections::hash_map::Entry::{Occupied, Vacant};

        match self.counts.entry(Pair::new(first, second)) {
            Occupied(mut entry) => {
                *entry.get_mut() += delta;
                if *entry.get() == 0 {
                    entry.remove();
                }
            }
            Vacant(entry) => {
                if delta != 0 {
                    entry.insert(delta);
                }
            }
        }
    }
}

impl PartialEq for PairTable {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for PairTable {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Candidate<'a> {
    pair: &'a Pair,
    freq: i64,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // 比较顺序：freq -> second（逆序）-> first（逆序）
        match self.freq.cmp(&other.freq) {
            Equal => match other.pair.second.cmp(&self.pair.second) {
                Equal => other.pair.first.cmp(&self.pair.first),
                other => other,
            },
            other => other,
        }
    }
}

impl PartialOrd for Candidate<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::END_OF_WORD;

    #[test]
    fn test_build() {
        let vocab = Vocabulary::from_text("low low lower");
        let table = PairTable::build(&vocab);
        assert_eq!(table.get("l", "o"), 3);
        assert_eq!(table.get("o", "w"), 3);
        assert_eq!(table.get("w", END_OF_WORD), 2);
        assert_eq!(table.get("w", "e"), 1);
        assert_eq!(table.get("e", "r"), 1);
        assert_eq!(table.get("r", END_OF_WORD), 1);
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_best_prefers_frequency() {
        let vocab = Vocabulary::from_text("ab ab cd");
        let table = PairTable::build(&vocab);
        let (pair, freq) = table.best().unwrap();
        assert_eq!(freq, 2);
        // (a, b) 与 (b, </w>) 同频，'<' 小于 'b'
        assert_eq!(pair, &Pair::new("b", END_OF_WORD));
    }

    #[test]
    fn test_best_tie_break() {
        // 全部同频：(x, a) 的第二个符号最小
        let vocab = Vocabulary::from_text("ya xa yb");
        let mut table = PairTable::build(&vocab);
        table.counts.retain(|pair, _| pair.second != END_OF_WORD);
        assert_eq!(table.best().unwrap().0, &Pair::new("x", "a"));

        // 第二个符号相同时比较第一个符号
        table.counts.remove(&Pair::new("x", "a"));
        assert_eq!(table.best().unwrap().0, &Pair::new("y", "a"));
    }

    #[test]
    fn test_best_marker_before_uppercase() {
        // '<' 小于 'B'，词尾标记作为第二个符号时优先
        let vocab = Vocabulary::from_text("aB");
        let table = PairTable::build(&vocab);
        assert_eq!(table.get("a", "B"), 1);
        assert_eq!(table.best().unwrap().0, &Pair::new("B", END_OF_WORD));
    }

    #[test]
    fn test_best_empty() {
        assert!(PairTable::default().best().is_none());
        let vocab = Vocabulary::from_text("   ");
        assert!(PairTable::build(&vocab).best().is_none());
    }

    #[test]
    fn test_merge_matches_rebuild() {
        let mut vocab = Vocabulary::from_text("abab aab bab abba ab");
        let mut table = PairTable::build(&vocab);
        for pair in [
            Pair::new("a", "b"),
            Pair::new("ab", "ab"),
            Pair::new("b", "a"),
            Pair::new("ab", END_OF_WORD),
        ] {
            table.merge(&mut vocab, &pair);
            assert_eq!(table, PairTable::build(&vocab), "after merging {pair:?}");
            assert_eq!(table.get(&pair.first, &pair.second), 0);
        }
    }

    #[test]
    fn test_merge_untouched_words() {
        let mut vocab = Vocabulary::from_text("ab cd cd");
        let mut table = PairTable::build(&vocab);
        assert_eq!(table.merge(&mut vocab, &Pair::new("a", "b")), 1);
        assert_eq!(table.get("c", "d"), 2);
        assert_eq!(vocab.get("cd").unwrap().word, crate::Word::new("cd"));
    }
}
