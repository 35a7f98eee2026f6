//! 词的符号序列表示，以及训练语料的词频表。

use crate::{text, Symbol, END_OF_WORD};
use std::{collections::HashMap, fmt, mem::take};

/// 一个非空白段对应的符号序列，总以词尾标记结束。
///
/// 去掉末尾标记后，所有符号顺序拼接即为原始文本。
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    /// 每个字符一个符号，末尾追加词尾标记。
    pub fn new(text: &str) -> Self {
        let symbols = text
            .chars()
            .map(String::from)
            .chain([END_OF_WORD.to_string()])
            .collect();
        Self { symbols }
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// 以单个空格连接符号得到的规范形式。
    #[inline]
    pub fn key(&self) -> String {
        self.symbols.join(" ")
    }

    /// 相邻符号对。
    #[inline]
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.symbols
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
    }

    /// 判断是否存在相邻的 `(first, second)`。
    #[inline]
    pub fn contains(&self, first: &str, second: &str) -> bool {
        self.pairs().any(|(a, b)| a == first && b == second)
    }

    /// 从左到右、不重叠地将所有相邻的 `(first, second)` 替换为 `fused`，返回替换次数。
    #[inline]
    pub fn merge(&mut self, first: &str, second: &str, fused: &str) -> usize {
        self.merge_with(first, second, fused, |_, _, _| {})
    }

    /// 同 [`Word::merge`]，每处替换时通过 `delta` 报告邻接对的变化。
    ///
    /// 对于位于 `i` 的一处匹配：
    ///
    /// ```text
    /// p  a  b  s
    /// -- -- -- --
    ///      ↓
    /// p  ab    s
    /// -- ----- --
    /// ```
    ///
    /// 报告 `(p, a, -1)`、`(p, ab, +1)`、`(b, s, -1)`、`(ab, s, +1)`。
    /// `p` 取已输出序列的末尾，可能正是上一处匹配产生的 `ab`，
    /// 这样连续匹配之间的增减恰好相互抵消。
    /// `(a, b)` 自身的计数不在此处理，由调用者整体移除。
    pub fn merge_with(
        &mut self,
        first: &str,
        second: &str,
        fused: &str,
        mut delta: impl FnMut(&str, &str, i64),
    ) -> usize {
        let old = take(&mut self.symbols);
        let mut new = Vec::<Symbol>::with_capacity(old.len());
        let mut count = 0;
        let mut i = 0;
        while i < old.len() {
            if i + 1 < old.len() && old[i] == first && old[i + 1] == second {
                if let Some(p) = new.last() {
                    delta(p, first, -1);
                    delta(p, fused, 1);
                }
                if let Some(s) = old.get(i + 2) {
                    delta(second, s, -1);
                    delta(fused, s, 1);
                }
                new.push(fused.to_string());
                count += 1;
                i += 2;
            } else {
                new.push(old[i].clone());
                i += 1;
            }
        }
        self.symbols = new;
        count
    }

    #[inline]
    pub fn into_segmentation(self) -> Segmentation {
        Segmentation(self.symbols)
    }
}

/// 一个词完成所有可用合并后的最终符号序列。
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Segmentation(Vec<Symbol>);

impl Segmentation {
    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// 去掉词尾标记后的子词。
    ///
    /// 标记总在最后一个符号的末尾，只剥离这一处，原文中与标记相同的字符不受影响。
    pub fn subwords(&self) -> impl Iterator<Item = &str> + '_ {
        let last = self.0.len().saturating_sub(1);
        self.0
            .iter()
            .enumerate()
            .map(move |(i, s)| {
                let s = s.as_str();
                if i == last {
                    s.strip_suffix(END_OF_WORD).unwrap_or(s)
                } else {
                    s
                }
            })
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut subwords = self.subwords();
        if let Some(s) = subwords.next() {
            f.write_str(s)?;
        }
        for s in subwords {
            write!(f, " {s}")?;
        }
        Ok(())
    }
}

impl From<Segmentation> for Word {
    #[inline]
    fn from(segmentation: Segmentation) -> Self {
        Self {
            symbols: segmentation.0,
        }
    }
}

/// 训练语料中的一个不同的词。
#[derive(Clone, Debug)]
pub struct Entry {
    /// 原始文本
    pub text: String,
    /// 当前符号序列
    pub word: Word,
    /// 语料中的出现次数
    pub freq: u64,
}

/// 训练语料的词频表，以词的初始规范形式为键。
#[derive(Clone, Default, Debug)]
pub struct Vocabulary {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// 收集文本中的所有非空白段并累计词频。
    pub fn from_text(text: &str) -> Self {
        use std::collections::hash_map::Entry::{Occupied, Vacant};

        let mut ans = Self::default();
        for run in text::words(text) {
            let word = Word::new(run);
            match ans.index.entry(word.key()) {
                Occupied(entry) => ans.entries[*entry.get()].freq += 1,
                Vacant(entry) => {
                    entry.insert(ans.entries.len());
                    ans.entries.push(Entry {
                        text: run.to_string(),
                        word,
                        freq: 1,
                    });
                }
            }
        }
        ans
    }

    /// 按原始文本查找词条。
    #[inline]
    pub fn get(&self, text: &str) -> Option<&Entry> {
        self.index
            .get(&Word::new(text).key())
            .map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    #[inline]
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entry> {
        self.entries.iter_mut()
    }
}
