//! 有序合并表及其文本格式。
//!
//! 每行一条合并规则，两个符号以单个空格分隔，最后一行之后没有换行符：
//!
//! ```text
//! l o
//! lo w
//! low </w>
//! ```

use crate::{Error, Result, Symbol, END_OF_WORD};
use std::{collections::HashSet, fmt, fs, path::Path, slice};

/// 一对相邻符号。
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Pair {
    pub first: Symbol,
    pub second: Symbol,
}

impl Pair {
    #[inline]
    pub fn new(first: impl Into<Symbol>, second: impl Into<Symbol>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// 合并后产生的符号。
    #[inline]
    pub fn fused(&self) -> Symbol {
        [self.first.as_str(), self.second.as_str()].concat()
    }
}

/// 第 k 步选出的合并规则。
pub type MergeRule = Pair;

/// 按学习顺序排列的合并规则，顺序即应用顺序。
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct MergeList(Vec<MergeRule>);

impl MergeList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, rule: MergeRule) {
        self.0.push(rule)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn rules(&self) -> &[MergeRule] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, MergeRule> {
        self.0.iter()
    }

    /// 解析文本格式的合并表。
    ///
    /// 每条规则必须恰好由两个非空符号组成，且每个符号必须可以产生：
    /// 单个字符、词尾标记，或者此前某条规则合并的结果。
    /// 任何一行不合法都将使整个表被拒绝。
    pub fn parse(text: &str) -> Result<Self> {
        let mut produced = HashSet::new();
        let mut rules = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let malformed = |reason: String| Error::MalformedMergeList {
                line: line_no,
                reason,
            };

            let rule = match *line.split(' ').collect::<Vec<_>>() {
                [first, second] if !first.is_empty() && !second.is_empty() => {
                    Pair::new(first, second)
                }
                _ => return Err(malformed(format!("expected two symbols, found {line:?}"))),
            };
            for symbol in [&rule.first, &rule.second] {
                if !is_producible(symbol, &produced) {
                    return Err(malformed(format!(
                        "symbol {symbol:?} is not producible by earlier rules"
                    )));
                }
            }
            produced.insert(rule.fused());
            rules.push(rule);
        }
        Ok(Self(rules))
    }

    /// 从文件加载合并表。
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// 将合并表保存到文件。
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_producible(symbol: &str, produced: &HashSet<Symbol>) -> bool {
    let mut chars = symbol.chars();
    let single = matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_whitespace());
    single || symbol == END_OF_WORD || produced.contains(symbol)
}

impl fmt::Display for MergeList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut rules = self.0.iter();
        if let Some(Pair { first, second }) = rules.next() {
            write!(f, "{first} {second}")?;
        }
        for Pair { first, second } in rules {
            write!(f, "\n{first} {second}")?;
        }
        Ok(())
    }
}

impl FromIterator<MergeRule> for MergeList {
    #[inline]
    fn from_iter<T: IntoIterator<Item = MergeRule>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MergeList {
    type Item = &'a MergeRule;
    type IntoIter = slice::Iter<'a, MergeRule>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
