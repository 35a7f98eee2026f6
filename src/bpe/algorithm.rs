use super::{MergeList, Pair};
use crate::{
    word::{Segmentation, Word},
    Method, Result, Symbol,
};
use memchr::memmem::Finder;
use tracing::trace;

/// 按学习顺序重放合并表，对新文本分词，与训练时的词频无关。
pub struct MergeApplier {
    merges: MergeList,
    /// 与 `merges` 一一对应，保存合并结果及其子串查找器
    fused: Box<[Fused]>,
}

struct Fused {
    symbol: Symbol,
    finder: Finder<'static>,
}

impl MergeApplier {
    pub fn new(merges: MergeList) -> Self {
        let fused = merges
            .iter()
            .map(|rule| {
                let symbol = rule.fused();
                let finder = Finder::new(symbol.as_bytes()).into_owned();
                Fused { symbol, finder }
            })
            .collect();
        Self { merges, fused }
    }

    #[inline]
    pub fn merges(&self) -> &MergeList {
        &self.merges
    }

    /// 对一个词依次应用每条规则。
    ///
    /// 每条规则从左到右扫描一遍，贪心、不重叠地替换，同一遍内不再回看；
    /// 之后的规则可以作用于之前的规则产生的符号。
    pub fn apply(&self, mut word: Word) -> Segmentation {
        // 合并不改变符号拼接后的内容，所以只需构造一次。
        // 相邻的 (first, second) 必然使拼接内容包含 first + second，
        // 不包含时可以跳过扫描
        let text = word.symbols().concat();
        for (Pair { first, second }, fused) in self.merges.iter().zip(&*self.fused) {
            if fused.finder.find(text.as_bytes()).is_none() {
                continue;
            }
            let n = word.merge(first, second, &fused.symbol);
            if n > 0 {
                trace!(%first, %second, n, "applied");
            }
        }
        word.into_segmentation()
    }

    #[inline]
    pub fn segment_text(&self, text: &str) -> Result<String> {
        crate::segment_text(self, text)
    }
}

impl Method for MergeApplier {
    #[inline]
    fn segment(&self, word: &str) -> Result<Segmentation> {
        Ok(self.apply(Word::new(word)))
    }
}
