#![deny(warnings)]

mod bpe;
mod error;
mod text;
mod word;

use std::collections::HashMap;

pub use bpe::{
    learn, MergeApplier, MergeLearner, MergeList, MergeRule, Pair, PairTable, State, Stop,
    Training,
};
pub use error::{Error, Result};
pub use text::{runs, words, Run};
pub use word::{Entry, Segmentation, Vocabulary, Word};

/// 符号，初始为单个字符，合并后为多个字符。
pub type Symbol = String;

/// 词尾标记，总是词的最后一个符号，使合并不会跨越词边界。
pub const END_OF_WORD: &str = "</w>";

/// 将单个词切分为子词的方法。
pub trait Method {
    fn segment(&self, word: &str) -> Result<Segmentation>;
}

/// 对整段文本分词。
///
/// 每个非空白段替换为以单个空格分隔的子词，空白段原样保留在原位置。
/// 相同的词只切分一次。
pub fn segment_text(method: &impl Method, text: &str) -> Result<String> {
    let mut cache = HashMap::<&str, String>::new();
    let mut ans = String::with_capacity(text.len() * 2);
    for run in runs(text) {
        match run {
            Run::Space(s) => ans.push_str(s),
            Run::Word(w) => {
                if !cache.contains_key(w) {
                    cache.insert(w, method.segment(w)?.to_string());
                }
                ans.push_str(&cache[w]);
            }
        }
    }
    Ok(ans)
}
