//! 字节对编码：学习合并表，以及按合并表对新文本分词。

mod algorithm;
mod learner;
mod merges;
mod pairs;

pub use algorithm::MergeApplier;
pub use learner::{learn, MergeLearner, State, Stop, Training};
pub use merges::{MergeList, MergeRule, Pair};
pub use pairs::PairTable;
