use super::{MergeList, MergeRule, PairTable};
use crate::{
    word::{Segmentation, Vocabulary},
    Error, Method, Result,
};
use tracing::{debug, info, warn};

/// 训练状态。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Running,
    /// 已没有可合并的符号对，终态
    Stopped,
}

/// 训练结束的原因。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stop {
    /// 执行了全部要求的合并步数
    StepLimit,
    /// 提前耗尽可合并的符号对，只执行了 `performed` 步
    Exhausted { performed: usize },
}

/// 驱动合并学习：选择、合并、更新。
///
/// 词表与符号对频率表在一次训练中由学习器独占。
pub struct MergeLearner {
    vocab: Vocabulary,
    pairs: PairTable,
    merges: MergeList,
    state: State,
}

impl MergeLearner {
    pub fn new(text: &str) -> Self {
        let vocab = Vocabulary::from_text(text);
        let pairs = PairTable::build(&vocab);
        debug!(words = vocab.len(), pairs = pairs.len(), "vocabulary built");
        Self {
            vocab,
            pairs,
            merges: MergeList::new(),
            state: State::Running,
        }
    }

    /// 尝试执行一次合并，返回本次选出的规则。
    pub fn step(&mut self) -> Option<&MergeRule> {
        if self.state == State::Stopped {
            return None;
        }
        let Some((pair, freq)) = self.pairs.best() else {
            self.state = State::Stopped;
            return None;
        };
        let pair = pair.clone();
        let touched = self.pairs.merge(&mut self.vocab, &pair);
        debug!(
            step = self.merges.len(),
            first = %pair.first,
            second = %pair.second,
            freq,
            touched,
            "merge"
        );
        self.merges.push(pair);
        self.merges.rules().last()
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn merges(&self) -> &MergeList {
        &self.merges
    }

    #[inline]
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    #[inline]
    pub fn pairs(&self) -> &PairTable {
        &self.pairs
    }

    /// 结束训练，由每个词当前的符号序列得到最终切分。
    pub fn finish(self, stop: Stop) -> Training {
        Training {
            merges: self.merges,
            vocab: self.vocab,
            stop,
        }
    }
}

/// 在文本上执行至多 `steps` 次合并。
///
/// `steps` 限制的是合并次数而非最终符号种类数。
pub fn learn(text: &str, steps: usize) -> Training {
    let mut learner = MergeLearner::new(text);
    let mut stop = Stop::StepLimit;
    for performed in 0..steps {
        if learner.step().is_none() {
            warn!(performed, requested = steps, "no more pairs to merge, stopping early");
            stop = Stop::Exhausted { performed };
            break;
        }
    }
    info!(merges = learner.merges().len(), "training finished");
    learner.finish(stop)
}

/// 一次训练的产物。
pub struct Training {
    merges: MergeList,
    vocab: Vocabulary,
    stop: Stop,
}

impl Training {
    #[inline]
    pub fn merges(&self) -> &MergeList {
        &self.merges
    }

    #[inline]
    pub fn into_merges(self) -> MergeList {
        self.merges
    }

    #[inline]
    pub fn stop(&self) -> Stop {
        self.stop
    }

    /// 训练语料中每个不同的词及其最终切分。
    pub fn segmentations(&self) -> impl Iterator<Item = (&str, Segmentation)> + '_ {
        self.vocab
            .iter()
            .map(|entry| (entry.text.as_str(), entry.word.clone().into_segmentation()))
    }

    /// 按训练语料重建切分后的文本，未在训练中出现的词视为错误。
    #[inline]
    pub fn segment_text(&self, text: &str) -> Result<String> {
        crate::segment_text(self, text)
    }
}

impl Method for Training {
    fn segment(&self, word: &str) -> Result<Segmentation> {
        self.vocab
            .get(word)
            .map(|entry| entry.word.clone().into_segmentation())
            .ok_or_else(|| Error::UnseenWord(word.to_string()))
    }
}
