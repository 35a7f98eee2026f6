//! 将文本切分为空白段与非空白段，所有段按顺序拼接即为原文。

use regex::Regex;
use std::sync::LazyLock;

/// 文本中的一段。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Run<'t> {
    /// 极大空白段，原样保留
    Space(&'t str),
    /// 极大非空白段，将被构造为词
    Word(&'t str),
}

impl<'t> Run<'t> {
    #[inline]
    pub const fn as_str(&self) -> &'t str {
        match *self {
            Self::Space(s) | Self::Word(s) => s,
        }
    }
}

/// 按顺序产生覆盖整个文本的段，段之间无空隙也无重叠。
pub fn runs(text: &str) -> impl Iterator<Item = Run<'_>> + '_ {
    static PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+|\S+").unwrap());

    PATTERN.find_iter(text).map(|m| {
        let s = m.as_str();
        // 匹配为极大段，因此首字符即可判定段的类别
        if s.starts_with(char::is_whitespace) {
            Run::Space(s)
        } else {
            Run::Word(s)
        }
    })
}

/// 仅产生非空白段。
#[inline]
pub fn words(text: &str) -> impl Iterator<Item = &str> + '_ {
    runs(text).filter_map(|run| match run {
        Run::Word(w) => Some(w),
        Run::Space(_) => None,
    })
}
