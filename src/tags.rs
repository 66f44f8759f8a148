//! タグ文法（スコープ開始・スコープ終了・アイテムの3種類のトークン）
//!
//! XMLとしてパースせず、正規表現でタグだけを拾う。
//! 拾ったタグ以外のバイトには一切触れないため、書き戻しで整形が崩れない。

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 対象とするタグ名・属性名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagVocabulary {
    pub group_tag: String,
    pub item_tag: String,
    pub id_attr: String,
    pub width_attr: String,
    pub height_attr: String,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self {
            group_tag: "Group".into(),
            item_tag: "LocalizedString".into(),
            id_attr: "Id".into(),
            width_attr: "Width".into(),
            height_attr: "Height".into(),
        }
    }
}

/// トークン種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<Group ... Id="x" ...>`（Id必須）
    ScopeOpen(String),
    /// `</Group>`
    ScopeClose,
    /// `<LocalizedString ... />` または `<LocalizedString ...>`
    Item,
}

/// 文書中の1トークン（バイト位置付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// コンパイル済みのタグ文法
#[derive(Debug, Clone)]
pub struct Grammar {
    vocabulary: TagVocabulary,
    token_re: Regex,
    id_re: Regex,
    width_re: Regex,
    height_re: Regex,
    closing_re: Regex,
}

lazy_static::lazy_static! {
    static ref DEFAULT_GRAMMAR: Grammar =
        Grammar::new(&TagVocabulary::default()).expect("既定の文法は常にコンパイルできる");
}

impl Grammar {
    pub fn new(vocabulary: &TagVocabulary) -> Result<Self> {
        let group = regex::escape(&vocabulary.group_tag);
        let item = regex::escape(&vocabulary.item_tag);
        let id = regex::escape(&vocabulary.id_attr);
        let width = regex::escape(&vocabulary.width_attr);
        let height = regex::escape(&vocabulary.height_attr);

        // 先頭一致の選択肢順: スコープ開始 → スコープ終了 → アイテム
        let token_re = Regex::new(&format!(
            r#"(?P<open><{group}\b[^>]*\b{id}="(?P<scope>[^"]+)"[^>]*>)|(?P<close></{group}>)|(?P<item><{item}\b[^>]*?/?>)"#
        ))?;

        Ok(Self {
            vocabulary: vocabulary.clone(),
            token_re,
            id_re: Regex::new(&format!(r#"\b{id}="([^"]*)""#))?,
            width_re: Regex::new(&format!(r#"\b{width}="([^"]*)""#))?,
            height_re: Regex::new(&format!(r#"\b{height}=""#))?,
            closing_re: Regex::new(r"\s*/?>\s*$")?,
        })
    }

    /// 既定の語彙（Group / LocalizedString / Id / Width / Height）の文法
    pub fn default_grammar() -> &'static Grammar {
        &DEFAULT_GRAMMAR
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }

    /// 文書を先頭から走査し、3種類のトークンを出現順に返す
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        self.token_re.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = if caps.name("open").is_some() {
                TokenKind::ScopeOpen(caps.name("scope")?.as_str().to_string())
            } else if caps.name("close").is_some() {
                TokenKind::ScopeClose
            } else {
                TokenKind::Item
            };
            Some(Token {
                kind,
                start: whole.start(),
                end: whole.end(),
            })
        })
    }

    /// タグ内の Id 属性値
    pub fn id_value<'t>(&self, tag: &'t str) -> Option<&'t str> {
        self.id_re.captures(tag).and_then(|c| c.get(1)).map(|m| m.as_str())
    }

    /// タグ内の Width 属性値
    pub fn width_value<'t>(&self, tag: &'t str) -> Option<&'t str> {
        self.width_value_range(tag).map(|r| &tag[r])
    }

    /// Width 属性値（引用符の内側）のバイト範囲
    pub fn width_value_range(&self, tag: &str) -> Option<Range<usize>> {
        self.width_re
            .captures(tag)
            .and_then(|c| c.get(1))
            .map(|m| m.range())
    }

    /// `Height="` の開始位置
    pub fn height_position(&self, tag: &str) -> Option<usize> {
        self.height_re.find(tag).map(|m| m.start())
    }

    /// 閉じ区切り（直前の空白を含む `/>` または `>`）の開始位置
    pub fn closing_position(&self, tag: &str) -> Option<usize> {
        self.closing_re.find(tag).map(|m| m.start())
    }
}
