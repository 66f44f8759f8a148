//! 参照ファイルの走査
//!
//! (グループId, アイテムId) → Width の対応表を作る。

use crate::tags::{Grammar, TokenKind};
use std::collections::HashMap;

/// (グループId, アイテムId)
pub type WidthKey = (String, String);

/// Width 対応表（値は数値化せず元の文字列のまま保持）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidthMap {
    entries: HashMap<WidthKey, String>,
}

impl WidthMap {
    pub fn get(&self, scope: &str, id: &str) -> Option<&str> {
        self.entries
            .get(&(scope.to_string(), id.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(WidthKey, String)> for WidthMap {
    fn from_iter<I: IntoIterator<Item = (WidthKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// 参照テキストから Width 対応表を構築する
///
/// グループは入れ子にならない前提で、現在のグループを1つだけ保持する。
/// Id や Width の無いアイテム、グループ外のアイテムは読み飛ばす。
/// 同じキーが複数回現れた場合は後勝ち。
pub fn build_width_map(text: &str, grammar: &Grammar) -> WidthMap {
    let mut current_scope: Option<String> = None;
    let mut entries = HashMap::new();

    for token in grammar.tokens(text) {
        let range = token.range();
        match token.kind {
            TokenKind::ScopeOpen(scope) => current_scope = Some(scope),
            TokenKind::ScopeClose => current_scope = None,
            TokenKind::Item => {
                let Some(scope) = current_scope.as_ref() else {
                    continue;
                };
                let tag = &text[range];
                let (Some(id), Some(width)) = (grammar.id_value(tag), grammar.width_value(tag))
                else {
                    continue;
                };
                entries.insert((scope.clone(), id.to_string()), width.to_string());
            }
        }
    }

    WidthMap { entries }
}
