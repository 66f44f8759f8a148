//! ソースファイルへの Width 反映
//!
//! 一致したアイテムタグの Width 属性だけを書き換え（無ければ挿入し）、
//! それ以外のバイトは空白・属性順・コメントを含めてそのまま残す。

use crate::scanner::WidthMap;
use crate::tags::{Grammar, TokenKind};

/// 1件の Width 書き換え
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthUpdate {
    pub scope: String,
    pub id: String,
    /// 書き換え前の値（None は新規挿入）
    pub previous: Option<String>,
    pub width: String,
}

/// 反映結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    pub text: String,
    pub updates: Vec<WidthUpdate>,
}

impl PatchOutcome {
    pub fn updated_count(&self) -> usize {
        self.updates.len()
    }
}

/// ソーステキストに Width 対応表を反映する
pub fn apply_widths(text: &str, widths: &WidthMap, grammar: &Grammar) -> PatchOutcome {
    let mut out = String::with_capacity(text.len());
    let mut updates = Vec::new();
    let mut last_index = 0;
    let mut current_scope: Option<String> = None;

    for token in grammar.tokens(text) {
        let range = token.range();
        // トークン手前の非対象部分はそのまま
        out.push_str(&text[last_index..range.start]);
        let tag = &text[range.clone()];

        match token.kind {
            TokenKind::ScopeOpen(scope) => {
                current_scope = Some(scope);
                out.push_str(tag);
            }
            TokenKind::ScopeClose => {
                current_scope = None;
                out.push_str(tag);
            }
            TokenKind::Item => {
                let rewritten = current_scope
                    .as_deref()
                    .and_then(|scope| rewrite_item(tag, scope, widths, grammar));
                match rewritten {
                    Some((new_tag, update)) => {
                        out.push_str(&new_tag);
                        updates.push(update);
                    }
                    None => out.push_str(tag),
                }
            }
        }

        last_index = range.end;
    }

    out.push_str(&text[last_index..]);

    PatchOutcome { text: out, updates }
}

/// 対応表にあるアイテムタグを書き換える（対象外なら None）
fn rewrite_item(
    tag: &str,
    scope: &str,
    widths: &WidthMap,
    grammar: &Grammar,
) -> Option<(String, WidthUpdate)> {
    let id = grammar.id_value(tag)?;
    let width = widths.get(scope, id)?;
    let width_attr = &grammar.vocabulary().width_attr;

    let (new_tag, previous) = if let Some(value) = grammar.width_value_range(tag) {
        // 値部分のみ置換
        let previous = tag[value.clone()].to_string();
        let new_tag = format!("{}{}{}", &tag[..value.start], width, &tag[value.end..]);
        (new_tag, Some(previous))
    } else if let Some(pos) = grammar.height_position(tag) {
        // Height の直前に挿入して Width, Height の順を保つ
        let new_tag = format!(
            "{}{}=\"{}\" {}",
            &tag[..pos],
            width_attr,
            width,
            &tag[pos..]
        );
        (new_tag, None)
    } else {
        // 閉じ区切りの直前（手前の空白は残す）
        let pos = grammar.closing_position(tag)?;
        let new_tag = format!(
            "{} {}=\"{}\"{}",
            &tag[..pos],
            width_attr,
            width,
            &tag[pos..]
        );
        (new_tag, None)
    };

    Some((
        new_tag,
        WidthUpdate {
            scope: scope.to_string(),
            id: id.to_string(),
            previous,
            width: width.to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::build_width_map;

    fn widths(entries: &[(&str, &str, &str)]) -> WidthMap {
        entries
            .iter()
            .map(|(scope, id, width)| ((scope.to_string(), id.to_string()), width.to_string()))
            .collect()
    }

    fn patch(text: &str, map: &WidthMap) -> PatchOutcome {
        apply_widths(text, map, Grammar::default_grammar())
    }

    #[test]
    fn test_replace_existing_width() {
        let map = widths(&[("g", "a", "120")]);
        let outcome = patch(r#"<Group Id="g"><LocalizedString Height="5" Width="80"  Id="a" /></Group>"#, &map);

        assert_eq!(
            outcome.text,
            r#"<Group Id="g"><LocalizedString Height="5" Width="120"  Id="a" /></Group>"#
        );
        assert_eq!(outcome.updated_count(), 1);
        assert_eq!(outcome.updates[0].previous.as_deref(), Some("80"));
    }

    #[test]
    fn test_insert_before_height() {
        let map = widths(&[("Dialog1", "OkButton", "50")]);
        let outcome = patch(
            r#"<Group Id="Dialog1"><LocalizedString Id="OkButton" Height="20"/></Group>"#,
            &map,
        );

        assert_eq!(
            outcome.text,
            r#"<Group Id="Dialog1"><LocalizedString Id="OkButton" Width="50" Height="20"/></Group>"#
        );
        assert_eq!(outcome.updated_count(), 1);
        assert_eq!(outcome.updates[0].previous, None);
    }

    #[test]
    fn test_insert_before_closing_delimiter() {
        let map = widths(&[("g", "a", "7"), ("g", "b", "8")]);
        let outcome = patch(
            "<Group Id=\"g\">\n  <LocalizedString Id=\"a\"   />\n  <LocalizedString Id=\"b\">text</LocalizedString>\n</Group>",
            &map,
        );

        assert_eq!(
            outcome.text,
            "<Group Id=\"g\">\n  <LocalizedString Id=\"a\" Width=\"7\"   />\n  <LocalizedString Id=\"b\" Width=\"8\">text</LocalizedString>\n</Group>"
        );
        assert_eq!(outcome.updated_count(), 2);
    }

    #[test]
    fn test_item_outside_scope_is_unchanged() {
        let map = widths(&[("g", "a", "99")]);
        let text = r#"<LocalizedString Id="a" Width="1"/><Group Id="g"></Group><LocalizedString Id="a"/>"#;
        let outcome = patch(text, &map);

        assert_eq!(outcome.text, text);
        assert_eq!(outcome.updated_count(), 0);
    }

    #[test]
    fn test_scope_isolation() {
        let map = widths(&[("B", "X", "99")]);
        let text = r#"<Group Id="A"><LocalizedString Id="X" Width="1"/></Group>"#;
        let outcome = patch(text, &map);

        assert_eq!(outcome.text, text);
        assert_eq!(outcome.updated_count(), 0);
    }

    #[test]
    fn test_item_without_id_is_unchanged() {
        let map = widths(&[("g", "", "5")]);
        let text = r#"<Group Id="g"><LocalizedString Width="1"/></Group>"#;
        assert_eq!(patch(text, &map).text, text);
    }

    #[test]
    fn test_verbatim_preservation() {
        let map = widths(&[("g", "a", "42")]);
        let text = "<?xml version=\"1.0\"?>\r\n<!-- <LocalizedString Id=\"a\"/> は注釈 -->\r\n<Root  x = 'y'>\r\n\t<Group   Id=\"g\" Kind=\"dlg\" >\r\n\t\t<LocalizedString\r\n\t\t\tId=\"a\"\r\n\t\t\tWidth=\"10\"\r\n\t\t\tText=\"OK\"/>\r\n\t\t<Other Id=\"a\" Width=\"3\"/>\r\n\t</Group>\r\n</Root>\r\n";
        let outcome = patch(text, &map);

        assert_eq!(outcome.text, text.replace("Width=\"10\"", "Width=\"42\""));
        assert_eq!(outcome.updated_count(), 1);
    }

    #[test]
    fn test_same_value_is_counted_but_unchanged() {
        let map = widths(&[("g", "a", "10")]);
        let text = r#"<Group Id="g"><LocalizedString Id="a" Width="10"/></Group>"#;
        let outcome = patch(text, &map);

        assert_eq!(outcome.text, text);
        assert_eq!(outcome.updated_count(), 1);
    }

    #[test]
    fn test_idempotent() {
        let reference = r#"<Group Id="g"><LocalizedString Id="a" Width="50"/><LocalizedString Id="b" Width="2.5em"/><LocalizedString Id="c" Width="3"/></Group>"#;
        let source = r#"<Group Id="g">
    <LocalizedString Id="a" Height="20"/>
    <LocalizedString Id="b" />
    <LocalizedString Id="c" Width="1">c</LocalizedString>
</Group>"#;
        let grammar = Grammar::default_grammar();
        let map = build_width_map(reference, grammar);

        let once = apply_widths(source, &map, grammar);
        let twice = apply_widths(&once.text, &map, grammar);

        assert_eq!(once.text, twice.text);
        assert_eq!(once.updated_count(), 3);
        assert_eq!(twice.updated_count(), 3);
    }

    #[test]
    fn test_no_tokens_returns_input() {
        let text = "plain text with no tags\n";
        let outcome = patch(text, &WidthMap::default());
        assert_eq!(outcome, PatchOutcome { text: text.to_string(), updates: vec![] });
    }
}
