//! ファイル入出力を伴う一括処理

use crate::error::Result;
use crate::patcher::{apply_widths, WidthUpdate};
use crate::scanner::build_width_map;
use crate::tags::Grammar;
use std::path::{Path, PathBuf};

/// 1回の同期結果
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub output: PathBuf,
    /// 参照ファイルから得た対応表の件数
    pub reference_entries: usize,
    pub updates: Vec<WidthUpdate>,
}

impl SyncReport {
    pub fn updated_count(&self) -> usize {
        self.updates.len()
    }
}

/// 参照ファイルの Width をソースファイルに反映して出力先へ書き出す
///
/// 改行コードは変換しない。出力先は新規作成または上書き。
pub fn sync_widths(
    source: &Path,
    reference: &Path,
    output: &Path,
    grammar: &Grammar,
) -> Result<SyncReport> {
    let reference_text = std::fs::read_to_string(reference)?;
    let widths = build_width_map(&reference_text, grammar);

    let source_text = std::fs::read_to_string(source)?;
    let outcome = apply_widths(&source_text, &widths, grammar);

    std::fs::write(output, outcome.text.as_bytes())?;

    Ok(SyncReport {
        output: output.to_path_buf(),
        reference_entries: widths.len(),
        updates: outcome.updates,
    })
}
