use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "使い方: loc-width-sync <source.xml> <reference.xml> <output.xml>";

/// `-` で始まるファイル名もパスとして受け付ける。
/// --help は持たず、引数の数が合わなければ常に使い方を表示する。
#[derive(Parser, Debug)]
#[command(name = "loc-width-sync", disable_help_flag = true)]
#[command(about = "ローカライズXMLのWidth属性を参照ファイルから反映するツール", long_about = None)]
pub struct Cli {
    /// Widthを反映するソースXML
    #[arg(allow_hyphen_values = true)]
    pub source: PathBuf,

    /// Widthの取得元となる参照XML
    #[arg(allow_hyphen_values = true)]
    pub reference: PathBuf,

    /// 出力先XML（既存の場合は上書き）
    #[arg(allow_hyphen_values = true)]
    pub output: PathBuf,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}

/// 引数解析の結果
#[derive(Debug)]
pub enum ParseOutcome {
    Run(Cli),
    /// 位置引数の数が不正など（使い方を表示して終了コード1）
    Usage,
}

pub fn parse_args<I, T>(args: I) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => ParseOutcome::Run(cli),
        Err(_) => ParseOutcome::Usage,
    }
}
