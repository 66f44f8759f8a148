use anyhow::Context;
use loc_width_sync::{cli, config, sync};
use cli::ParseOutcome;
use config::Config;

fn main() -> anyhow::Result<()> {
    // 引数が不正な場合はファイルに触れずに終了
    let cli = match cli::parse_args(std::env::args_os()) {
        ParseOutcome::Run(cli) => cli,
        ParseOutcome::Usage => {
            println!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;
    let grammar = config.grammar()?;

    if cli.verbose {
        eprintln!("ソース: {}", cli.source.display());
        eprintln!("参照: {}", cli.reference.display());
        eprintln!(
            "対象タグ: <{}> / <{}>",
            config.tags.group_tag, config.tags.item_tag
        );
    }

    let report = sync::sync_widths(&cli.source, &cli.reference, &cli.output, &grammar)
        .with_context(|| {
            format!(
                "Widthの反映に失敗: {} → {}",
                cli.source.display(),
                cli.output.display()
            )
        })?;

    if cli.verbose {
        eprintln!("参照エントリ数: {}", report.reference_entries);
        for update in &report.updates {
            match &update.previous {
                Some(previous) => eprintln!(
                    "  {}/{}: {} → {}",
                    update.scope, update.id, previous, update.width
                ),
                None => eprintln!("  {}/{}: (追加) {}", update.scope, update.id, update.width),
            }
        }
    }

    println!(
        "✔ {}件のWidthを更新しました。保存先: {}",
        report.updated_count(),
        report.output.display()
    );

    Ok(())
}
