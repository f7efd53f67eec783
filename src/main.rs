use clap::Parser;
use intern_report::{cli, client, config, error, output, picker, session};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use intern_report_common::{filter_names, to_text, FileHandle, NO_MATCHES_MESSAGE};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(server) = cli.server.clone() {
        config.server_url = server;
    }

    match cli.command {
        Commands::Names { file, query } => {
            println!("📋 intern-report - 名前一覧\n");

            let mut session = session::Session::new(client::ReportClient::new(&config.server_url, config.timeout())?);
            let ticket = session.select_file(&file)?;

            let spinner = output::spinner("名前を取得中...");
            session.load_names(ticket).await;
            spinner.finish_and_clear();

            let suggestions = filter_names(session.state().candidates(), query.as_deref().unwrap_or(""));
            for suggestion in &suggestions.entries {
                println!("  {}", picker::item_label(suggestion));
            }
            if suggestions.no_matches {
                println!("  {}", NO_MATCHES_MESSAGE);
            }
        }

        Commands::Report { file, name, interactive, output: output_arg, format } => {
            println!("📊 intern-report - レポート生成\n");

            let mut session = session::Session::new(client::ReportClient::new(&config.server_url, config.timeout())?);

            // 1. ファイル選択
            println!("[1/3] ファイルを確認中...");
            let ticket = session.select_file(&file)?;
            println!("✔ {}\n", session.state().file().map(|f| f.name()).unwrap_or_default());

            // 2. 名前候補
            println!("[2/3] インターンを選択中...");
            let spinner = output::spinner("名前を取得中...");
            session.load_names(ticket).await;
            spinner.finish_and_clear();

            if interactive {
                picker::pick_name(session.state_mut())?;
            } else if let Some(name) = name.as_deref() {
                session.choose_name(name)?;
            }
            println!("✔ {}\n", session.state().selected().label);

            // 3. 送信
            println!("[3/3] レポートを生成中...");
            let spinner = output::spinner(&format!("{} に送信中...", config.server_url));
            let submitted = session.submit().await.map(|_| ());
            spinner.finish_and_clear();
            submitted?;

            let (Some(report), Some(raw)) = (session.rendered(), session.raw_report()) else {
                return Ok(());
            };

            let submitted_name = session.state().selected().value.clone();
            let stem = output::default_file_stem(&submitted_name, chrono::Local::now());
            let path = output::output_path(output_arg.as_deref(), config.output_dir.as_deref(), &stem, format);
            output::write_report(raw, &report, format, &path)?;

            if format != cli::OutputFormat::Text {
                print!("{}", to_text(&report));
            }
            println!("\n✅ 出力: {}", path.display());
        }

        Commands::Config { set_server, show } => {
            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ サーバーURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  サーバー: {}", config.server_url);
                match config.timeout() {
                    Some(timeout) => println!("  タイムアウト: {}秒", timeout.as_secs()),
                    None => println!("  タイムアウト: なし"),
                }
                println!(
                    "  出力先: {}",
                    config.output_dir.as_ref().map(|d| d.display().to_string()).unwrap_or_else(|| ".".into())
                );
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
