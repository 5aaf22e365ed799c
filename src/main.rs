//! Trader Launcher - Main Entry Point
//!
//! Loads the installed gateway and app plugins, and provides the language
//! commands that used to live in separate helper scripts.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use trader_launcher::config;
use trader_launcher::launcher;
use trader_launcher::{Language, MainEngine, ManifestResolver, Translator};

/// Menu strings shown by `demo`
const DEMO_STRINGS: &[&str] = &["系统", "功能", "配置", "帮助", "连接", "退出"];

#[derive(Parser, Debug)]
#[command(name = "trader-launcher", about = "Trading platform launcher", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load plugins and start the platform (default)
    Run(RunArgs),
    /// Show or change the interface language
    Language(LanguageArgs),
    /// Print sample translations; interactive switching on a terminal
    Demo,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Directory holding plugin manifests (default: ~/.vntrader/plugins)
    #[arg(long)]
    plugin_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LanguageArgs {
    /// Language code, e.g. zh_CN or en (asks on a terminal when omitted)
    code: Option<String>,

    /// List supported languages
    #[arg(short, long)]
    list: bool,

    /// Switch for this run only, without saving
    #[arg(short, long)]
    temp: bool,
}

/// Console output plus a daily log file under `~/.vntrader/log`
///
/// The console shows `info` and above so that plugin status lines printed
/// by the commands are not echoed by crate debug records; the file keeps
/// the crate's debug output.
fn init_logging() -> Option<WorkerGuard> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter("info"));

    let log_dir = config::ensure_app_dir().map(|dir| dir.join(config::LOG_DIR_NAME));
    let (file, guard) = match &log_dir {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "launcher.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter("info,trader_launcher=debug"));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    if let Err(e) = log_dir {
        tracing::warn!("File logging disabled: {}", e);
    }
    guard
}

fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging();
    let cli = Cli::parse();

    let translator = Arc::new(Translator::from_default_location());

    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => run(&translator, args),
        Command::Language(args) => language(&translator, args),
        Command::Demo => demo(&translator),
    }
}

fn run(translator: &Translator, args: RunArgs) -> anyhow::Result<()> {
    tracing::info!("Starting trader launcher");

    let plugin_dir = match args.plugin_dir {
        Some(dir) => dir,
        None => config::plugin_dir().context("Could not determine plugin directory")?,
    };
    let resolver = ManifestResolver::new(&plugin_dir);
    let mut engine = MainEngine::new();

    let specs: Vec<_> = launcher::default_gateways()
        .into_iter()
        .chain(launcher::default_apps())
        .collect();
    let report = launcher::load_plugins(&specs, &resolver, &mut engine, translator);

    for line in report.status_lines(translator) {
        println!("{}", line);
    }
    println!("{}", report.summary(translator));

    tracing::info!(
        "Registered {} gateways and {} apps with the engine",
        engine.gateways().len(),
        engine.apps().len()
    );
    Ok(())
}

fn print_languages(translator: &Translator) {
    let current = translator.current_language();
    println!("{}:", translator.translate("支持的语言"));
    for (lang, name) in translator.supported_languages() {
        let mark = if lang == current { "✓" } else { " " };
        println!("  [{}] {}: {}", mark, lang.code(), name);
    }
}

/// Numbered language menu, optionally with an exit entry
fn print_menu(translator: &Translator, with_exit: bool) {
    println!("{}:", translator.translate("选择语言"));
    for (i, (lang, name)) in translator.supported_languages().iter().enumerate() {
        println!("  {}. {} ({})", i + 1, name, lang.code());
    }
    if with_exit {
        println!("  0. {}", translator.translate("退出"));
    }
}

/// Prompt and read one trimmed line; `None` on end of input
fn prompt(translator: &Translator) -> anyhow::Result<Option<String>> {
    print!("\n{}: ", translator.translate("请输入选择"));
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn language(translator: &Translator, args: LanguageArgs) -> anyhow::Result<()> {
    let code = match args.code.filter(|_| !args.list) {
        Some(code) => code,
        None if !args.list && std::io::stdin().is_terminal() => {
            print_menu(translator, false);
            let choice = prompt(translator)?.unwrap_or_default();
            if choice.is_empty() {
                println!("{}", translator.translate("已取消"));
                return Ok(());
            }
            match Language::from_menu_choice(&choice) {
                Some(lang) => lang.code().to_string(),
                None => choice,
            }
        }
        None => {
            print_languages(translator);
            return Ok(());
        }
    };

    if args.temp {
        if !translator.switch_for_session(&code) {
            return unsupported(translator, &code);
        }
        print_current(translator);
        println!("   {}", translator.translate("仅当前会话生效"));
        return Ok(());
    }

    match translator.switch_and_save(&code) {
        Ok(false) => unsupported(translator, &code),
        Ok(true) => {
            print_current(translator);
            if let Some(store) = translator.settings() {
                println!(
                    "✅ {}: {}",
                    translator.translate("设置已保存到"),
                    store.path().display()
                );
            }
            Ok(())
        }
        Err(e) => {
            print_current(translator);
            eprintln!("❌ {}: {}", translator.translate("保存设置失败"), e);
            Err(e).context("language changed for this run only")
        }
    }
}

fn unsupported(translator: &Translator, code: &str) -> anyhow::Result<()> {
    eprintln!("❌ {}: {}", translator.translate("不支持的语言"), code);
    print_languages(translator);
    bail!("unsupported language {code}")
}

fn print_current(translator: &Translator) {
    let current = translator.current_language();
    println!(
        "✅ {}: {} ({})",
        translator.translate("语言已设置为"),
        current.display_name(),
        current.code()
    );
}

fn print_translations(translator: &Translator, texts: &[&str]) {
    for text in texts {
        println!("  '{}' -> '{}'", text, translator.translate(text));
    }
}

fn demo(translator: &Translator) -> anyhow::Result<()> {
    print_languages(translator);
    let current = translator.current_language();
    println!(
        "\n{}: {} ({})",
        translator.translate("当前语言"),
        current.display_name(),
        current.code()
    );
    println!("\n{}:", translator.translate("翻译测试"));
    print_translations(translator, DEMO_STRINGS);

    if !std::io::stdin().is_terminal() {
        return Ok(());
    }

    loop {
        println!(
            "\n{}: {}",
            translator.translate("当前语言"),
            translator.current_language()
        );
        print_menu(translator, true);

        let Some(choice) = prompt(translator)? else {
            break;
        };
        if choice == "0" {
            break;
        }
        let Some(lang) = Language::from_menu_choice(&choice) else {
            println!("{}", translator.translate("无效选择"));
            continue;
        };

        translator.switch(lang.code());
        println!("\n{}:", translator.translate("切换后的翻译测试"));
        print_translations(translator, &DEMO_STRINGS[..3]);
    }

    println!("{}", translator.translate("再见!"));
    Ok(())
}
