use clap::Parser;
use parcel_store::adapters::ReaderConfirm;
use parcel_store::app::{commands, open_session};
use parcel_store::config::resolve_config;
use parcel_store::utils::error::{ErrorSeverity, ParcelError};
use parcel_store::utils::logger;
use parcel_store::CliConfig;

fn exit_code(e: &ParcelError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(e: &ParcelError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置；日誌尚未初始化，錯誤直接輸出
    let config = match resolve_config(cli.config.as_deref(), cli.data_dir.clone(), cli.slot.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    let level = config.logging.level.as_deref();
    if config.logging.json {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let mut session = open_session(&config);
    let mut confirmer = ReaderConfirm::stdin();

    match commands::execute(&mut session, cli.command, cli.json, &mut confirmer) {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => report(&e),
    }
}
