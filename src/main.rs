use clap::Parser;
use hpsu_card_editor::domain::model::CardConfig;
use hpsu_card_editor::utils::error::{EditorError, ErrorSeverity};
use hpsu_card_editor::utils::{logger, validation::Validate};
use hpsu_card_editor::{
    load_with_host, Catalog, CliConfig, EditorController, EditorSettings, EntitySnapshot,
    LocalHost,
};

fn exit_code(e: &EditorError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: EditorError) -> ! {
    tracing::error!(
        "❌ {} (Severity: {:?})",
        e,
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

async fn run(config: &CliConfig) -> hpsu_card_editor::Result<serde_json::Value> {
    let catalog = match &config.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin()?,
    };
    let settings = match &config.settings {
        Some(path) => EditorSettings::from_file(path)?,
        None => EditorSettings::default(),
    };
    let strict = settings.labels.strict;

    let snapshot = EntitySnapshot::from_file(&config.states)?;
    let raw_config: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config.config)?)?;

    let mut notifications = 0usize;
    let mut editor = EditorController::try_new(catalog, settings, |next: &CardConfig| {
        tracing::debug!(
            "config-changed: {}",
            serde_json::to_string(next).unwrap_or_default()
        );
    })?;

    editor.set_language(&config.language);
    if strict {
        editor.validate_labels()?;
    }

    load_with_host(&LocalHost, &mut editor, &raw_config).await?;

    for (target, value) in config.parsed_edits()? {
        editor.handle_element_event(&target, value)?;
        notifications += 1;
    }
    tracing::info!("Applied {} edits", notifications);

    let view = editor.render(&snapshot)?;
    let output = serde_json::json!({
        "language": editor.language(),
        "view": view,
        "config": editor.config(),
    });
    Ok(output)
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting hpsu-card-editor");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證參數
    if let Err(e) = config.validate() {
        fail(e);
    }

    match run(&config).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => fail(e.into()),
        },
        Err(e) => fail(e),
    }
}
