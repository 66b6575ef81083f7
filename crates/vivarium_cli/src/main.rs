//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `vivarium_core` linkage.
//! - Seed a throwaway in-memory store and print one search page as JSON.
//!
//! Logging is enabled only when `VIVARIUM_LOG_DIR` is set; the level comes
//! from `VIVARIUM_LOG_LEVEL` or the build default.

use log::info;
use std::process::ExitCode;
use uuid::Uuid;
use vivarium_core::{
    default_log_level, init_logging, InMemoryLivingBeingRepository, LivingBeingProps,
    LivingBeingService, LoggingConfig, RepoResult, SearchInput, SortDirection,
};

const SAMPLE_NAMES: [&str; 4] = ["Lambari", "Neon Tetra", "Betta", "Lambari do rabo vermelho"];

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("VIVARIUM_LOG_DIR") {
        let level = std::env::var("VIVARIUM_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&LoggingConfig::new(level, log_dir)) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("vivarium_core ping={}", vivarium_core::ping());
    println!("vivarium_core version={}", vivarium_core::core_version());

    match run_demo() {
        Ok(page) => {
            println!("{page}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo() -> Result<String, Box<dyn std::error::Error>> {
    let service = LivingBeingService::new(InMemoryLivingBeingRepository::new());
    seed(&service)?;

    let filter = std::env::args().nth(1);
    let page = service.search(&SearchInput {
        per_page: Some(2),
        sort: Some("name".to_string()),
        sort_dir: Some(SortDirection::Asc),
        filter,
        ..SearchInput::default()
    })?;
    info!(
        "event=cli_search module=cli status=ok total={} returned={}",
        page.total,
        page.data.len()
    );

    Ok(serde_json::to_string_pretty(&page)?)
}

fn seed(service: &LivingBeingService<InMemoryLivingBeingRepository>) -> RepoResult<()> {
    let water_type_id = Uuid::new_v4();
    let category_id = Uuid::new_v4();
    for name in SAMPLE_NAMES {
        service.create(LivingBeingProps {
            name: name.to_string(),
            scientific_name: String::new(),
            location: "América do Sul".to_string(),
            size: "5".to_string(),
            life_expectancy: 5,
            ph: 6.8,
            temperature: 25.0,
            description: String::new(),
            water_type_id,
            category_id,
        })?;
    }
    Ok(())
}
