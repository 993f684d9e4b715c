#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use serde_json::json;
use sprout_core::append_index;
use sprout_model::{
    ArticleDraft, HeroSlideDraft, NewsClippingDraft, SiteSettings, Top10ItemDraft,
};
use sprout_store::{ContentStore, SqliteStore};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sprout")]
#[command(about = "Sprout operations CLI")]
struct Cli {
    /// SQLite database file; created on first use.
    #[arg(long, global = true, default_value = "sprout.db")]
    db: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and apply the schema.
    InitDb,
    /// Load a small demo content set into an initialized database.
    Seed,
    /// Session table maintenance.
    Sessions {
        #[command(subcommand)]
        command: SessionsCommand,
    },
}

#[derive(Subcommand)]
enum SessionsCommand {
    /// Delete expired admin sessions.
    Purge,
}

async fn seed(store: &SqliteStore) -> Result<(), String> {
    let slides = [
        ("/images/hero-launch.png", "신규 서비스 런칭"),
        ("/images/hero-report.png", "2026 마케팅 리포트"),
    ];
    for (image, title) in slides {
        let existing = store.list_hero_slides().await.map_err(|e| e.to_string())?;
        let draft = HeroSlideDraft {
            image: image.to_string(),
            title: title.to_string(),
            badges: sprout_core::normalize_badges("SNS, 바이럴"),
            is_active: true,
        };
        store
            .insert_hero_slide(draft, append_index(existing.len()))
            .await
            .map_err(|e| e.to_string())?;
    }

    for title in ["바이럴 마케팅", "콘텐츠 제작", "SNS 운영"] {
        let existing = store.list_top10_items().await.map_err(|e| e.to_string())?;
        let draft = Top10ItemDraft {
            title: title.to_string(),
            is_active: true,
        };
        store
            .insert_top10_item(draft, append_index(existing.len()))
            .await
            .map_err(|e| e.to_string())?;
    }

    let existing = store
        .list_news_clippings()
        .await
        .map_err(|e| e.to_string())?;
    let draft = NewsClippingDraft {
        image: "/images/news-feature.png".to_string(),
        title: Some("언론 보도".to_string()),
        is_active: true,
    };
    store
        .insert_news_clipping(draft, append_index(existing.len()))
        .await
        .map_err(|e| e.to_string())?;

    let draft = ArticleDraft {
        title: "첫 번째 아티클".to_string(),
        description: "데모 데이터".to_string(),
        image: "/images/article-1.png".to_string(),
        badges: sprout_core::normalize_badges("SNS"),
        category: "marketing".to_string(),
        is_featured: true,
        is_active: true,
    };
    store.insert_article(draft).await.map_err(|e| e.to_string())?;

    let settings = SiteSettings {
        site_title: "Sprout Press".to_string(),
        site_description: "콘텐츠 마케팅 매거진".to_string(),
        ..SiteSettings::default()
    };
    store
        .save_settings(&settings)
        .await
        .map_err(|e| e.to_string())
}

async fn run(cli: Cli) -> Result<serde_json::Value, String> {
    let store =
        SqliteStore::open(&cli.db).map_err(|e| format!("open {}: {e}", cli.db.display()))?;
    match cli.command {
        Commands::InitDb => Ok(json!({"ok": true, "db": cli.db.display().to_string()})),
        Commands::Seed => {
            seed(&store).await?;
            Ok(json!({"ok": true, "seeded": true}))
        }
        Commands::Sessions {
            command: SessionsCommand::Purge,
        } => {
            let purged = store
                .purge_expired_sessions()
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "purged": purged}))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
