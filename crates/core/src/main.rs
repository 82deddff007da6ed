use std::sync::Arc;
use std::time::Duration;

use menta_classifier::http::{HttpClassifier, HttpTranslator};
use menta_classifier::provider::{ScoreOracle, Translator};
use menta_core::audit;
use menta_core::config::MentaCfg;
use menta_core::emotion::analyzer::EmotionAnalyzer;
use menta_core::emotion::crisis;
use menta_core::suggestion::resolver::SuggestionResolver;
use menta_core::suggestion::store::{PgSuggestionStore, SuggestionStore};
use menta_spotify::api::HttpApi;
use menta_spotify::cache::SystemClock;
use menta_spotify::{ClientOptions, RecommendRequest, RecommendationClient, SpotifyError};
use rustyline::error::ReadlineError;
use sqlx::PgPool;

const DB_CONNECT_TIMEOUT_SECS: u64 = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut startup_notice: Option<String> = None;
    let pool = if let Ok(url) = std::env::var("DATABASE_URL") {
        let mut fallback = |reason: String| {
            startup_notice = Some(format!(
                "Uyarı: {reason}; geçici moda geçildi. Bu oturumdaki analizler kalıcı olmayacak."
            ));
        };
        match tokio::time::timeout(
            Duration::from_secs(DB_CONNECT_TIMEOUT_SECS),
            sqlx::postgres::PgPoolOptions::new()
                .max_connections(8)
                .connect(&url),
        )
        .await
        {
            Ok(Ok(pool)) => match sqlx::migrate!("../../migrations").run(&pool).await {
                Ok(()) => Some(pool),
                Err(_) => {
                    fallback("veritabanı migrasyonu başarısız".into());
                    None
                }
            },
            Ok(Err(_)) => {
                fallback("DATABASE_URL bağlantısı kurulamadı".into());
                None
            }
            Err(_) => {
                fallback(format!("veritabanı bağlantısı zaman aşımına uğradı ({DB_CONNECT_TIMEOUT_SECS}s)"));
                None
            }
        }
    } else {
        None
    };

    let cfg = if let Some(ref pool) = pool {
        MentaCfg::load(pool).await?
    } else {
        MentaCfg::default()
    };

    let oracle: Option<Arc<dyn ScoreOracle>> = std::env::var("MENTA_HF_API_KEY").ok().map(|key| {
        Arc::new(HttpClassifier::new(
            cfg.classifier_model.clone(),
            key,
            std::env::var("MENTA_HF_BASE_URL").ok(),
        )) as _
    });
    let translator: Option<Arc<dyn Translator>> = std::env::var("MENTA_HF_API_KEY").ok().map(|key| {
        Arc::new(HttpTranslator::new(
            cfg.translation_model.clone(),
            key,
            std::env::var("MENTA_HF_BASE_URL").ok(),
        )) as _
    });
    if oracle.is_none() {
        tracing::info!("MENTA_HF_API_KEY not set, running keyword-only resolution");
    }
    let analyzer = EmotionAnalyzer::new(&cfg, oracle, translator);

    let store: Option<Arc<dyn SuggestionStore>> = pool
        .clone()
        .map(|p| Arc::new(PgSuggestionStore::new(p)) as _);
    let suggestions = SuggestionResolver::new(store);

    let spotify_api = HttpApi::from_env();
    let spotify_configured = spotify_api.has_credentials();
    let recommendations = RecommendationClient::new(
        Arc::new(spotify_api),
        Arc::new(SystemClock),
        ClientOptions {
            default_market: Some(cfg.default_market.clone()),
            token_early_refresh_secs: cfg.token_early_refresh_secs,
            genre_ttl_secs: cfg.genre_ttl_secs,
        },
    );

    if let Some(notice) = startup_notice {
        println!("{notice}");
    }
    println!("menta — mesaj yazın; /rec <duygu> [adet], /log, /quit");
    if !spotify_configured {
        println!("(müzik önerileri kapalı: Spotify kimlik bilgileri ayarlanmamış)");
    }

    let mut editor = rustyline::DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(text);
                if matches!(text, "/q" | "/exit" | "/quit") {
                    break;
                }
                if let Some(rest) = text.strip_prefix("/rec") {
                    handle_recommend(&recommendations, rest, cfg.default_limit, spotify_configured)
                        .await;
                    continue;
                }
                if text == "/log" {
                    handle_log(pool.as_ref()).await;
                    continue;
                }
                handle_message(&analyzer, &suggestions, pool.as_ref(), text).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("girdi hatası: {e}");
                break;
            }
        }
    }
    println!();
    Ok(())
}

async fn handle_message(
    analyzer: &EmotionAnalyzer,
    suggestions: &SuggestionResolver,
    pool: Option<&PgPool>,
    text: &str,
) {
    let analysis = analyzer.analyze(text).await;
    let uncertainty = if analysis.resolved.uncertain { " (belirsiz)" } else { "" };
    println!("duygu: {}{uncertainty}", analysis.resolved.label);
    let notable: Vec<String> = analysis
        .resolved
        .scores
        .iter()
        .filter(|(_, v)| *v >= 0.05)
        .map(|(l, v)| format!("{l}:{v:.2}"))
        .collect();
    if !notable.is_empty() {
        println!("skorlar: {}", notable.join(" "));
    }

    if analysis.crisis.flagged {
        if let Some(reason) = &analysis.crisis.reason {
            println!("!! {reason}");
        }
        for resource in crisis::crisis_resources() {
            println!("   {} — {} ({})", resource.title, resource.description, resource.phone);
        }
    }

    let suggestion = suggestions.suggestion_for(&analysis.resolved.label).await;
    println!("öneri: {suggestion}");

    if let Some(pool) = pool {
        if let Err(e) = audit::record_analysis(pool, &analysis, text).await {
            tracing::warn!(error = %e, "analysis audit write failed");
        }
    }
}

async fn handle_recommend(
    client: &RecommendationClient,
    args: &str,
    default_limit: u32,
    configured: bool,
) {
    if !configured {
        println!("müzik önerileri için MENTA_SPOTIFY_CLIENT_ID ve MENTA_SPOTIFY_CLIENT_SECRET gerekli");
        return;
    }
    let mut parts = args.split_whitespace();
    let emotion = parts.next().unwrap_or("neutral");
    let limit = parts
        .next()
        .and_then(|l| l.parse().ok())
        .unwrap_or(default_limit);

    match client.recommend(&RecommendRequest::for_emotion(emotion, limit)).await {
        Ok(tracks) if tracks.is_empty() => println!("sonuç bulunamadı"),
        Ok(tracks) => {
            for track in tracks {
                println!("♪ {} — {}", track.name, track.artists);
            }
        }
        Err(e @ SpotifyError::Configuration) => println!("{e}"),
        Err(e) => println!("öneri alınamadı: {e}"),
    }
}

async fn handle_log(pool: Option<&PgPool>) {
    let Some(pool) = pool else {
        println!("geçici modda analiz geçmişi yok");
        return;
    };
    match audit::fetch_recent(pool, 5).await {
        Ok(entries) if entries.is_empty() => println!("kayıt yok"),
        Ok(entries) => {
            for entry in entries {
                println!(
                    "{}  {}  {}",
                    entry.analysis.created_at.format("%Y-%m-%d %H:%M"),
                    entry.analysis.resolved.label,
                    entry.text
                );
            }
        }
        Err(e) => println!("geçmiş okunamadı: {e}"),
    }
}
