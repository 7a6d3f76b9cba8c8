mod common;

use common::{TestResult, init_logging, offline_web};
use quire::fonts::{
    DEFAULT_CJK_FONT_URL, FontFallbackConfig, FontRegistry, FontResolver, FontResource, OfflineFontsOptions,
    Vfs, create_font_fallback, detect_required_font_types, process_offline_fonts, resolve_font_fallback,
    validate_offline_fonts_for_document,
};

fn vfs(files: &[&str]) -> Vfs {
    files.iter().map(|f| (f.to_string(), "AAEAAA==".to_string())).collect()
}

#[tokio::test]
async fn test_regular_only_bundle_fills_every_variant() -> TestResult {
    init_logging();
    let processed = process_offline_fonts(&OfflineFontsOptions::new(vfs(&["MyFont-Regular.ttf"])), None).await?;
    let def = &processed.config.font_definitions["MyFont"];
    assert_eq!(def.bold.as_deref(), Some("MyFont-Regular.ttf"));
    assert_eq!(def.italics.as_deref(), Some("MyFont-Regular.ttf"));
    assert_eq!(def.bolditalics.as_deref(), Some("MyFont-Regular.ttf"));
    Ok(())
}

#[tokio::test]
async fn test_japanese_text_acquires_cjk_font() -> TestResult {
    let text = "日本語のテスト";
    assert!(detect_required_font_types(text).needs_cjk);

    let fetcher = offline_web()?;
    let resolved = FontResolver::new()
        .with_fetcher(fetcher.clone())
        .resolve(&[], None, Some(text))
        .await;

    assert!(resolved.cjk_acquired);
    assert_eq!(fetcher.requests(), [DEFAULT_CJK_FONT_URL]);
    assert_eq!(resolved.default_font.as_deref(), Some("NotoSansSC"));
    Ok(())
}

#[tokio::test]
async fn test_every_registered_family_is_complete() -> TestResult {
    let fetcher = offline_web()?;
    let offline = OfflineFontsOptions::new(vfs(&[
        "Serif-Regular.ttf",
        "Serif-Italic.ttf",
        "Sans-Medium.otf",
        "Sans-Bold.otf",
    ]));
    let fonts = [FontResource::new("Mono", vec![1, 2, 3])];
    let registry = FontRegistry::new();

    let resolved = FontResolver::new()
        .with_fetcher(fetcher)
        .resolve(&fonts, Some(&offline), Some("mixed 中文 text"))
        .await;
    resolved.register(&registry);

    let files = registry.vfs_snapshot();
    let families = registry.fonts_snapshot();
    assert_eq!(families.len(), 4);
    for (family, def) in &families {
        assert!(def.is_complete(&files), "{} is incomplete", family);
    }
    assert_eq!(families["Sans"].normal, "Sans-Medium.otf");
    assert_eq!(families["Serif"].bolditalics.as_deref(), Some("Serif-Italic.ttf"));
    Ok(())
}

#[tokio::test]
async fn test_offline_bundle_without_cjk_reports_recommendation() -> TestResult {
    let processed = process_offline_fonts(&OfflineFontsOptions::new(vfs(&["Inter-Regular.ttf"])), None).await?;
    let check = validate_offline_fonts_for_document(&processed.config, "漢字");
    assert!(!check.can_satisfy);
    assert_eq!(check.recommendations.len(), 1);

    let chain = create_font_fallback(&processed.config, Some("NotoSansSC"));
    assert_eq!(resolve_font_fallback("NotoSansSC", &processed.config, &chain)?, "Inter");
    assert_eq!(
        resolve_font_fallback("X", &Default::default(), &FontFallbackConfig::default())?,
        "Helvetica"
    );
    Ok(())
}

#[tokio::test]
async fn test_concurrent_registrations_accumulate() -> TestResult {
    let registry = FontRegistry::new();
    let tasks = ["A", "B", "C"].map(|family| {
        let registry = registry.clone();
        tokio::spawn(async move {
            let _guard = registry.registration_lock().await;
            let resolved = FontResolver::new()
                .resolve(&[FontResource::new(family, vec![1])], None, None)
                .await;
            resolved.register(&registry);
        })
    });
    for task in tasks {
        task.await?;
    }
    let mut families = registry.families();
    families.sort();
    assert_eq!(families, ["A", "B", "C"]);
    Ok(())
}
