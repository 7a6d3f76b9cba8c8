mod common;

use common::fixtures::*;
use common::{TestResult, init_logging, offline_web};
use quire::fonts::{FontRegistry, FontResource, OfflineFontsOptions, Vfs};
use quire::{ConversionOptions, Converter, PipelineError};
use serde_json::json;

#[tokio::test]
async fn test_hast_json_to_document_definition() -> TestResult {
    init_logging();
    let hast = hast_root(vec![
        hast_el("h1", json!({}), vec![hast_text("Report")]),
        hast_el("p", json!({}), vec![hast_text("All good.")]),
        hast_el("img", json!({"src": "https://img.test/logo.png", "alt": "logo"}), vec![]),
    ]);
    let converter = Converter::new(ConversionOptions::default()).with_fetcher(offline_web()?);
    let doc = converter.convert_json(&hast.to_string(), None).await?;
    let value = serde_json::to_value(&doc)?;

    assert_eq!(value["content"][0], json!({"text": "Report", "style": "h1"}));
    assert_eq!(value["content"][2], json!({"text": ["All good."], "style": "p"}));
    let image = value["content"][3]["image"].as_str().ok_or("image")?;
    assert!(image.starts_with("data:image/png;base64,"));
    assert_eq!(value["pageSize"], json!("A4"));
    assert!(value.get("fonts").is_none());
    assert_eq!(value["defaultStyle"], json!({}));
    Ok(())
}

#[tokio::test]
async fn test_source_text_drives_cjk_acquisition() -> TestResult {
    let fetcher = offline_web()?;
    let converter = Converter::new(ConversionOptions::default()).with_fetcher(fetcher.clone());
    let tree = root(vec![el("p", vec![text("hello")])]);

    let latin = converter.convert(&tree, Some("hello")).await?;
    assert!(latin.default_style.font.is_none());
    assert!(fetcher.requests().is_empty());

    let cjk = converter.convert(&tree, Some("こんにちは")).await?;
    assert_eq!(cjk.default_style.font.as_deref(), Some("NotoSansSC"));
    assert!(cjk.fonts.contains_key("NotoSansSC"));
    Ok(())
}

#[tokio::test]
async fn test_offline_bundle_disables_network_fonts() -> TestResult {
    let fetcher = offline_web()?;
    let vfs: Vfs = [("Inter-Regular.ttf".to_string(), "AAEAAA==".to_string())].into_iter().collect();
    let options = ConversionOptions {
        offline_fonts: Some(OfflineFontsOptions::new(vfs).offline_only()),
        ..Default::default()
    };
    let converter = Converter::new(options).with_fetcher(fetcher.clone());
    let doc = converter.convert(&root(vec![el("p", vec![text("中文")])]), None).await?;

    assert!(fetcher.requests().is_empty());
    assert_eq!(doc.default_style.font.as_deref(), Some("Inter"));
    assert_eq!(doc.fonts["Inter"].bold.as_deref(), Some("Inter-Regular.ttf"));
    Ok(())
}

#[tokio::test]
async fn test_shared_registry_keeps_earlier_fonts() -> TestResult {
    let registry = FontRegistry::new();
    for family in ["First", "Second"] {
        let options = ConversionOptions {
            fonts: vec![FontResource::new(family, vec![1])],
            ..Default::default()
        };
        Converter::new(options)
            .offline()
            .with_registry(registry.clone())
            .convert(&root(vec![]), None)
            .await?;
    }
    assert_eq!(registry.families(), ["First", "Second"]);
    Ok(())
}

#[tokio::test]
async fn test_options_from_json_config() -> TestResult {
    let options = ConversionOptions::from_json(
        r#"{"pageSize": "Letter", "pageOrientation": "landscape", "fonts": [{"name": "Inter", "normal": "AQ=="}]}"#,
    )?;
    let doc = Converter::new(options)
        .offline()
        .convert(&root(vec![el("p", vec![text("x")])]), None)
        .await?;
    let value = serde_json::to_value(&doc)?;
    assert_eq!(value["pageSize"], json!("Letter"));
    assert_eq!(value["pageOrientation"], json!("landscape"));
    assert_eq!(value["fonts"]["Inter"]["normal"], json!("Inter-Regular.ttf"));
    assert_eq!(value["defaultStyle"]["font"], json!("Inter"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_tree_json_is_an_error() {
    let converter = Converter::new(ConversionOptions::default()).offline();
    let result = converter.convert_json("{not json", None).await;
    assert!(matches!(result, Err(PipelineError::Tree(_))));
}
