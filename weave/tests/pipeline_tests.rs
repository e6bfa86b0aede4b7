use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indoc::indoc;
use serde_json::json;
use tempfile::TempDir;
use weave::{Configs, Error, Fetcher, Source, Warning, Weaver};

/// Serves sheets from memory, keyed by url. Unknown urls fail like a 404.
struct SheetFetcher(HashMap<String, String>);

impl SheetFetcher {
    fn new(sheets: &[(&str, &str)]) -> Self {
        Self(
            sheets
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        )
    }
}

impl Fetcher for SheetFetcher {
    fn fetch(&self, source: &Source) -> Result<String, Error> {
        self.0
            .get(&source.url)
            .cloned()
            .ok_or_else(|| Error::download_error(&source.url, "404 Not Found"))
    }
}

const STRINGS_SHEET: &str = indoc! {"
    key,platforms,en,fr
    greeting,,Hello,Bonjour
    farewell,ios,Bye,Au revoir
"};

fn path_in(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

fn strings_configs(platform: &str, dir: &TempDir) -> Configs {
    serde_json::from_value(json!({
        "platform": platform,
        "strings": {
            "sources": [{ "title": "Main", "url": "main.csv" }],
            "languages": [
                { "id": "en", "path": path_in(dir, "en.xml") },
                { "id": "fr", "path": path_in(dir, "fr.xml") }
            ]
        }
    }))
    .unwrap()
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

#[test]
fn test_strings_for_android() {
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[("main.csv", STRINGS_SHEET)]);
    let report = Weaver::new(strings_configs("android", &dir), fetcher)
        .unwrap()
        .weave()
        .unwrap();

    let en = read(&dir, "en.xml");
    assert!(en.contains(r#"<string name="greeting">Hello</string>"#));
    assert!(!en.contains("farewell"));
    assert!(read(&dir, "fr.xml").contains(r#"<string name="greeting">Bonjour</string>"#));

    assert_eq!(report.written.len(), 2);
    assert!(Path::new(&report.written[0]).ends_with("en.xml"));
    assert_eq!(report.warnings, vec![Warning::NoConstantsConfig]);
}

#[test]
fn test_platform_filtering() {
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[("main.csv", STRINGS_SHEET)]);
    Weaver::new(strings_configs("ios", &dir), fetcher)
        .unwrap()
        .weave()
        .unwrap();
    let en = read(&dir, "en.xml");
    assert!(en.contains(r#""greeting" = "Hello";"#));
    assert!(en.contains(r#""farewell" = "Bye";"#));

    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[("main.csv", STRINGS_SHEET)]);
    Weaver::new(strings_configs("web", &dir), fetcher)
        .unwrap()
        .weave()
        .unwrap();
    let en: serde_json::Value = serde_json::from_str(&read(&dir, "en.xml")).unwrap();
    assert_eq!(en, json!({ "greeting": "Hello" }));
}

#[test]
fn test_missing_translation_is_a_warning() {
    let sheet = indoc! {"
        key,en,fr
        greeting,Hello,Bonjour
        english_only,Only English,
    "};
    for platform in ["android", "web"] {
        let dir = TempDir::new().unwrap();
        let fetcher = SheetFetcher::new(&[("main.csv", sheet)]);
        let report = Weaver::new(strings_configs(platform, &dir), fetcher)
            .unwrap()
            .weave()
            .unwrap();

        assert!(report.warnings.iter().any(|warning| matches!(
            warning,
            Warning::MissingTranslations(location) if location.line == 3
        )));
        assert_eq!(report.written.len(), 2);

        let fr = read(&dir, "fr.xml");
        if platform == "web" {
            let fr: serde_json::Value = serde_json::from_str(&fr).unwrap();
            assert_eq!(fr["english_only"], "");
        } else {
            assert!(!fr.contains("english_only"));
        }
    }
}

#[test]
fn test_web_trailing_commas() {
    let sheet = indoc! {"
        key,en
        one,One
        ### Middle
        two,Two
        three,Three
        ### End
    "};
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[("main.csv", sheet)]);
    let configs: Configs = serde_json::from_value(json!({
        "platform": "web",
        "strings": {
            "sources": [{ "title": "Main", "url": "main.csv" }],
            "languages": [{ "id": "en", "path": path_in(&dir, "en.json") }]
        }
    }))
    .unwrap();
    Weaver::new(configs, fetcher).unwrap().weave().unwrap();

    let out = read(&dir, "en.json");
    let entries: Vec<&str> = out.lines().filter(|line| line.contains(':')).collect();
    assert_eq!(entries.len(), 3);
    assert!(entries[..2].iter().all(|line| line.ends_with(',')));
    assert!(!entries[2].ends_with(','));
}

#[test]
fn test_invalid_key_is_fatal_before_writing() {
    let sheet = indoc! {"
        key,en,fr
        greeting,Hello,Bonjour
        bad key,Oops,Oups
    "};
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[("main.csv", sheet)]);
    let result = Weaver::new(strings_configs("android", &dir), fetcher)
        .unwrap()
        .weave();

    assert!(matches!(
        result,
        Err(Error::KeyWithSpace(ref location)) if location.line == 3 && location.source == "Main"
    ));
    assert!(!dir.path().join("en.xml").exists());
}

#[test]
fn test_sources_are_merged_and_later_duplicates_win() {
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[
        ("main.csv", "key,en\ngreeting,Hello\ntitle,Title\n"),
        ("extra.csv", "key,en\ngreeting,Hi there\n"),
    ]);
    let configs: Configs = serde_json::from_value(json!({
        "platform": "ios",
        "strings": {
            "sources": [
                { "title": "Main", "url": "main.csv" },
                { "title": "Offline", "url": "offline.csv" },
                { "title": "Extra", "url": "extra.csv" }
            ],
            "languages": [{ "id": "en", "path": path_in(&dir, "Localizable.strings") }]
        }
    }))
    .unwrap();
    let report = Weaver::new(configs, fetcher).unwrap().weave().unwrap();

    assert_eq!(
        read(&dir, "Localizable.strings"),
        "\"title\" = \"Title\";\n\"greeting\" = \"Hi there\";\n"
    );
    assert!(report.warnings.iter().any(|warning| matches!(
        warning,
        Warning::SourceUnavailable { title, .. } if title == "Offline"
    )));
    assert!(report.warnings.iter().any(|warning| matches!(
        warning,
        Warning::DuplicateKey { first, second, .. }
            if first.source == "Main" && second.source == "Extra"
    )));
}

#[test]
fn test_constants_and_analytics_for_android() {
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[
        (
            "tags.csv",
            "key,type,value\napi_url,,https://example.com\nhome,screen,Home\n",
        ),
        (
            "analytics.csv",
            "key,type,value\nbuy,Event,buy_tap\nhome,Screen,home_view\nother,,other\n",
        ),
    ]);
    let configs: Configs = serde_json::from_value(json!({
        "platform": "android",
        "constants": [{
            "title": "Tags",
            "sources": [{ "title": "Tags", "url": "tags.csv" }],
            "path": path_in(&dir, "Tags.kt"),
            "packageName": "com.example",
            "typeColumnName": "type"
        }],
        "analytics": [{
            "title": "Analytics",
            "sources": [{ "title": "Analytics", "url": "analytics.csv" }],
            "path": path_in(&dir, "Analytics.kt"),
            "packageName": "com.example",
            "typeColumnName": "type",
            "isTopLevelClassCreated": false
        }]
    }))
    .unwrap();
    let report = Weaver::new(configs, fetcher).unwrap().weave().unwrap();

    let tags = read(&dir, "Tags.kt");
    assert!(tags.starts_with("package com.example\n"));
    assert!(tags.contains("object Tags {"));
    assert!(tags.contains(r#"    const val apiUrl = "https://example.com""#));
    assert!(tags.contains("    object Screen {"));
    assert!(tags.contains(r#"        const val home = "Home""#));

    let analytics = read(&dir, "Analytics.kt");
    assert!(!analytics.contains("object Analytics"));
    let events = analytics.find("object Events {").unwrap();
    let screens = analytics.find("object Screens {").unwrap();
    assert!(events < screens);
    assert!(analytics.contains(r#"    const val buy = "buy_tap""#));

    assert_eq!(report.written.len(), 2);
    assert_eq!(
        report.warnings,
        vec![
            Warning::NoStringsConfig,
            Warning::MissingType(weave::Location::new("Analytics", 4)),
        ]
    );
}

#[test]
fn test_android_constants_need_a_package_name() {
    let dir = TempDir::new().unwrap();
    let configs: Configs = serde_json::from_value(json!({
        "platform": "android",
        "constants": [{
            "title": "Tags",
            "sources": [],
            "path": path_in(&dir, "Tags.kt")
        }]
    }))
    .unwrap();
    let result = Weaver::new(configs, SheetFetcher::new(&[])).unwrap().weave();
    assert!(matches!(result, Err(Error::MissingPackageName(ref title)) if title == "Tags"));
}

#[test]
fn test_missing_key_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[("main.csv", "id,en,fr\ngreeting,Hello,Bonjour\n")]);
    let result = Weaver::new(strings_configs("web", &dir), fetcher)
        .unwrap()
        .weave();
    assert!(matches!(result, Err(Error::MissingKeyColumn { .. })));
}

#[test]
fn test_type_case_variants_share_one_container() {
    let dir = TempDir::new().unwrap();
    let fetcher = SheetFetcher::new(&[(
        "tags.csv",
        "key,type,value\nlogin,screen,Login\nhome,Screen,Home\nlogin,SCREEN,Sign in\n",
    )]);
    let configs: Configs = serde_json::from_value(json!({
        "platform": "ios",
        "constants": [{
            "title": "Tags",
            "sources": [{ "title": "Tags", "url": "tags.csv" }],
            "path": path_in(&dir, "Tags.swift"),
            "typeColumnName": "type"
        }]
    }))
    .unwrap();
    let report = Weaver::new(configs, fetcher).unwrap().weave().unwrap();

    let tags = read(&dir, "Tags.swift");
    assert_eq!(tags.matches("enum Screen {").count(), 1);
    assert_eq!(tags.matches("static let login").count(), 1);
    assert!(tags.contains(r#""Sign in""#));
    assert!(report.warnings.iter().any(|warning| matches!(
        warning,
        Warning::DuplicateKey { first, second, .. } if first.line == 2 && second.line == 4
    )));
}
