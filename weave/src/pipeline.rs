//! The pipeline: for every configured task, fetch its sources, build and verify the strands,
//! and write the output files.

use tracing::info;

use crate::{
    builders,
    config::{ColumnNames, Configs, ConstantsConfig, StringsConfig},
    error::Error,
    formats::{ConstantGroup, Platform, write_constants, write_scoped, write_strings},
    report::{Report, Warning},
    rows::CsvTable,
    traits::{Fetcher, Parser},
    types::{Source, Strand},
    verify,
};

const STRINGS_TITLE: &str = "Strings";

/// Runs every task of one configuration against one [`Fetcher`].
///
/// Tasks run in order: strings, then each constants task, then each analytics task. A
/// fatal [`Error`] stops the run; everything else ends up in the returned [`Report`].
///
/// # Example
///
/// ```rust,no_run
/// use weave::{Configs, HttpFetcher, Parser, Weaver};
///
/// let configs = Configs::read_from("weave-config.json")?;
/// let report = Weaver::new(configs, HttpFetcher::new()?)?.weave()?;
/// println!("{} files written", report.written.len());
/// Ok::<(), weave::Error>(())
/// ```
pub struct Weaver<F: Fetcher> {
    configs: Configs,
    platform: Platform,
    columns: ColumnNames,
    fetcher: F,
}

// Which builder a constants-style task uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstantsKind {
    Constants,
    Analytics,
}

impl<F: Fetcher> Weaver<F> {
    /// Fails if the configured platform is unknown.
    pub fn new(configs: Configs, fetcher: F) -> Result<Self, Error> {
        let platform = configs.platform()?;
        let columns = configs.columns();
        Ok(Self {
            configs,
            platform,
            columns,
            fetcher,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn weave(&self) -> Result<Report, Error> {
        let mut report = Report::new();

        match &self.configs.strings {
            Some(config) => self.weave_strings(config, &mut report)?,
            None => report.warn(Warning::NoStringsConfig),
        }

        match self.configs.constants.as_deref() {
            Some(tasks) if !tasks.is_empty() => {
                for config in tasks {
                    self.weave_constants(config, ConstantsKind::Constants, &mut report)?;
                }
            }
            _ => report.warn(Warning::NoConstantsConfig),
        }

        for config in self.configs.analytics.iter().flatten() {
            self.weave_constants(config, ConstantsKind::Analytics, &mut report)?;
        }

        Ok(report)
    }

    fn weave_strings(&self, config: &StringsConfig, report: &mut Report) -> Result<(), Error> {
        config.validate()?;

        let mut strands = Vec::new();
        for source in &config.sources {
            let Some(table) = self.download(source, report) else {
                continue;
            };
            strands.extend(builders::language_strands(
                &table,
                source,
                &config.languages,
                &self.columns,
                self.platform,
                report,
            )?);
        }

        let strands = verify::verify_strings(strands, config.languages.len(), report)?;
        if !has_content(&strands) {
            report.warn(Warning::NothingToWrite(STRINGS_TITLE.to_string()));
            return Ok(());
        }

        for language in &config.languages {
            write_scoped(&language.path, &language.id, |writer| {
                write_strings(
                    writer,
                    self.platform,
                    self.configs.android_escaping,
                    &language.id,
                    &strands,
                    report,
                )
            })?;
            report.record_written(&language.path);
        }

        info!("{} parsing complete", STRINGS_TITLE);
        Ok(())
    }

    fn weave_constants(
        &self,
        config: &ConstantsConfig,
        kind: ConstantsKind,
        report: &mut Report,
    ) -> Result<(), Error> {
        config.validate(self.platform)?;
        let columns = config.columns(&self.columns);

        let mut strands = Vec::new();
        for source in &config.sources {
            let Some(table) = self.download(source, report) else {
                continue;
            };
            let built = match kind {
                ConstantsKind::Constants => builders::constant_strands(
                    &table,
                    source,
                    config,
                    &columns,
                    self.platform,
                    report,
                ),
                ConstantsKind::Analytics => builders::analytics_strands(
                    &table,
                    source,
                    config,
                    &columns,
                    self.platform,
                    report,
                ),
            };
            strands.extend(built?);
        }

        let strands = verify::verify_constants(strands, report)?;
        if !has_content(&strands) {
            report.warn(Warning::NothingToWrite(config.title.clone()));
            return Ok(());
        }

        let groups = match kind {
            ConstantsKind::Constants => {
                ConstantGroup::by_type(&strands, self.platform, config.type_casing)
            }
            ConstantsKind::Analytics => ConstantGroup::analytics(&strands),
        };
        write_scoped(&config.path, &config.title, |writer| {
            write_constants(writer, self.platform, config, &groups, report)
        })?;
        report.record_written(&config.path);

        info!("{} parsing complete", config.title);
        Ok(())
    }

    // A source that cannot be fetched or read contributes nothing to its task.
    fn download(&self, source: &Source, report: &mut Report) -> Option<CsvTable> {
        let table = self
            .fetcher
            .fetch(source)
            .and_then(|text| CsvTable::from_str(&text));

        match table {
            Ok(table) => Some(table),
            Err(e) => {
                report.warn(Warning::SourceUnavailable {
                    title: source.title.clone(),
                    reason: e.to_string(),
                });
                None
            }
        }
    }
}

fn has_content(strands: &[Strand]) -> bool {
    strands.iter().any(Strand::is_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapFetcher(HashMap<String, String>);

    impl Fetcher for MapFetcher {
        fn fetch(&self, source: &Source) -> Result<String, Error> {
            self.0
                .get(&source.url)
                .cloned()
                .ok_or_else(|| Error::download_error(&source.url, "404 Not Found"))
        }
    }

    #[test]
    fn test_unknown_platform_fails_early() {
        let configs = Configs::from_str(r#"{ "platform": "desktop" }"#).unwrap();
        let result = Weaver::new(configs, MapFetcher(HashMap::new()));
        assert!(matches!(result, Err(Error::UnknownPlatform(_))));
    }

    #[test]
    fn test_empty_config_only_warns() {
        let configs = Configs::from_str(r#"{ "platform": "web" }"#).unwrap();
        let weaver = Weaver::new(configs, MapFetcher(HashMap::new())).unwrap();
        assert_eq!(weaver.platform(), Platform::Web);
        let report = weaver.weave().unwrap();
        assert_eq!(
            report.warnings,
            vec![Warning::NoStringsConfig, Warning::NoConstantsConfig]
        );
        assert!(report.written.is_empty());
    }

    #[test]
    fn test_unavailable_source_is_a_warning() {
        let configs = Configs::from_str(
            r#"{
                "platform": "ios",
                "strings": {
                    "sources": [{ "title": "Main", "url": "https://example.com/main.csv" }],
                    "languages": [{ "id": "en", "path": "en.strings" }]
                }
            }"#,
        )
        .unwrap();
        let report = Weaver::new(configs, MapFetcher(HashMap::new()))
            .unwrap()
            .weave()
            .unwrap();
        assert!(matches!(
            report.warnings[0],
            Warning::SourceUnavailable { ref title, .. } if title == "Main"
        ));
        assert_eq!(
            report.warnings[1],
            Warning::NothingToWrite(STRINGS_TITLE.to_string())
        );
        assert!(report.written.is_empty());
    }

    #[test]
    fn test_strings_without_languages_is_fatal() {
        let configs = Configs::from_str(
            r#"{ "platform": "android", "strings": { "sources": [], "languages": [] } }"#,
        )
        .unwrap();
        let result = Weaver::new(configs, MapFetcher(HashMap::new()))
            .unwrap()
            .weave();
        assert!(matches!(result, Err(Error::NoLanguages)));
    }
}
