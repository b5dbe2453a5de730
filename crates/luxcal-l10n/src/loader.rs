//! One-shot bundle loading from the embedded set or a resource directory.

use std::fs;
use std::path::Path;

use crate::bundle::LocaleBundle;
use crate::config::ResolverConfig;
use crate::error::{L10nError, Result};
use crate::resolver::{LocalizationResolver, ResolverBuilder};

const BUILTIN: &[(&str, &str)] = &[
    ("en.json", include_str!("../resources/locales/en.json")),
    ("de.json", include_str!("../resources/locales/de.json")),
    ("bg.json", include_str!("../resources/locales/bg.json")),
    ("sl.json", include_str!("../resources/locales/sl.json")),
];

/// Parse the bundles compiled into the crate.
pub fn builtin_bundles() -> Result<Vec<LocaleBundle>> {
    BUILTIN
        .iter()
        .map(|(name, json)| LocaleBundle::from_json_str(name, json))
        .collect()
}

/// Parse every `*.json` file in `dir`, in file-name order.
pub fn load_dir(dir: &Path) -> Result<Vec<LocaleBundle>> {
    let io_err = |path: &Path, e: std::io::Error| L10nError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let json = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            let bundle = LocaleBundle::from_json_str(&name, &json)?;
            tracing::debug!(locale = bundle.code(), file = %name, strings = bundle.len(), "bundle parsed");
            Ok(bundle)
        })
        .collect()
}

/// Load bundles as `config` directs and build a resolver.
pub fn load_resolver(config: &ResolverConfig) -> Result<LocalizationResolver> {
    let bundles = match &config.resource_dir {
        Some(dir) => load_dir(dir)?,
        None => builtin_bundles()?,
    };

    let selected = bundles.into_iter().filter(|b| {
        let keep = config.allows(b.code());
        if !keep {
            tracing::debug!(locale = b.code(), "bundle skipped by allow-list");
        }
        keep
    });

    ResolverBuilder::new(config.reference.clone())
        .bundles(selected)
        .build()
}

/// Resolver over the embedded bundles with `en` as reference.
pub fn builtin_resolver() -> Result<LocalizationResolver> {
    load_resolver(&ResolverConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builtin_bundles_parse() {
        let bundles = builtin_bundles().unwrap();
        let codes: Vec<&str> = bundles.iter().map(LocaleBundle::code).collect();
        assert_eq!(codes, vec!["en", "de", "bg", "sl"]);
    }

    #[test]
    fn allow_list_filters_bundles() {
        let config = ResolverConfig {
            locales: Some(vec!["de".into()]),
            ..ResolverConfig::default()
        };
        let resolver = load_resolver(&config).unwrap();
        assert_eq!(
            resolver.available_locales().into_iter().collect::<Vec<_>>(),
            vec!["de", "en"]
        );
    }

    #[test]
    fn missing_directory_is_io_error() {
        let config = ResolverConfig {
            resource_dir: Some(PathBuf::from("/nonexistent/luxcal/lang")),
            ..ResolverConfig::default()
        };
        assert!(matches!(
            load_resolver(&config),
            Err(L10nError::Io { .. })
        ));
    }
}
