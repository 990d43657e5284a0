use pageloader::config::{LogFormat, ResolverConfig, StaticConfig};

#[cfg(test)]
mod default_tests {
    use super::*;

    #[test]
    fn test_resolver_defaults() {
        let config = ResolverConfig::default();

        assert_eq!(config.page_suffix, ".page");
        assert_eq!(config.index_basename, "index");
        assert!(config.list_on_miss);
    }

    #[test]
    fn test_logging_defaults() {
        let config = StaticConfig::default().logging;

        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: StaticConfig = toml::from_str("").expect("empty config must parse");

        assert_eq!(config.resolver.page_suffix, ".page");
        assert_eq!(config.logging.level, "info");
    }
}

#[cfg(test)]
mod parsing_tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config: StaticConfig = toml::from_str(
            r#"
            [resolver]
            page_suffix = ".vue"
            list_on_miss = false

            [logging]
            format = "json"
            "#,
        )
        .expect("config must parse");

        assert_eq!(config.resolver.page_suffix, ".vue");
        assert_eq!(config.resolver.index_basename, "index");
        assert!(!config.resolver.list_on_miss);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Text".parse::<LogFormat>().unwrap(), LogFormat::Text);

        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("Invalid log format"));
        assert!(err.contains("text"));
        assert!(err.contains("json"));
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert_eq!(LogFormat::Json.to_string(), "json");
    }
}

#[cfg(test)]
mod sample_config_tests {
    use super::*;

    #[test]
    fn test_sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();

        assert!(sample.contains("[resolver]"));
        assert!(sample.contains("page_suffix"));
        assert!(sample.contains("[logging]"));

        let parsed: StaticConfig = toml::from_str(&sample).expect("sample must parse");
        assert_eq!(parsed.resolver.page_suffix, ".page");
    }

    #[test]
    fn test_write_sample_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pageloader.toml");
        let path_str = path.to_str().expect("utf-8 path");

        StaticConfig::write_sample_config(path_str).expect("write must succeed");

        let written = std::fs::read_to_string(&path).expect("file exists");
        let parsed: StaticConfig = toml::from_str(&written).expect("written sample must parse");
        assert_eq!(parsed.logging.level, "info");
    }
}

#[cfg(test)]
mod global_config_tests {
    use super::*;
    use pageloader::config::{get_config, init_config, try_get_config};

    #[test]
    fn test_init_then_get() {
        init_config();

        let config = get_config();
        assert!(!config.resolver.page_suffix.is_empty());
        assert!(try_get_config().is_some());

        // Idempotent: a second init keeps the loaded instance.
        init_config();
        assert_eq!(get_config().resolver.page_suffix, config.resolver.page_suffix);
    }
}
