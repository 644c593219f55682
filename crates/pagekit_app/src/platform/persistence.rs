use std::fs;
use std::path::Path;

use pagekit_core::PageConfig;
use pagekit_logging::{page_info, page_warn};

use super::scenario::{Scenario, ScenarioError};

/// Reads a RON page configuration. A missing or malformed file yields the defaults.
pub(crate) fn load_config(path: &Path) -> PageConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            page_info!("No page config at {:?}; using defaults", path);
            return PageConfig::default();
        }
        Err(err) => {
            page_warn!("Failed to read page config from {:?}: {}", path, err);
            return PageConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            page_info!("Loaded page config from {:?}", path);
            config
        }
        Err(err) => {
            page_warn!("Failed to parse page config from {:?}: {}", path, err);
            PageConfig::default()
        }
    }
}

pub(crate) fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let origin = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: origin.clone(),
        source,
    })?;
    let scenario = Scenario::parse(&origin, &content)?;
    page_info!("Loaded {} scenario steps from {:?}", scenario.steps.len(), path);
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::scenario::Step;
    use pagekit_core::DEFAULT_NOTIFICATION_DISMISS_MS;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("page.ron"));
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.ron");
        fs::write(
            &path,
            "(send_delay_ms: 250, selectors: (contact_form: \"#enquiry\"))",
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.send_delay_ms, 250);
        assert_eq!(config.selectors.contact_form, "#enquiry");
        assert_eq!(config.selectors.nav_toggle, ".nav-toggle");
        assert_eq!(config.notification_dismiss_ms, DEFAULT_NOTIFICATION_DISMISS_MS);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.ron");
        fs::write(&path, "(send_delay_ms: \"soon\"").unwrap();
        assert_eq!(load_config(&path), PageConfig::default());
    }

    #[test]
    fn scenario_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visit.ron");
        fs::write(&path, "(steps: [Click(\".nav-toggle\"), Advance(16)])").unwrap();

        let scenario = load_scenario(&path).unwrap();
        assert_eq!(
            scenario.steps,
            vec![Step::Click(".nav-toggle".to_string()), Step::Advance(16)]
        );
    }

    #[test]
    fn missing_scenario_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scenario(&dir.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, ScenarioError::Read { .. }));
    }
}
