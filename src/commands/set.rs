//! Command: show or switch the active set.
use crate::config::Config;
use crate::logging::Log;
use crate::registry::Registry;

/// Switch `name` to `set`, or print its sets when `set` is `None`.
#[allow(clippy::print_stdout)]
pub fn run(registry: &mut Registry, name: &str, set: Option<&str>, log: &dyn Log) {
    let Some(config) = super::lookup(registry, name, log) else {
        return;
    };

    match set {
        Some(set) => {
            config.change_active_set(set, log);
            log.info(&format!("{name} now uses set {set}"));
        }
        None => print!("{}", render_sets(config)),
    }
}

/// One line per set, the active one marked with `*`. An active set that has
/// no entries yet is listed last.
fn render_sets(config: &Config) -> String {
    let active = config.active_set();
    let mut out: String = config
        .sets()
        .map(|(set, _)| {
            let marker = if set == active { '*' } else { ' ' };
            format!("{marker} {set}\n")
        })
        .collect();
    if !config.has_set(active) {
        out.push_str(&format!("* {active} (empty)\n"));
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::logging::test_helpers::RecordingLog;

    fn registry() -> Registry {
        Registry::from_yaml(
            "configs:\n- name: i3\n  infiles:\n    default: [a]\n    laptop: [b]\n  active_set: laptop\n",
            Path::new("/tmp/config.yaml"),
        )
        .unwrap()
    }

    #[test]
    fn render_marks_active_set() {
        let reg = registry();
        assert_eq!(render_sets(reg.get("i3").unwrap()), "  default\n* laptop\n");
    }

    #[test]
    fn render_lists_pending_active_set() {
        let mut reg = registry();
        let log = RecordingLog::default();
        run(&mut reg, "i3", Some("desk"), &log);
        assert_eq!(
            render_sets(reg.get("i3").unwrap()),
            "  default\n  laptop\n* desk (empty)\n"
        );
    }

    #[test]
    fn switching_updates_active_set() {
        let mut reg = registry();
        let log = RecordingLog::default();
        run(&mut reg, "i3", Some("default"), &log);
        assert_eq!(reg.get("i3").unwrap().active_set(), "default");
        assert!(!log.contains("info", "creating new set"));
    }

    #[test]
    fn unknown_config_is_reported() {
        let mut reg = registry();
        let log = RecordingLog::default();
        run(&mut reg, "sway", Some("x"), &log);
        assert!(log.contains("warn", "config sway not found"));
    }
}
