//! Static warnings fixed to match time

use rift_echo_types::Cue;

/// A cue announced once per match when match time crosses `at`
#[derive(Debug, Clone, PartialEq)]
pub struct StaticWarning {
    pub at: f64,
    pub cue: Cue,
    pub fired: bool,
}

impl StaticWarning {
    pub fn new(at: f64, cue: Cue) -> Self {
        Self {
            at,
            cue,
            fired: false,
        }
    }
}

/// First-spawn warnings, 30s ahead of each neutral objective
pub fn default_warnings() -> Vec<StaticWarning> {
    vec![
        // First dragon at 5:00
        StaticWarning::new(270.0, Cue::warning("dragon_spawning")),
        // Void grubs at 6:00
        StaticWarning::new(330.0, Cue::warning("grubs_spawning")),
        // Rift herald at 14:00
        StaticWarning::new(810.0, Cue::warning("herald_spawning")),
        // First baron at 20:00
        StaticWarning::new(1170.0, Cue::warning("baron_spawning")),
    ]
}
