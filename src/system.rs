//! Angaben zur Hardware für die Startausgabe.

use std::fmt;

/// Kerne und Threads, die beim Start angezeigt werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemInfo {
    pub physical_cores: usize, // Physische CPU-Kerne.
    pub logical_cores: usize,  // Logische Kerne, die der Prozess nutzen darf.
    pub rayon_threads: usize,  // Threads im globalen Rayon-Pool.
}

impl SystemInfo {
    pub fn detect() -> Self {
        Self {
            physical_cores: num_cpus::get_physical(),
            logical_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Physische Kerne:  {}", self.physical_cores)?;
        writeln!(f, "Logische Kerne:   {}", self.logical_cores)?;
        write!(f, "Verfügbare Threads im System: {}", self.rayon_threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_at_least_one_of_each() {
        let info = SystemInfo::detect();
        assert!(info.physical_cores >= 1);
        assert!(info.logical_cores >= 1);
        assert!(info.rayon_threads >= 1);
    }

    #[test]
    fn display_lists_every_count() {
        let info = SystemInfo {
            physical_cores: 4,
            logical_cores: 8,
            rayon_threads: 6,
        };
        let text = info.to_string();

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Physische Kerne:  4"));
        assert!(text.contains("Logische Kerne:   8"));
        assert!(text.contains("Verfügbare Threads im System: 6"));
    }
}
