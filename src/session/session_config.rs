use crate::game_state::chess_types::PieceKind;
use crate::utils::event_log::LogLevel;

/// Settings shared by every session of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Kind a pawn becomes when a move reaches the far rank without a choice.
    pub default_promotion: PieceKind,
    pub log_capacity: usize,
    pub log_level: LogLevel,
    /// Append `+` / `#` to recorded move notation.
    pub annotate_checks: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_promotion: PieceKind::Queen,
            log_capacity: 1024,
            log_level: LogLevel::Info,
            annotate_checks: true,
        }
    }
}

impl SessionConfig {
    /// Applies one named option. Names are case-insensitive; on error the
    /// config is left unchanged.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("DefaultPromotion") {
            let kind = value
                .parse::<PieceKind>()
                .map_err(|_| format!("invalid DefaultPromotion value '{value}'"))?;
            if !kind.is_promotable() {
                return Err(format!("invalid DefaultPromotion value '{value}'"));
            }
            self.default_promotion = kind;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("LogCapacity") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid LogCapacity value '{value}'"))?;
            self.log_capacity = parsed.max(1);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("LogLevel") {
            self.log_level = value
                .parse::<LogLevel>()
                .map_err(|_| format!("invalid LogLevel value '{value}'"))?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("AnnotateChecks") {
            let v = value.trim().to_ascii_lowercase();
            self.annotate_checks = match v.as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => return Err(format!("invalid AnnotateChecks value '{value}'")),
            };
            return Ok(());
        }
        Err(format!("unknown option '{name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.default_promotion, PieceKind::Queen);
        assert_eq!(config.log_capacity, 1024);
        assert!(config.annotate_checks);
    }

    #[test]
    fn set_option_is_case_insensitive() {
        let mut config = SessionConfig::default();
        config
            .set_option("defaultpromotion", "knight")
            .expect("knight is promotable");
        config
            .set_option("ANNOTATECHECKS", "off")
            .expect("off is a boolean");
        config.set_option("LogLevel", "debug").expect("debug is a level");
        assert_eq!(config.default_promotion, PieceKind::Knight);
        assert!(!config.annotate_checks);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn rejected_options_leave_config_unchanged() {
        let mut config = SessionConfig::default();
        assert!(config.set_option("DefaultPromotion", "king").is_err());
        assert!(config.set_option("LogCapacity", "many").is_err());
        assert!(config.set_option("Hash", "64").is_err());
        assert_eq!(config, SessionConfig::default());
    }
}
