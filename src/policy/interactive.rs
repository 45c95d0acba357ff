//! Externally commanded policy.
//!
//! Free-form text from a `CommandSource` is mapped to a move by keyword
//! containment: the command is lowercased and the first table entry whose
//! keyword appears in it names the move. A bounded number of attempts is made,
//! each with a bounded wait; if none yields an eligible move the policy falls
//! back to uniform random choice, so a silent or broken source never stalls a
//! race.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DuelError, RaceRng, Result};
use crate::driver::Vitals;
use crate::moves::MoveCatalog;

use super::{eligible_defense, eligible_offense, MovePolicy};

/// Supplies text commands, e.g. a speech recognizer or a scripted stub.
pub trait CommandSource: std::fmt::Debug {
    /// Wait at most `timeout` for a command; `None` on timeout or failure.
    fn get_command(&mut self, timeout: Duration) -> Option<String>;
}

/// Never answers. Every decision falls back to random choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSource;

impl CommandSource for SilentSource {
    fn get_command(&mut self, _timeout: Duration) -> Option<String> {
        None
    }
}

/// Replays a fixed list of responses, then goes silent.
///
/// A `None` entry stands for a timed-out listen.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    responses: VecDeque<Option<String>>,
}

impl ScriptedSource {
    /// Script where every listen hears something.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: lines.into_iter().map(|l| Some(l.into())).collect(),
        }
    }

    /// Script mixing heard lines and timeouts.
    #[must_use]
    pub fn from_responses(responses: Vec<Option<String>>) -> Self {
        Self {
            responses: responses.into(),
        }
    }

    /// Responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl CommandSource for ScriptedSource {
    fn get_command(&mut self, _timeout: Duration) -> Option<String> {
        self.responses.pop_front().flatten()
    }
}

/// One keyword phrase and the move it selects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub move_name: String,
}

/// Ordered keyword table. Earlier entries win.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordMap {
    entries: Vec<KeywordEntry>,
}

impl KeywordMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Keywords are stored lowercase.
    #[must_use]
    pub fn with(mut self, keyword: &str, move_name: impl Into<String>) -> Self {
        self.entries.push(KeywordEntry {
            keyword: keyword.to_lowercase(),
            move_name: move_name.into(),
        });
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    /// Move named by the first keyword contained in `command`.
    ///
    /// ```
    /// use grid_duel::policy::KeywordMap;
    ///
    /// let map = KeywordMap::mostafa_offense();
    /// assert_eq!(map.resolve("Give me the MERCEDES!"), Some("Mercedes Charge"));
    /// assert_eq!(map.resolve("box box"), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, command: &str) -> Option<&str> {
        let command = command.to_lowercase();
        self.entries
            .iter()
            .find(|e| command.contains(e.keyword.as_str()))
            .map(|e| e.move_name.as_str())
    }

    /// Voice phrases for Mostafa's attacks.
    #[must_use]
    pub fn mostafa_offense() -> Self {
        Self::new()
            .with("turbo start", "Turbo Start")
            .with("start", "Turbo Start")
            .with("mercedes charge", "Mercedes Charge")
            .with("mercedes", "Mercedes Charge")
            .with("charge", "Mercedes Charge")
            .with("corner mastery", "Corner Mastery")
            .with("corner", "Corner Mastery")
            .with("mastery", "Corner Mastery")
            .with("turbo boost", "Turbo Start")
            .with("mercedes attack", "Mercedes Charge")
            .with("corner expert", "Corner Mastery")
    }

    /// Voice phrases for Mostafa's defenses.
    #[must_use]
    pub fn mostafa_defense() -> Self {
        Self::new()
            .with("slipstream cut", "Slipstream Cut")
            .with("slipstream", "Slipstream Cut")
            .with("cut", "Slipstream Cut")
            .with("aggressive block", "Aggressive Block")
            .with("aggressive", "Aggressive Block")
            .with("block", "Aggressive Block")
            .with("slip", "Slipstream Cut")
            .with("defense", "Slipstream Cut")
            .with("defend", "Slipstream Cut")
    }
}

/// Keyword tables and listening limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveConfig {
    pub offensive_keywords: KeywordMap,
    pub defensive_keywords: KeywordMap,
    pub max_attempts: u32,
    pub timeout_ms: u64,
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            offensive_keywords: KeywordMap::mostafa_offense(),
            defensive_keywords: KeywordMap::mostafa_defense(),
            max_attempts: 3,
            timeout_ms: 8_000,
        }
    }
}

impl InteractiveConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Every keyword must point at a move of the matching kind.
    pub(crate) fn check_moves(&self, driver: &str, catalog: &MoveCatalog) -> Result<()> {
        let unknown = |name: &str| DuelError::UnknownMove {
            driver: driver.to_string(),
            name: name.to_string(),
        };
        for entry in self.offensive_keywords.entries() {
            catalog
                .offensive_index(&entry.move_name)
                .ok_or_else(|| unknown(&entry.move_name))?;
        }
        for entry in self.defensive_keywords.entries() {
            catalog
                .defensive_index(&entry.move_name)
                .ok_or_else(|| unknown(&entry.move_name))?;
        }
        Ok(())
    }
}

/// Why one listening attempt didn't produce a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFailure {
    /// Nothing heard within the timeout.
    Timeout,
    /// Heard text matched no keyword.
    Unrecognized(String),
    /// Keyword matched a move that isn't eligible right now.
    Unavailable(String),
}

/// How the most recent decision was made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputResolution {
    /// A command was recognized on the given 1-based attempt.
    Recognized { attempt: u32, move_name: String },
    /// All attempts failed; a random eligible move was used.
    Fallback { failures: Vec<InputFailure> },
}

/// Policy that obeys an external command source.
#[derive(Debug)]
pub struct InteractivePolicy {
    config: InteractiveConfig,
    source: Box<dyn CommandSource>,
    last: Option<InputResolution>,
}

impl InteractivePolicy {
    #[must_use]
    pub fn new(config: InteractiveConfig, source: Box<dyn CommandSource>) -> Self {
        Self {
            config,
            source,
            last: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &InteractiveConfig {
        &self.config
    }

    /// Outcome of the latest listening round, if any happened.
    #[must_use]
    pub fn last_resolution(&self) -> Option<&InputResolution> {
        self.last.as_ref()
    }

    /// Like `last_resolution`, but clears it.
    pub fn take_resolution(&mut self) -> Option<InputResolution> {
        self.last.take()
    }

    fn decide(
        &mut self,
        eligible: &[usize],
        keywords: Keywords,
        lookup: impl Fn(&str) -> Option<usize>,
        rng: &mut RaceRng,
    ) -> Option<usize> {
        if eligible.is_empty() {
            return None;
        }

        let table = match keywords {
            Keywords::Offense => &self.config.offensive_keywords,
            Keywords::Defense => &self.config.defensive_keywords,
        };
        let timeout = self.config.timeout();
        let mut failures = Vec::new();

        for attempt in 1..=self.config.max_attempts {
            let failure = match self.source.get_command(timeout) {
                None => InputFailure::Timeout,
                Some(command) => match table.resolve(&command) {
                    None => InputFailure::Unrecognized(command),
                    Some(name) => match lookup(name).filter(|i| eligible.contains(i)) {
                        Some(index) => {
                            debug!(attempt, move_name = name, "command recognized");
                            self.last = Some(InputResolution::Recognized {
                                attempt,
                                move_name: name.to_string(),
                            });
                            return Some(index);
                        }
                        None => InputFailure::Unavailable(name.to_string()),
                    },
                },
            };
            debug!(attempt, ?failure, "command attempt failed");
            failures.push(failure);
        }

        warn!(
            attempts = self.config.max_attempts,
            "no usable command; choosing randomly"
        );
        self.last = Some(InputResolution::Fallback { failures });
        rng.choose(eligible).copied()
    }
}

#[derive(Clone, Copy)]
enum Keywords {
    Offense,
    Defense,
}

impl MovePolicy for InteractivePolicy {
    fn choose_offensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        rng: &mut RaceRng,
    ) -> Option<usize> {
        let eligible = eligible_offense(catalog, vitals);
        self.decide(
            &eligible,
            Keywords::Offense,
            |name| catalog.offensive_index(name),
            rng,
        )
    }

    fn choose_defensive(
        &mut self,
        catalog: &MoveCatalog,
        vitals: &Vitals,
        _incoming_damage: f64,
        rng: &mut RaceRng,
    ) -> Option<usize> {
        let eligible = eligible_defense(catalog, vitals);
        self.decide(
            &eligible,
            Keywords::Defense,
            |name| catalog.defensive_index(name),
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{DefensiveMove, OffensiveMove};

    fn catalog() -> MoveCatalog {
        let mut c = MoveCatalog::new();
        c.add_offensive(OffensiveMove::new("Turbo Start", 50.0, 10.0, "")).unwrap();
        c.add_offensive(OffensiveMove::new("Mercedes Charge", 90.0, 22.0, "")).unwrap();
        c.add_offensive(OffensiveMove::new("Corner Mastery", 25.0, 7.0, "")).unwrap();
        c.add_defensive(DefensiveMove::new("Slipstream Cut", 20.0, 0.4, "")).unwrap();
        c.add_defensive(DefensiveMove::new("Aggressive Block", 35.0, 1.0, "").with_max_uses(2))
            .unwrap();
        c
    }

    fn policy(source: ScriptedSource) -> InteractivePolicy {
        InteractivePolicy::new(InteractiveConfig::default(), Box::new(source))
    }

    #[test]
    fn test_first_keyword_wins() {
        let map = KeywordMap::mostafa_offense();
        // "start" precedes "charge" in the table
        assert_eq!(map.resolve("start the charge"), Some("Turbo Start"));
        assert_eq!(map.resolve("CORNER EXPERT"), Some("Corner Mastery"));
    }

    #[test]
    fn test_recognized_command() {
        let mut p = policy(ScriptedSource::new(["mercedes charge please"]));
        let mut rng = RaceRng::new(0);

        let pick = p.choose_offensive(&catalog(), &Vitals::new(100.0, 500.0), &mut rng);

        assert_eq!(pick, Some(1));
        assert_eq!(
            p.last_resolution(),
            Some(&InputResolution::Recognized {
                attempt: 1,
                move_name: "Mercedes Charge".into()
            })
        );
    }

    #[test]
    fn test_retries_past_noise_and_timeouts() {
        let source = ScriptedSource::from_responses(vec![
            None,
            Some("uhh".into()),
            Some("block it".into()),
        ]);
        let mut p = policy(source);
        let mut rng = RaceRng::new(0);

        let pick = p.choose_defensive(&catalog(), &Vitals::new(100.0, 500.0), 20.0, &mut rng);

        assert_eq!(pick, Some(1));
        assert!(matches!(
            p.last_resolution(),
            Some(InputResolution::Recognized { attempt: 3, .. })
        ));
    }

    #[test]
    fn test_unaffordable_command_consumes_attempt_then_falls_back() {
        let mut p = policy(ScriptedSource::new(["mercedes", "mercedes", "mercedes"]));
        let mut rng = RaceRng::new(5);

        // 60 fuel: Mercedes Charge (90) unaffordable
        let pick = p.choose_offensive(&catalog(), &Vitals::new(100.0, 60.0), &mut rng);

        assert!(matches!(pick, Some(0) | Some(2)));
        match p.last_resolution() {
            Some(InputResolution::Fallback { failures }) => {
                assert_eq!(failures.len(), 3);
                assert!(failures
                    .iter()
                    .all(|f| *f == InputFailure::Unavailable("Mercedes Charge".into())));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_silent_source_never_blocks() {
        let mut p = InteractivePolicy::new(InteractiveConfig::default(), Box::new(SilentSource));
        let mut rng = RaceRng::new(1);

        let pick = p.choose_defensive(&catalog(), &Vitals::new(100.0, 500.0), 10.0, &mut rng);
        assert!(pick.is_some());
        assert!(matches!(p.last_resolution(), Some(InputResolution::Fallback { .. })));
    }

    #[test]
    fn test_no_eligible_moves_skips_listening() {
        let mut p = policy(ScriptedSource::new(["corner"]));
        let mut rng = RaceRng::new(1);

        let pick = p.choose_offensive(&catalog(), &Vitals::new(100.0, 10.0), &mut rng);

        assert_eq!(pick, None);
        assert!(p.last_resolution().is_none());
    }

    #[test]
    fn test_scripted_source_drains() {
        let mut s = ScriptedSource::new(["a", "b"]);
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.get_command(Duration::ZERO).as_deref(), Some("a"));
        assert_eq!(s.get_command(Duration::ZERO).as_deref(), Some("b"));
        assert_eq!(s.get_command(Duration::ZERO), None);
    }

    #[test]
    fn test_keyword_tables_match_catalog() {
        assert!(InteractiveConfig::default().check_moves("Hassan Mostafa", &catalog()).is_ok());
    }
}
