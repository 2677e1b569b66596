//! Reveal timing: staggered list animation and the typewriter placeholder.

use std::time::Duration;

/// Delay before the child at `index` is revealed.
#[must_use]
pub fn stagger_delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Typewriter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Revealing the current phrase one character per tick.
    Typing,
    /// Holding the complete phrase.
    Pausing,
    /// Removing one character per tick.
    Deleting,
}

/// Delays reported by [`Typewriter::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    /// Between typed characters.
    pub type_delay: Duration,
    /// Between deleted characters.
    pub delete_delay: Duration,
    /// How long a complete phrase stays on screen.
    pub pause: Duration,
    /// Gap between clearing one phrase and typing the next.
    pub between: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(50),
            pause: Duration::from_millis(2_000),
            between: Duration::from_millis(500),
        }
    }
}

/// Cycles through phrases: type, pause, delete, move on.
///
/// Drive it with one [`tick`](Self::tick) per timer period and wait for the
/// returned delay before the next one.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    timing: TypewriterTiming,
    index: usize,
    visible: usize,
    phase: Phase,
}

impl Typewriter {
    /// Starts typing the first phrase with default timing.
    #[must_use]
    pub fn new(phrases: Vec<String>) -> Self {
        Self::with_timing(phrases, TypewriterTiming::default())
    }

    /// Starts typing the first phrase with custom timing.
    #[must_use]
    pub const fn with_timing(phrases: Vec<String>, timing: TypewriterTiming) -> Self {
        Self {
            phrases,
            timing,
            index: 0,
            visible: 0,
            phase: Phase::Typing,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the phrase being shown.
    #[must_use]
    pub const fn phrase_index(&self) -> usize {
        self.index
    }

    /// The visible prefix of the current phrase.
    #[must_use]
    pub fn text(&self) -> &str {
        let phrase = self.current();
        let end = phrase
            .char_indices()
            .nth(self.visible)
            .map_or(phrase.len(), |(at, _)| at);
        phrase.get(..end).unwrap_or_default()
    }

    /// Advances one step and returns the delay until the next tick.
    pub fn tick(&mut self) -> Duration {
        let len = self.current().chars().count();
        match self.phase {
            Phase::Typing => {
                self.visible = (self.visible + 1).min(len);
                if self.visible >= len {
                    self.phase = Phase::Pausing;
                    self.timing.pause
                } else {
                    self.timing.type_delay
                }
            }
            Phase::Pausing => {
                self.phase = Phase::Deleting;
                self.timing.delete_delay
            }
            Phase::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible == 0 {
                    self.advance();
                    self.timing.between
                } else {
                    self.timing.delete_delay
                }
            }
        }
    }

    fn current(&self) -> &str {
        self.phrases.get(self.index).map_or("", String::as_str)
    }

    fn advance(&mut self) {
        self.index = match self.phrases.len() {
            0 => 0,
            n => (self.index + 1) % n,
        };
        self.phase = Phase::Typing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().map(|p| (*p).to_string()).collect())
    }

    #[test]
    fn stagger_is_linear() {
        let step = Duration::from_millis(100);
        assert_eq!(stagger_delay(0, step), Duration::ZERO);
        assert_eq!(stagger_delay(3, step), Duration::from_millis(300));
    }

    #[test]
    fn full_cycle() {
        let timing = TypewriterTiming::default();
        let mut tw = writer(&["ab", "c"]);
        assert_eq!(tw.text(), "");

        assert_eq!(tw.tick(), timing.type_delay);
        assert_eq!(tw.text(), "a");
        assert_eq!(tw.tick(), timing.pause);
        assert_eq!((tw.text(), tw.phase()), ("ab", Phase::Pausing));

        assert_eq!(tw.tick(), timing.delete_delay);
        assert_eq!(tw.phase(), Phase::Deleting);
        assert_eq!(tw.tick(), timing.delete_delay);
        assert_eq!(tw.text(), "a");
        assert_eq!(tw.tick(), timing.between);
        assert_eq!((tw.phrase_index(), tw.phase()), (1, Phase::Typing));
        assert_eq!(tw.text(), "");

        assert_eq!(tw.tick(), timing.pause);
        assert_eq!(tw.text(), "c");
        tw.tick();
        tw.tick();
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn multibyte_phrases_are_cut_on_char_boundaries() {
        let mut tw = writer(&["Atlético"]);
        for _ in 0..6 {
            tw.tick();
        }
        assert_eq!(tw.text(), "Atléti");
    }

    #[test]
    fn no_phrases_never_panics() {
        let mut tw = writer(&[]);
        for _ in 0..5 {
            tw.tick();
        }
        assert_eq!(tw.text(), "");
    }
}
