/// Cards a hand consumes besides hole cards: three burns plus five community cards.
const BOARD_AND_BURNS: usize = 8;
const DECK_SIZE: usize = 52;

/// Fewest seats a hand can be dealt to.
pub const MIN_PLAYERS: usize = 2;
/// Most seats a single 52-card deck can serve.
pub const MAX_PLAYERS: usize = (DECK_SIZE - BOARD_AND_BURNS) / 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("need at least {min} players, got {0}", min = MIN_PLAYERS)]
    TooFewPlayers(usize),
    #[error("at most {max} players fit one deck, got {0}", max = MAX_PLAYERS)]
    TooManyPlayers(usize),
    #[error("big blind must be positive and at least the small blind (sb {small}, bb {big})")]
    InvalidBlinds { small: u64, big: u64 },
    #[error("max prompt attempts must be at least 1")]
    NoPromptAttempts,
}

/// Settings for one hand.
///
/// ```
/// use holdem_round::config::TableConfig;
///
/// let cfg = TableConfig::default().with_players(2).with_seed(7);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.big_blind, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TableConfig {
    pub players: usize,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Shuffle seed; `None` draws one from the OS RNG.
    pub seed: Option<u64>,
    /// How many times a player is asked again after returning an illegal action.
    pub max_prompt_attempts: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { players: 3, small_blind: 1, big_blind: 2, seed: None, max_prompt_attempts: 3 }
    }
}

impl TableConfig {
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    pub fn with_blinds(mut self, small_blind: u64, big_blind: u64) -> Self {
        self.small_blind = small_blind;
        self.big_blind = big_blind;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_prompt_attempts(mut self, attempts: u32) -> Self {
        self.max_prompt_attempts = attempts;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(self.players));
        }
        if self.players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(self.players));
        }
        if self.big_blind == 0 || self.small_blind > self.big_blind {
            return Err(ConfigError::InvalidBlinds {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.max_prompt_attempts == 0 {
            return Err(ConfigError::NoPromptAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_players_one_two_blinds() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.players, 3);
        assert_eq!((cfg.small_blind, cfg.big_blind), (1, 2));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn player_bounds() {
        assert_eq!(MAX_PLAYERS, 22);
        let one = TableConfig::default().with_players(1);
        assert_eq!(one.validate(), Err(ConfigError::TooFewPlayers(1)));
        let many = TableConfig::default().with_players(23);
        assert_eq!(many.validate(), Err(ConfigError::TooManyPlayers(23)));
        assert!(TableConfig::default().with_players(22).validate().is_ok());
    }

    #[test]
    fn blinds_must_be_ordered() {
        let cfg = TableConfig::default().with_blinds(5, 2);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidBlinds { .. })));
        let cfg = TableConfig::default().with_blinds(0, 0);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidBlinds { .. })));
    }

    #[test]
    fn prompt_attempts_must_be_positive() {
        let cfg = TableConfig::default().with_max_prompt_attempts(0);
        assert_eq!(cfg.validate(), Err(ConfigError::NoPromptAttempts));
    }
}
