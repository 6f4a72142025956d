use crate::cards::{Card, Suit};
use crate::events::GameEvent;
use crate::evaluator::best_of;
use crate::game::Street;
use crate::hand::HoleCards;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::Duration;

use super::{Action, ActionProvider, AgentError, AgentKind, Intent, PlayerView};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    pub bluff: f64,
    /// Bots stop raising once the outstanding bid reaches this many big blinds.
    pub raise_cap: u64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff) = match difficulty {
            Difficulty::Easy => (0.3, 0.18, 0.03),
            Difficulty::Medium => (0.5, 0.35, 0.05),
            Difficulty::Hard => (0.62, 0.48, 0.08),
        };
        Self {
            difficulty,
            tightness,
            aggression,
            bluff,
            raise_cap: 8,
            min_delay_ms: 0,
            max_delay_ms: 0,
            rng_seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_raise_cap(mut self, big_blinds: u64) -> Self {
        self.raise_cap = big_blinds;
        self
    }

    /// Pause between `min_ms` and `max_ms` before each decision.
    pub fn with_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.min_delay_ms = min_ms;
        self.max_delay_ms = max_ms;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug, Clone, Copy)]
struct BotDecision {
    intent: Intent,
    reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PositionBucket {
    HeadsUp,
    Blind,
    Early,
    Late,
}

#[derive(Clone, Copy)]
struct DecisionParams {
    adjusted: f64,
    fold_threshold: f64,
    raise_threshold: f64,
    aggression: f64,
    bluff: f64,
}

struct BotContext<'a> {
    view: &'a PlayerView<'a>,
    outstanding: u64,
    to_call: u64,
    /// Highest raise target this bot will still make; `None` once capped.
    raise_room: Option<u64>,
}

/// A computer player with an adjustable profile. Seeded bots are reproducible.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    rng: StdRng,
    hands_seen: u32,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let rng = match profile.rng_seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { profile, rng, hands_seen: 0 }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    /// Hands started since this bot sat down.
    pub fn hands_seen(&self) -> u32 {
        self.hands_seen
    }

    fn decide(&mut self, ctx: &BotContext<'_>) -> BotDecision {
        let view = ctx.view;

        // Heads-up preflop: never fold to the bare blind.
        if view.street == Street::Preflop
            && view.active_players == 2
            && ctx.outstanding == view.big_blind
            && ctx.to_call > 0
        {
            return BotDecision { intent: Intent::Call, reason: "defend_blind" };
        }

        let position = position_bucket(view);
        let strength = estimate_strength(&view.hole, view.community.as_slice(), position);
        let pot_odds = if ctx.to_call == 0 {
            0.0
        } else {
            ctx.to_call as f64 / (view.pot + ctx.to_call) as f64
        };
        let (mistake_rate, diff_bias) = difficulty_modifiers(self.profile.difficulty);
        let tightness = (self.profile.tightness + diff_bias).clamp(0.05, 0.95);
        let aggression = (self.profile.aggression + diff_bias).clamp(0.05, 0.95);
        let bluff = (self.profile.bluff + diff_bias * 0.5).clamp(0.0, 0.5);

        let noise = self.rng.random_range(-1.0..=1.0) * mistake_rate * 0.18;
        let adjusted = (strength + noise).clamp(0.0, 1.0);

        let fold_threshold = (0.35 + tightness * 0.3 - pot_odds * 0.25).clamp(0.1, 0.9);
        let raise_threshold = (0.68 - aggression * 0.25).clamp(0.15, 0.9);
        let params = DecisionParams { adjusted, fold_threshold, raise_threshold, aggression, bluff };

        if ctx.to_call > 0 {
            self.decide_facing_bet(ctx, params)
        } else {
            self.decide_when_level(ctx, params)
        }
    }

    fn decide_facing_bet(&mut self, ctx: &BotContext<'_>, params: DecisionParams) -> BotDecision {
        if params.adjusted < params.fold_threshold {
            return BotDecision { intent: Intent::Fold, reason: "fold" };
        }
        if params.adjusted > params.raise_threshold && self.rng.random::<f64>() < params.aggression
        {
            if let Some(target) = choose_raise_target(ctx, params.aggression, params.adjusted) {
                return BotDecision { intent: Intent::RaiseTo(target), reason: "value_raise" };
            }
        }
        BotDecision { intent: Intent::Call, reason: "call" }
    }

    fn decide_when_level(&mut self, ctx: &BotContext<'_>, params: DecisionParams) -> BotDecision {
        let value = params.adjusted > params.raise_threshold
            && self.rng.random::<f64>() < params.aggression;
        let bluffing = !value
            && params.adjusted < params.fold_threshold
            && self.rng.random::<f64>() < params.bluff;
        if value || bluffing {
            if let Some(target) = choose_raise_target(ctx, params.aggression, params.adjusted) {
                let reason = if value { "value_raise" } else { "bluff" };
                return BotDecision { intent: Intent::RaiseTo(target), reason };
            }
        }
        BotDecision { intent: Intent::Check, reason: "check" }
    }

    fn pause(&mut self) {
        let min = self.profile.min_delay_ms;
        let max = self.profile.max_delay_ms.max(min);
        let ms = if max == min { min } else { self.rng.random_range(min..=max) };
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

impl ActionProvider for BotAgent {
    fn request_action(
        &mut self,
        view: &PlayerView<'_>,
        outstanding_bid: u64,
    ) -> Result<Action, AgentError> {
        self.pause();
        let cap = self.profile.raise_cap.saturating_mul(view.big_blind);
        let ctx = BotContext {
            view,
            outstanding: outstanding_bid,
            to_call: outstanding_bid.saturating_sub(view.bid),
            raise_room: (outstanding_bid < cap).then_some(cap),
        };
        let decision = self.decide(&ctx);
        let action = decision.intent.resolve(view.bid, outstanding_bid);
        log::debug!("bot {} chose {action} ({})", view.player, decision.reason);
        Ok(action)
    }

    fn observe(&mut self, event: &GameEvent) {
        if matches!(event, GameEvent::HandStarted { .. }) {
            self.hands_seen += 1;
        }
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}

fn position_bucket(view: &PlayerView<'_>) -> PositionBucket {
    if view.active_players <= 2 {
        return PositionBucket::HeadsUp;
    }
    // Seats 1 and 2 post the blinds; the rest act in seating order after them.
    match view.player.index() {
        0 | 1 => PositionBucket::Blind,
        i if i < 2 + (view.active_players - 2) / 2 => PositionBucket::Early,
        _ => PositionBucket::Late,
    }
}

fn difficulty_modifiers(difficulty: Difficulty) -> (f64, f64) {
    match difficulty {
        Difficulty::Easy => (0.28, -0.1),
        Difficulty::Medium => (0.14, 0.0),
        Difficulty::Hard => (0.08, 0.05),
    }
}

/// Raise target sized off the pot, clamped to the bot's cap.
fn choose_raise_target(ctx: &BotContext<'_>, aggression: f64, strength: f64) -> Option<u64> {
    let cap = ctx.raise_room?;
    let base_factor = if strength > 0.85 {
        1.0
    } else if strength > 0.65 {
        0.7
    } else {
        0.5
    };
    let scale = 0.9 + aggression * 0.3;
    let raise = ((ctx.view.pot.max(ctx.outstanding) as f64) * base_factor * scale).round() as u64;
    let target = ctx.outstanding + raise.max(ctx.view.big_blind).max(1);
    Some(target.min(cap).max(ctx.outstanding + 1))
}

fn estimate_strength(hole: &HoleCards, board: &[Card], position: PositionBucket) -> f64 {
    if board.is_empty() {
        return preflop_strength_with_position(hole, position);
    }
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board);

    match best_of(&cards) {
        Ok(eval) => {
            let base = f64::from(eval.quality.ordinal() - 1) / 8.0;
            let high = f64::from(eval.best_five[0].rank().value()) / 14.0;
            let mut strength = base * 0.85 + high * 0.15;
            if board.len() < 5 {
                strength = (strength + draw_bonus(&cards)).min(1.0);
            }
            let texture_penalty = board_texture(board) * 0.12 * (1.0 - base);
            (strength - texture_penalty).clamp(0.0, 1.0)
        }
        Err(_) => preflop_strength_with_position(hole, position),
    }
}

fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = i32::from(hole.first().rank().value());
    let b = i32::from(hole.second().rank().value());
    let high = f64::from(a.max(b));
    let low = f64::from(a.min(b));
    let suited = hole.first().suit() == hole.second().suit();
    let gap = (a - b).abs();

    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if a == b {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if suited {
        score += 0.05;
    }
    match gap {
        1 => score += 0.05,
        2 => score += 0.02,
        g if g > 4 => score -= 0.05,
        _ => {}
    }
    score.clamp(0.0, 1.0)
}

fn preflop_strength_with_position(hole: &HoleCards, position: PositionBucket) -> f64 {
    let base = preflop_strength(hole);
    let (bonus, penalty) = match position {
        PositionBucket::HeadsUp => (0.12, 0.04),
        PositionBucket::Late => (0.1, 0.06),
        PositionBucket::Early => (0.06, 0.1),
        PositionBucket::Blind => (0.07, 0.07),
    };
    if preflop_in_range(hole, position) {
        (base + bonus).min(1.0)
    } else {
        (base - penalty).max(0.0)
    }
}

fn preflop_in_range(hole: &HoleCards, position: PositionBucket) -> bool {
    let a = hole.first().rank().value();
    let b = hole.second().rank().value();
    let (high, low) = (a.max(b), a.min(b));
    let suited = hole.first().suit() == hole.second().suit();
    let gap = high - low;

    if a == b {
        return match position {
            PositionBucket::Early => high >= 7,
            _ => true,
        };
    }
    match position {
        PositionBucket::HeadsUp => true,
        PositionBucket::Early => {
            (suited && ((high == 14 && low >= 11) || (high == 13 && low >= 12)))
                || (high >= 13 && low >= 12)
                || (suited && gap == 1 && high >= 9)
        }
        PositionBucket::Late => {
            (suited && high == 14)
                || (high >= 10 && low >= 10)
                || (high == 14 && low >= 10)
                || (suited && ((gap == 1 && high >= 7) || (gap == 2 && high >= 10)))
        }
        PositionBucket::Blind => {
            (suited && high == 14)
                || (high == 14 && low >= 9)
                || (high >= 10 && low >= 10)
                || (suited && ((gap == 1 && high >= 6) || (gap == 2 && high >= 9)))
        }
    }
}

fn suit_index(suit: Suit) -> usize {
    match suit {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// How coordinated the board is, 0.0 (dry) to 1.0 (wet).
fn board_texture(board: &[Card]) -> f64 {
    if board.len() < 3 {
        return 0.0;
    }
    let mut suits = [0u8; 4];
    let mut rank_counts = [0u8; 15];
    for c in board {
        suits[suit_index(c.suit())] += 1;
        rank_counts[usize::from(c.rank().value())] += 1;
    }
    let max_suit = suits.iter().copied().max().unwrap_or(0);
    let mut texture: f64 = match max_suit {
        4..=5 => 0.5,
        3 => 0.3,
        2 => 0.15,
        _ => 0.0,
    };
    let max_rank = rank_counts.iter().copied().max().unwrap_or(0);
    if max_rank >= 3 {
        texture += 0.25;
    } else if max_rank == 2 {
        texture += 0.15;
    }
    let ranks = distinct_ranks_with_low_ace(board);
    if ranks.windows(3).any(|w| w[2] - w[0] <= 4) {
        texture += 0.15;
    }
    texture.clamp(0.0, 1.0)
}

fn draw_bonus(cards: &[Card]) -> f64 {
    let mut bonus = 0.0;
    let mut suits = [0u8; 4];
    for c in cards {
        suits[suit_index(c.suit())] += 1;
    }
    if suits.contains(&4) {
        bonus += 0.07;
    }
    let ranks = distinct_ranks_with_low_ace(cards);
    if let Some(span) = ranks.windows(4).map(|w| w[3] - w[0]).min() {
        match span {
            3 => bonus += 0.06,
            4 => bonus += 0.03,
            _ => {}
        }
    }
    bonus
}

fn distinct_ranks_with_low_ace(cards: &[Card]) -> Vec<u8> {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
    ranks.sort_unstable();
    ranks.dedup();
    if ranks.last() == Some(&14) {
        ranks.insert(0, 1);
    }
    ranks
}
