use holdem_round::agents::{
    Action, ActionProvider, AgentError, AgentKind, AgentTable, BotAgent, BotProfile, Difficulty,
};
use holdem_round::config::TableConfig;
use holdem_round::game::{Game, GameError, PlayerId};

fn bot(seed: u64) -> BotAgent {
    BotAgent::new(BotProfile::default().with_seed(seed))
}

#[test]
fn bot_table_plays_hands_to_the_end() {
    for seed in 0..25u64 {
        let players = 2 + (seed as usize % 5);
        let mut table = AgentTable::for_seats(players);
        for n in 1..=players {
            let difficulty = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard][n % 3];
            let profile = BotProfile::for_difficulty(difficulty).with_seed(seed * 31 + n as u64);
            table.set_agent(PlayerId::new(n), Some(Box::new(BotAgent::new(profile))));
        }
        assert!(table.any_bots());
        assert_eq!(table.agent_kind(PlayerId::new(1)), Some(AgentKind::Bot));

        let mut game = Game::new(TableConfig::default().with_players(players).with_seed(seed)).unwrap();
        let outcome = game.play_hand(&mut table).unwrap();
        assert!(game.is_finished());
        assert_eq!(outcome.pot(), game.pot());
        assert_eq!(game.outcome(), Some(&outcome));
    }
}

#[test]
fn heads_up_preflop_bot_does_not_fold_to_blind() {
    for seed in 0..50u64 {
        let game = Game::new(TableConfig::default().with_players(2).with_seed(seed)).unwrap();
        let view = game.view(PlayerId::new(1)).unwrap();
        let mut b = bot(seed);
        let action = b.request_action(&view, game.outstanding_bid()).unwrap();
        assert_ne!(action, Action::Fold, "seed {seed}");
        assert!(game.validate(PlayerId::new(1), &action).is_ok());
    }
}

#[test]
fn empty_seat_is_an_agent_error() {
    let mut table = AgentTable::for_seats(2);
    table.set_agent(PlayerId::new(1), Some(Box::new(bot(1))));
    assert!(!table.has_agent(PlayerId::new(2)));
    let mut game = Game::new(TableConfig::default().with_players(2).with_seed(4)).unwrap();
    // the bot never folds to the bare blind, so P2 is always asked
    let err = game.play_hand(&mut table).unwrap_err();
    assert_eq!(err, GameError::Agent(AgentError::NoAgent(PlayerId::new(2))));
}
