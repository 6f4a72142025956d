use holdem_round::agents::{Action, Intent, ScriptedAgent};
use holdem_round::cards::parse_cards;
use holdem_round::config::TableConfig;
use holdem_round::deck::Deck;
use holdem_round::events::GameEvent;
use holdem_round::game::{Game, PlayerId, Street};

fn heads_up() -> Game {
    let cards = parse_cards("As Ah Kc Kd 2s 7h 8d 9c 3s Jd 4s Qh").unwrap();
    Game::with_dealer(TableConfig::default().with_players(2), Deck::stacked(cards)).unwrap()
}

#[test]
fn history_opens_with_deal_and_blinds() {
    let game = heads_up();
    let lines: Vec<String> = game.history().iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "New hand with 2 players",
            "P1 is dealt two cards",
            "P2 is dealt two cards",
            "*** Preflop ***",
            "P1 posts 1",
            "P2 posts 2",
            "Pot 3, to match 2",
        ]
    );
}

#[test]
fn recent_window_tracks_the_latest_action() {
    let mut game = heads_up();
    game.apply_response(PlayerId::new(1), Action::call(1, 2)).unwrap();
    let recent = game.history_recent(2);
    assert_eq!(
        recent,
        &[
            GameEvent::ActionApplied {
                player: PlayerId::new(1),
                action: Action::Call { pot_increment: 1 },
                street: Street::Preflop,
            },
            GameEvent::PotChanged { pot: 4, outstanding_bid: 2 },
        ]
    );
    // checks do not move the pot
    game.apply_response(PlayerId::new(2), Action::Check).unwrap();
    assert!(matches!(game.history_recent(1), [GameEvent::ActionApplied { action: Action::Check, .. }]));
    assert_eq!(game.history_recent(1000).len(), game.history().len());
}

#[test]
fn street_transitions_are_bracketed() {
    let mut game = heads_up();
    game.apply_response(PlayerId::new(1), Action::call(1, 2)).unwrap();
    game.apply_response(PlayerId::new(2), Action::Check).unwrap();
    let before = game.history().len();
    game.advance_street().unwrap();
    let lines: Vec<String> = game.history()[before..].iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec!["Preflop betting closed", "Burn", "Dealt 7h 8d 9c", "*** Flop *** [7h 8d 9c]"]
    );
}

#[test]
fn full_hand_ends_with_one_terminal_event() {
    let mut game = heads_up();
    let mut script = ScriptedAgent::new([Intent::CheckCall; 8]);
    game.play_hand(&mut script).unwrap();
    let terminal: Vec<&GameEvent> = game.history().iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminal.len(), 1);
    assert!(game.history().last().unwrap().is_terminal());
    assert!(game.history().last().unwrap().to_string().ends_with("=> P1 wins 4"));
    let streets: Vec<Street> = game
        .history()
        .iter()
        .filter_map(|e| match e {
            GameEvent::StreetStarted { street, .. } => Some(*street),
            _ => None,
        })
        .collect();
    assert_eq!(streets, Street::ALL.to_vec());
}

#[test]
fn observer_receives_history_in_order() {
    let mut game = heads_up();
    let mut script = ScriptedAgent::new([Intent::CheckCall; 8]);
    game.play_hand(&mut script).unwrap();
    assert_eq!(script.events(), game.history());
    // nothing is delivered twice
    game.deliver_events(&mut script);
    assert_eq!(script.events().len(), game.history().len());
}
