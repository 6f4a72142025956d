use holdem_round::agents::{Action, Intent, ScriptedAgent};
use holdem_round::cards::parse_cards;
use holdem_round::config::TableConfig;
use holdem_round::deck::Deck;
use holdem_round::events::GameEvent;
use holdem_round::game::{ActionError, Game, GameError, HandOutcome, PlayerId, Street};
use proptest::prelude::*;

// Dealt in seating order two at a time, then burn/flop/burn/turn/burn/river.
const HEADS_UP: &str = "As Ah Kc Kd 2s 7h 8d 9c 3s Jd 4s Qh";
const THREE_WAY: &str = "As Ah Kc Kd Qs Qc 2s 7h 8d 9c 3s Jd 4s 2h";

fn game(players: usize, cards: &str) -> Game {
    let cfg = TableConfig::default().with_players(players);
    Game::with_dealer(cfg, Deck::stacked(parse_cards(cards).expect("valid cards")))
        .expect("game starts")
}

fn p(n: usize) -> PlayerId {
    PlayerId::new(n)
}

#[test]
fn heads_up_checked_down_to_showdown() {
    let mut g = game(2, HEADS_UP);
    assert_eq!(g.players()[0].bid(), 1);
    assert_eq!(g.players()[1].bid(), 2);
    assert_eq!(g.outstanding_bid(), 2);

    g.apply_response(p(1), Action::call(1, 2)).unwrap();
    assert_eq!(g.pot(), 4);
    assert_eq!(g.outstanding_bid(), 2);
    g.apply_response(p(2), Action::Check).unwrap();
    assert!(!g.action_pending());

    assert_eq!(g.advance_street().unwrap(), Street::Flop);
    assert_eq!(g.community().len(), 3);
    assert_eq!(g.outstanding_bid(), 0);
    assert!(g.players().iter().all(|pl| pl.bid() == 0));

    for street in [Street::Turn, Street::River] {
        g.apply_response(p(1), Action::Check).unwrap();
        g.apply_response(p(2), Action::Check).unwrap();
        assert_eq!(g.advance_street().unwrap(), street);
    }
    assert_eq!(g.community().len(), 5);
    g.apply_response(p(1), Action::Check).unwrap();
    g.apply_response(p(2), Action::Check).unwrap();

    let outcome = g.showdown().unwrap();
    assert_eq!(outcome.winner(), Some(p(1)));
    assert_eq!(outcome.pot(), 4);
    assert_eq!(g.dealer().burned().len(), 3);
}

#[test]
fn play_hand_asks_players_in_seating_order() {
    let mut g = game(3, THREE_WAY);
    let mut script = ScriptedAgent::new([
        Intent::Call,       // P1
        Intent::Check,      // P2
        Intent::RaiseTo(6), // P3
        Intent::Call,       // P1
        Intent::Fold,       // P2
        // flop onwards: P1, P3
        Intent::Check,
        Intent::Check,
        Intent::Check,
        Intent::Check,
        Intent::Check,
        Intent::Check,
    ]);
    let outcome = g.play_hand(&mut script).unwrap();
    let order: Vec<usize> = script.asked().iter().map(|(id, _, _)| id.number()).collect();
    assert_eq!(order, vec![1, 2, 3, 1, 2, 1, 3, 1, 3, 1, 3]);
    assert_eq!(script.remaining(), 0);
    // blinds 3, call 1, raise 4, call 4
    assert_eq!(outcome.pot(), 12);
    assert_eq!(outcome.results().len(), 2);
    assert_eq!(outcome.winner(), Some(p(1)));
}

#[test]
fn raise_reopens_action_only_for_others() {
    let mut g = game(3, THREE_WAY);
    g.apply_response(p(1), Action::call(1, 2)).unwrap();
    g.apply_response(p(2), Action::raise_to(5, 2)).unwrap();
    let flags: Vec<bool> = g.players().iter().map(|pl| pl.action_required()).collect();
    assert_eq!(flags, vec![true, false, true]);
    assert_eq!(g.next_to_act(), Some(p(3)));

    g.apply_response(p(3), Action::Fold).unwrap();
    assert_eq!(g.next_to_act(), Some(p(1)));
    // folded seats are never re-opened
    g.apply_response(p(1), Action::raise_to(9, 5)).unwrap();
    assert!(!g.players()[2].action_required());
    assert!(g.players()[1].action_required());
}

#[test]
fn elimination_ends_the_hand_on_any_street() {
    let mut g = game(3, THREE_WAY);
    let mut script = ScriptedAgent::new([
        Intent::Call,
        Intent::Check,
        Intent::Call,
        // flop
        Intent::Fold,
        Intent::RaiseTo(4),
        Intent::Fold,
    ]);
    let outcome = g.play_hand(&mut script).unwrap();
    assert_eq!(outcome, HandOutcome::Uncontested { winner: p(2), pot: 10 });
    assert_eq!(g.street(), Street::Flop);
    assert_eq!(g.community().len(), 3);
    assert!(matches!(g.history().last(), Some(GameEvent::Eliminated { winner, pot: 10 }) if *winner == p(2)));
    assert_eq!(g.advance_street(), Err(GameError::Action(ActionError::HandFinished)));
}

#[test]
fn illegal_script_exhausts_retry_policy() {
    let cfg = TableConfig::default().with_players(2).with_max_prompt_attempts(3);
    let mut g = Game::with_dealer(cfg, Deck::stacked(parse_cards(HEADS_UP).unwrap())).unwrap();
    let mut script = ScriptedAgent::new([Intent::Check; 3]);
    let err = g.play_hand(&mut script).unwrap_err();
    assert_eq!(err, GameError::TooManyIllegalActions { player: p(1), attempts: 3 });
    assert_eq!(g.pot(), 3);
    assert!(!g.history().iter().any(|e| matches!(e, GameEvent::ActionApplied { .. })));
}

#[test]
fn observers_see_every_event_once() {
    let mut g = game(2, HEADS_UP);
    let mut script = ScriptedAgent::new([Intent::Fold]);
    g.play_hand(&mut script).unwrap();
    assert_eq!(script.events(), g.history());
}

proptest! {
    #[test]
    fn pot_is_blinds_plus_applied_increments(
        seed in any::<u64>(),
        moves in prop::collection::vec((0u8..4, 1u64..20), 1..40),
    ) {
        let cfg = TableConfig::default().with_players(4).with_seed(seed);
        let mut g = Game::new(cfg).unwrap();
        let mut expected = g.pot();
        prop_assert_eq!(expected, 3);
        for (kind, bump) in moves {
            let Some(id) = g.next_to_act() else { break };
            let bid = g.player(id).unwrap().bid();
            let outstanding = g.outstanding_bid();
            let action = match kind {
                0 => Action::Fold,
                1 | 2 if bid == outstanding => Action::Check,
                1 | 2 => Action::call(bid, outstanding),
                _ => Action::raise_to(outstanding + bump, outstanding),
            };
            g.apply_response(id, action).unwrap();
            expected += action.pot_increment();
            prop_assert_eq!(g.pot(), expected);
            if let Action::Raise { amount, .. } = action {
                for pl in g.players().iter().filter(|pl| pl.in_hand()) {
                    prop_assert_eq!(pl.action_required(), pl.id() != id);
                }
                prop_assert_eq!(g.outstanding_bid(), amount);
            }
            for pl in g.players().iter().filter(|pl| pl.in_hand() && !pl.action_required()) {
                prop_assert_eq!(pl.bid(), g.outstanding_bid());
            }
        }
    }
}
