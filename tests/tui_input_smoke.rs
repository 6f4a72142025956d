use crossterm::event::KeyCode;
use holdem_round::agents::Action;
use holdem_round::cards::parse_cards;
use holdem_round::config::TableConfig;
use holdem_round::deck::Deck;
use holdem_round::game::{Game, PlayerId};
use holdem_round::tui::app::{AppState, InputAction, PromptResult};
use holdem_round::tui::controller::map_key;

fn table() -> (Game, AppState) {
    let cards = parse_cards("As Ah Kc Kd 2s 7h 8d 9c 3s Jd 4s Qh").unwrap();
    let game =
        Game::with_dealer(TableConfig::default().with_players(2), Deck::stacked(cards)).unwrap();
    let mut app = AppState::new(PlayerId::new(1));
    for event in game.history() {
        app.apply_event(event);
    }
    (game, app)
}

fn press(app: &mut AppState, code: KeyCode) -> Option<PromptResult> {
    let input = map_key(code, app.amount_entry_active())?;
    app.handle_input(input)
}

#[test]
fn table_mirrors_the_engine() {
    let (game, app) = table();
    assert_eq!(app.seats().len(), 2);
    assert_eq!(app.pot(), game.pot());
    assert_eq!(app.outstanding_bid(), 2);
    assert_eq!(app.seats()[0].bid, 1);
    assert_eq!(app.seats()[1].bid, 2);
    assert!(app.hole().is_none(), "hole cards arrive with the first prompt");
}

#[test]
fn help_and_history_toggle() {
    let (_, mut app) = table();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.help_open());
    press(&mut app, KeyCode::Char('h'));
    assert!(!app.help_open());
    assert!(app.history_open());
    press(&mut app, KeyCode::Char('H'));
    assert!(!app.history_open());
}

#[test]
fn keyboard_call_is_applied_by_the_engine() {
    let (mut game, mut app) = table();
    let p1 = PlayerId::new(1);
    let view = game.view(p1).unwrap();
    app.begin_prompt(&view, game.outstanding_bid());
    assert_eq!(app.hole(), Some(game.players()[0].hole()));

    assert_eq!(press(&mut app, KeyCode::Char('k')), None);
    assert_eq!(app.message(), Some(AppState::ILLEGAL_ACTION));
    let Some(PromptResult::Act(action)) = press(&mut app, KeyCode::Char('c')) else {
        panic!("call should be accepted");
    };
    assert_eq!(action, Action::Call { pot_increment: 1 });

    let before = game.history().len();
    game.apply_response(p1, action).unwrap();
    for event in &game.history()[before..] {
        app.apply_event(event);
    }
    assert_eq!(app.pot(), 4);
    assert_eq!(app.seats()[0].last_action.as_deref(), Some("Call (+1)"));
}

#[test]
fn amount_entry_edit_submit_and_cancel() {
    let (game, mut app) = table();
    let view = game.view(PlayerId::new(2)).unwrap();
    app.begin_prompt(&view, game.outstanding_bid());

    press(&mut app, KeyCode::Char('r'));
    assert!(app.amount_entry_active());
    assert_eq!(app.amount_entry_text(), Some("3"));
    // letters are ignored while typing an amount
    assert_eq!(press(&mut app, KeyCode::Char('f')), None);
    press(&mut app, KeyCode::Char('5'));
    assert_eq!(app.amount_entry_text(), Some("35"));
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Esc);
    assert!(!app.amount_entry_active());
    assert!(app.awaiting_input());

    press(&mut app, KeyCode::Char('R'));
    press(&mut app, KeyCode::Char('0'));
    assert_eq!(
        press(&mut app, KeyCode::Enter),
        Some(PromptResult::Act(Action::Raise { amount: 30, pot_increment: 28 }))
    );
    assert!(!app.awaiting_input());
}

#[test]
fn quit_is_reported_from_any_state() {
    let (_, mut app) = table();
    assert_eq!(press(&mut app, KeyCode::Char('q')), Some(PromptResult::Quit));
}
