use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyEventState;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use tui_textarea::Key;

use super::EventsService;
use crate::domain::models::Event;

fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
    return CrosstermEvent::Key(KeyEvent::new(code, modifiers));
}

#[test]
fn it_maps_control_keys() {
    let res = EventsService::handle_crossterm(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(matches!(res, Some(Event::KeyboardCTRLC())));

    let res = EventsService::handle_crossterm(key(KeyCode::Char('d'), KeyModifiers::CONTROL));
    assert!(matches!(res, Some(Event::UIScrollPageDown())));

    let res = EventsService::handle_crossterm(key(KeyCode::Char('u'), KeyModifiers::CONTROL));
    assert!(matches!(res, Some(Event::UIScrollPageUp())));
}

#[test]
fn it_maps_enter_and_arrows() {
    let res = EventsService::handle_crossterm(key(KeyCode::Enter, KeyModifiers::NONE));
    assert!(matches!(res, Some(Event::KeyboardEnter())));

    let res = EventsService::handle_crossterm(key(KeyCode::Up, KeyModifiers::NONE));
    assert!(matches!(res, Some(Event::UIScrollUp())));

    let res = EventsService::handle_crossterm(key(KeyCode::Down, KeyModifiers::NONE));
    assert!(matches!(res, Some(Event::UIScrollDown())));
}

#[test]
fn it_passes_characters_through() {
    let res = EventsService::handle_crossterm(key(KeyCode::Char('v'), KeyModifiers::NONE));
    match res {
        Some(Event::KeyboardCharInput(input)) => {
            assert!(matches!(input.key, Key::Char('v')));
            assert!(!input.ctrl);
        }
        _ => panic!("expected a character input"),
    }
}

#[test]
fn it_ignores_key_releases() {
    let release = CrosstermEvent::Key(KeyEvent {
        code: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    });

    assert!(EventsService::handle_crossterm(release).is_none());
}

#[test]
fn it_maps_paste_and_mouse_wheel() {
    let res = EventsService::handle_crossterm(CrosstermEvent::Paste("hello".to_string()));
    assert!(matches!(res, Some(Event::KeyboardPaste(text)) if text == "hello"));

    let wheel = CrosstermEvent::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    });
    assert!(matches!(
        EventsService::handle_crossterm(wheel),
        Some(Event::UIScrollDown())
    ));
}
