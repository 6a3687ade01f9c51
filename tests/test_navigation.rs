use crossterm::event::Event;
use rat_mask_input::event::TextOutcome;
use rat_mask_input::masked_input::{handle_mouse_events, MaskedInputState};
use rat_mask_input::{Direction, SelectionDirection};

fn setup_logging() -> Result<(), anyhow::Error> {
    _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message)) //
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply();
    Ok(())
}

fn phone() -> MaskedInputState {
    let mut s = MaskedInputState::new().with_mask("(___) ___");
    s.set_value("5551");
    assert_eq!(s.masked_value(), "(555) 1  ");
    s
}

#[test]
fn test_arrows() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = phone();
    assert!(s.move_to_start(false));
    assert_eq!(s.selection(), 1..1);

    assert!(s.move_right(false));
    assert_eq!(s.selection(), 2..2);
    assert!(s.move_right(false));
    assert!(s.move_right(false));
    assert_eq!(s.selection(), 4..4);
    // jumps the literals
    assert!(s.move_right(false));
    assert_eq!(s.selection(), 7..7);
    // no value behind
    assert!(!s.move_right(false));
    assert_eq!(s.selection(), 7..7);

    assert!(s.move_left(false));
    assert_eq!(s.selection(), 6..6);
    assert!(s.move_left(false));
    assert_eq!(s.selection(), 3..3);
    Ok(())
}

#[test]
fn test_extend_forward() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = phone();
    s.set_cursor(3);
    assert!(s.move_right(true));
    assert_eq!(s.selection(), 3..4);
    assert_eq!(s.selection_direction(), SelectionDirection::Forward);
    assert!(s.move_right(true));
    assert_eq!(s.selection(), 3..7);
    assert_eq!(s.drag_data(), "51");

    assert!(s.move_left(false));
    assert_eq!(s.selection(), 3..3);
    Ok(())
}

#[test]
fn test_extend_backward() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = phone();
    s.set_cursor(3);
    assert!(s.move_left(true));
    assert_eq!(s.selection(), 2..3);
    assert_eq!(s.selection_direction(), SelectionDirection::Backward);
    assert!(s.move_left(true));
    assert_eq!(s.selection(), 1..3);
    assert_eq!(s.drag_data(), "55");

    // shrinks from the left
    assert!(s.move_right(true));
    assert_eq!(s.selection(), 2..3);
    assert_eq!(s.selection_direction(), SelectionDirection::Backward);
    Ok(())
}

#[test]
fn test_home_end() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = phone();
    s.set_cursor(1);
    assert!(s.move_to_end(true));
    assert_eq!(s.selection(), 1..7);
    assert_eq!(s.drag_data(), "5551");

    assert!(s.move_to_end(false));
    assert_eq!(s.selection(), 7..7);
    assert!(s.move_to_start(false));
    assert_eq!(s.selection(), 1..1);

    assert!(s.select_all());
    assert_eq!(s.selection(), 0..9);
    assert_eq!(s.drag_data(), "5551");
    Ok(())
}

#[test]
fn test_words() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new();
    s.set_value("foo bar");
    assert!(!s.move_to_start(false));
    assert_eq!(s.selection(), 0..0);

    assert!(s.move_to_next_word(false));
    assert_eq!(s.selection(), 3..3);
    assert!(s.move_to_next_word(false));
    assert_eq!(s.selection(), 7..7);
    assert!(!s.move_to_next_word(false));

    assert!(s.move_to_prev_word(false));
    assert_eq!(s.selection(), 4..4);
    assert!(s.move_to_prev_word(false));
    assert_eq!(s.selection(), 0..0);
    assert!(!s.move_to_prev_word(false));

    assert!(s.move_to_next_word(true));
    assert_eq!(s.selection(), 0..3);
    assert_eq!(s.drag_data(), "foo");
    Ok(())
}

#[test]
fn test_nearest_edge() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("(___) ___");
    s.set_value("555");
    assert_eq!(s.masked_value(), "(555)    ");

    s.set_cursor(9);
    assert!(s.set_cursor_to_nearest_edge());
    assert_eq!(s.selection(), 6..6);

    s.set_cursor(0);
    assert_eq!(
        handle_mouse_events(&mut s, &Event::FocusGained),
        TextOutcome::Changed
    );
    assert_eq!(s.selection(), 1..1);

    // a selection with value chars is left alone
    s.set_selection(1, 3, SelectionDirection::Forward);
    assert!(!s.set_cursor_to_nearest_edge());
    assert_eq!(s.selection(), 1..3);
    Ok(())
}

#[test]
fn test_rtl() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("___-__");
    s.value.set_direction(Some(Direction::RightToLeft));
    s.set_value("123");
    assert_eq!(s.masked_value(), "  1-23");

    assert!(s.move_to_end(false));
    assert_eq!(s.selection(), 6..6);
    assert!(s.move_left(false));
    assert_eq!(s.selection(), 5..5);
    assert!(s.move_to_start(false));
    assert_eq!(s.selection(), 2..2);
    assert!(!s.move_left(false));

    assert!(s.move_to_end(false));
    assert!(s.insert_str("4"));
    assert_eq!(s.masked_value(), " 12-34");
    assert_eq!(s.selection(), 6..6);
    Ok(())
}
