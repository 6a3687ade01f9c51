use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rat_mask_input::clipboard::{Clipboard, LocalClipboard};
use rat_mask_input::event::TextOutcome;
use rat_mask_input::masked_input::{
    handle_events, handle_readonly_events, InputEvent, InputKind, MaskedInputState,
};
use rat_mask_input::{InputType, SelectionDirection, TextError};

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

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn code(c: KeyCode) -> Event {
    Event::Key(KeyEvent::new(c, KeyModifiers::NONE))
}

fn with_clipboard(mask: &str) -> (MaskedInputState, LocalClipboard) {
    let clip = LocalClipboard::new();
    let mut s = MaskedInputState::new().with_mask(mask);
    s.set_clipboard(Some(clip.clone()));
    (s, clip)
}

#[test]
fn test_input_kind() {
    assert_eq!(
        "deleteWordBackward".parse::<InputKind>(),
        Ok(InputKind::DeleteWordBackward)
    );
    assert_eq!(
        "historyUndo".parse::<InputKind>(),
        Ok(InputKind::FormatOrHistory("historyUndo".into()))
    );
    assert!(matches!(
        "insertLink".parse::<InputKind>(),
        Err(TextError::NotSupported(_))
    ));
    assert_eq!(InputKind::InsertFromPaste.to_string(), "insertFromPaste");
}

#[test]
fn test_intents() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("___-__");
    assert_eq!(
        s.handle_input(InputEvent::new(InputKind::InsertText)),
        Err(TextError::InvalidArgument("insert without data"))
    );
    assert!(!s.handle_input(InputEvent::new(InputKind::FormatOrHistory(
        "historyUndo".into()
    )))?);
    assert!(!s.has_notifications());

    assert!(s.handle_input(InputEvent::with_data(InputKind::InsertFromPaste, "12345"))?);
    assert_eq!(s.masked_value(), "123-45");
    assert!(s.handle_input(InputEvent::new(InputKind::DeleteContentBackward))?);

    let echo = s.drain_notifications();
    assert_eq!(echo.len(), 2);
    assert_eq!(echo[0].kind, InputKind::InsertFromPaste);
    assert_eq!(echo[0].data.as_deref(), Some("12345"));
    assert_eq!(echo[1].kind, InputKind::DeleteContentBackward);
    assert!(!s.has_notifications());

    s.input(InputKind::DeleteContentBackward, None);
    s.suppress_notifications();
    assert!(s.drain_notifications().is_empty());
    Ok(())
}

#[test]
fn test_suppress_last_intent() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("___-__");
    assert!(s.input(InputKind::InsertText, Some("12".into())));
    assert!(s.input(InputKind::InsertText, Some("3".into())));
    s.suppress_notifications();
    // nothing left to suppress
    s.suppress_notifications();

    let echo = s.drain_notifications();
    assert_eq!(echo.len(), 1);
    assert_eq!(echo[0], InputEvent::with_data(InputKind::InsertText, "12"));

    // a rejected intent has no echo to drop
    assert!(s.input(InputKind::DeleteContentBackward, None));
    assert!(!s.input(InputKind::InsertText, None));
    s.suppress_notifications();
    assert_eq!(s.drain_notifications().len(), 1);
    Ok(())
}

#[test]
fn test_composition() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("___");
    let composing = InputEvent::with_data(InputKind::InsertCompositionText, "k").composing(true);
    assert!(!s.handle_input(composing)?);
    assert_eq!(s.value(), "");
    assert!(!s.has_notifications());

    assert!(s.finish_composition("か")?);
    assert_eq!(s.value(), "か");
    assert_eq!(s.masked_value(), "か  ");
    assert_eq!(s.drain_notifications().len(), 1);
    Ok(())
}

#[test]
fn test_value_attribute() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("___");
    assert!(s.set_value_attribute("12"));
    assert_eq!(s.value(), "12");

    s.move_to_end(false);
    s.input(InputKind::InsertText, Some("3".into()));
    assert!(!s.set_value_attribute("45"));
    assert_eq!(s.value(), "123");
    Ok(())
}

#[test]
fn test_autofill() -> Result<(), anyhow::Error> {
    use rat_mask_input::field::TextField;

    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("(___) ___");
    s.value.field_mut().set_display_value("555123");
    assert!(s.accept_host_value());
    assert_eq!(s.value(), "555123");
    assert_eq!(s.value.field().display_value(), "(555) 123");

    // nothing new, the display is restored anyway
    s.value.field_mut().set_display_value("555123");
    assert!(!s.accept_host_value());
    assert_eq!(s.value.field().display_value(), "(555) 123");
    Ok(())
}

#[test]
fn test_clipboard() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let (mut s, clip) = with_clipboard("___-__");
    s.set_value("12345");
    s.set_selection(2, 5, SelectionDirection::Forward);
    assert!(s.try_copy_to_clip()?);
    assert_eq!(clip.get_string()?, "34");

    assert!(s.cut_to_clip());
    assert_eq!(s.value(), "125");
    assert_eq!(s.selection(), 2..2);

    clip.set_string("xy")?;
    assert!(s.paste_from_clip());
    assert_eq!(s.value(), "12xy5");
    assert_eq!(s.masked_value(), "12x-y5");

    clip.set_string("")?;
    assert!(!s.paste_from_clip());
    Ok(())
}

#[test]
fn test_password_copy() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let (mut s, clip) = with_clipboard("____");
    s.value.set_input_type(InputType::Password);
    s.set_value("abc");
    s.select_all();
    clip.set_string("old")?;

    assert_eq!(s.try_copy_to_clip(), Err(TextError::Clipboard));
    assert!(!s.cut_to_clip());
    assert_eq!(s.value(), "abc");
    assert_eq!(clip.get_string()?, "old");
    Ok(())
}

#[test]
fn test_keys() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("___-__");
    assert_eq!(handle_events(&mut s, true, &key('1')), TextOutcome::TextChanged);
    assert_eq!(handle_events(&mut s, true, &key('2')), TextOutcome::TextChanged);
    assert_eq!(s.masked_value(), "12 -  ");

    let release = Event::Key(KeyEvent::new_with_kind(
        KeyCode::Char('3'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert_eq!(handle_events(&mut s, true, &release), TextOutcome::Unchanged);
    assert_eq!(handle_events(&mut s, false, &key('3')), TextOutcome::Continue);
    assert_eq!(s.value(), "12");

    assert_eq!(
        handle_events(&mut s, true, &code(KeyCode::Backspace)),
        TextOutcome::TextChanged
    );
    assert_eq!(
        handle_events(&mut s, true, &code(KeyCode::Backspace)),
        TextOutcome::TextChanged
    );
    assert_eq!(
        handle_events(&mut s, true, &code(KeyCode::Backspace)),
        TextOutcome::Unchanged
    );
    assert_eq!(s.value(), "");

    let echo = s.drain_notifications();
    assert_eq!(echo.len(), 5);
    assert_eq!(echo[0], InputEvent::with_data(InputKind::InsertText, "1"));
    Ok(())
}

#[test]
fn test_edit_keys() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let (mut s, clip) = with_clipboard("___-__");
    s.set_value("12345");
    s.set_cursor(2);

    assert_eq!(handle_events(&mut s, true, &ctrl('t')), TextOutcome::TextChanged);
    assert_eq!(s.value(), "13245");
    assert_eq!(s.selection(), 3..3);
    assert_eq!(handle_events(&mut s, true, &ctrl('k')), TextOutcome::TextChanged);
    assert_eq!(s.value(), "132");
    assert_eq!(handle_events(&mut s, true, &ctrl('u')), TextOutcome::TextChanged);
    assert_eq!(s.value(), "");

    clip.set_string("987")?;
    assert_eq!(handle_events(&mut s, true, &ctrl('v')), TextOutcome::TextChanged);
    assert_eq!(s.value(), "987");
    assert_eq!(
        handle_events(&mut s, true, &Event::Paste("65".into())),
        TextOutcome::TextChanged
    );
    assert_eq!(s.masked_value(), "987-65");

    assert_eq!(handle_events(&mut s, true, &ctrl('a')), TextOutcome::Changed);
    assert_eq!(handle_events(&mut s, true, &ctrl('c')), TextOutcome::Changed);
    assert_eq!(clip.get_string()?, "98765");
    assert_eq!(handle_events(&mut s, true, &ctrl('x')), TextOutcome::TextChanged);
    assert_eq!(s.value(), "");
    Ok(())
}

#[test]
fn test_readonly_keys() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut s = MaskedInputState::new().with_mask("___");
    s.set_value("abc");
    s.set_cursor(0);

    assert_eq!(
        handle_readonly_events(&mut s, true, &key('x')),
        TextOutcome::Continue
    );
    assert_eq!(
        handle_readonly_events(&mut s, true, &code(KeyCode::End)),
        TextOutcome::Changed
    );
    assert_eq!(s.selection(), 3..3);
    assert_eq!(
        handle_readonly_events(&mut s, true, &code(KeyCode::Left)),
        TextOutcome::Changed
    );
    assert_eq!(s.selection(), 2..2);
    assert_eq!(
        handle_readonly_events(
            &mut s,
            true,
            &Event::Key(KeyEvent::new(KeyCode::Home, KeyModifiers::SHIFT))
        ),
        TextOutcome::Changed
    );
    assert_eq!(s.selection(), 0..2);
    assert_eq!(s.value(), "abc");
    Ok(())
}
