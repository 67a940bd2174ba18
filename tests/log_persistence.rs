use chat_surface::{Message, Sender, TranscriptLog};

#[test]
fn serialization_round_trip_reproduces_rendered_markup() {
    let mut log = TranscriptLog::new();
    log.push(&Message::plain(Sender::User, "me ensine sobre **grafos**"));
    log.push(&Message::plain(Sender::Assistant, "Claro!\nVamos comecar."));
    log.push(&Message::trusted_markup(
        Sender::Assistant,
        "<b>Plano</b><br><pre>etapa 1</pre>",
    ));
    let saved = log.serialized();

    let mut reloaded = TranscriptLog::new();
    reloaded.restore(&saved);

    assert_eq!(reloaded.serialized(), saved);
}

#[test]
fn placeholders_never_reach_the_persisted_transcript() {
    let mut log = TranscriptLog::new();
    log.push(&Message::plain(Sender::User, "primeira"));
    let first = log.begin_loading();
    log.push(&Message::plain(Sender::Assistant, "resposta"));
    let second = log.begin_loading();
    log.end_loading(first);

    let saved = log.serialized();
    assert!(!saved.contains("loading-spinner"));
    assert!(saved.contains("primeira"));
    assert!(saved.contains("resposta"));

    // The second spinner is still on screen, just never persisted.
    assert!(log.is_thinking());
    log.end_loading(second);
    assert_eq!(log.serialized(), saved);
}

#[test]
fn interleaved_placeholder_churn_leaves_persistence_stable() {
    let mut log = TranscriptLog::new();
    for turn in 0..4 {
        let handle = log.begin_loading();
        log.push(&Message::plain(Sender::Assistant, format!("turno {turn}")));
        log.end_loading(handle);
    }

    let saved = log.serialized();
    assert!(!saved.contains("loading-spinner"));
    assert_eq!(saved.matches("turno").count(), 4);
}
