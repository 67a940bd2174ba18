use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;

use chat_store::{store_root, ChatStore};
use coach_app::app::{App, Mode};
use coach_app::backends;
use coach_app::bootstrap::{bootstrap, BootstrapOutcome};
use coach_app::cli::{parse_cli_line, CliCommand, HELP_TEXT};
use coach_app::commands::UiEvent;
use coach_app::runtime::{RequestController, WidgetHost};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cwd = std::env::current_dir()?;
    let store = ChatStore::open(&store_root(&cwd)).map_err(io::Error::other)?;
    let backend = backends::backend_from_env().map_err(io::Error::other)?;

    let (completions, completion_events) = mpsc::channel();
    let controller = RequestController::new(backend, completions);
    let mut host = WidgetHost::new(controller, store.clone());
    let mut app = App::new();
    let mut printed = 0usize;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    match bootstrap(&mut app, &store, &mut host).map_err(io::Error::other)? {
        BootstrapOutcome::ResumedStudyFlow => {}
        BootstrapOutcome::PromptContinueOrFresh { transcript } => {
            println!("Continuar a conversa anterior? [s/n]");
            let choice = read_line(&mut lines)?.unwrap_or_default();
            if choice.trim().eq_ignore_ascii_case("s") {
                app.restore_transcript(&transcript);
            } else {
                app.dispatch(UiEvent::NewChat, &mut host);
            }
        }
        BootstrapOutcome::FreshWelcome => {}
    }
    print_new_nodes(&app, &mut printed);

    loop {
        if app.mode() == Mode::AwaitingTopicSelection {
            println!("Escolha um foco de interesse (ou digite o seu):");
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = read_line(&mut lines)? else {
            break;
        };

        match parse_cli_line(&line) {
            CliCommand::Quit => break,
            CliCommand::Help => println!("{HELP_TEXT}"),
            CliCommand::Invalid(message) => println!("{message}"),
            CliCommand::Submit(text) => app.dispatch(UiEvent::SubmitText(text), &mut host),
            CliCommand::NewChat => app.dispatch(UiEvent::NewChat, &mut host),
            CliCommand::FindJobs(filters) => {
                app.dispatch(UiEvent::FindJobs(filters), &mut host);
            }
            CliCommand::MatchJobs { cargo } => {
                app.dispatch(UiEvent::MatchJobs { cargo }, &mut host);
            }
            CliCommand::UploadCv(path) => {
                if let Some((file_name, bytes)) = read_attachment(&path) {
                    app.dispatch(UiEvent::AttachResume { file_name, bytes }, &mut host);
                }
            }
            CliCommand::StudyPdf(path) => {
                if let Some((file_name, bytes)) = read_attachment(&path) {
                    app.dispatch(UiEvent::AttachStudyPdf { file_name, bytes }, &mut host);
                }
            }
            CliCommand::JobAction { index, kind } => {
                match app.jobs().id_at(index - 1).map(str::to_string) {
                    Some(job_id) => {
                        app.dispatch(UiEvent::JobAction { job_id, kind }, &mut host);
                    }
                    None => println!("Vaga {index} não encontrada."),
                }
            }
        }

        while app.has_pending_requests() {
            match completion_events.recv() {
                Ok(event) => app.on_request_finished(event.request_id, event.result, &mut host),
                Err(_) => break,
            }
        }

        let _ = host.take_render_request();
        print_new_nodes(&app, &mut printed);
    }

    Ok(())
}

fn read_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Option<String>> {
    lines.next().transpose()
}

fn read_attachment(path: &Path) -> Option<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    match std::fs::read(path) {
        Ok(bytes) => Some((file_name, bytes)),
        Err(error) => {
            println!("Não foi possível ler {}: {error}", path.display());
            None
        }
    }
}

fn print_new_nodes(app: &App, printed: &mut usize) {
    let nodes: Vec<&str> = app.transcript().markup_nodes().collect();
    if nodes.len() < *printed {
        // Transcript was cleared or restored; reprint from the top.
        *printed = 0;
    }
    for markup in nodes.iter().skip(*printed) {
        println!("{markup}");
    }
    *printed = nodes.len();
}
