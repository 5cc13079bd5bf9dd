//! Line-oriented interactive driver for a CoThink session
//!
//! Presentation glue only: renders the snapshots the core emits and feeds
//! user commands back in. A prompt line starts a generation attempt; while
//! streaming, any input line toggles pause, which takes effect at the next
//! chunk.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use futures::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use cothink_core::{
    ConfigHandle, ControlAction, EntryKind, LabelUpdate, Locale, LlmClient, PlaybackController,
    PlaybackHandle, Snapshot, StatusKind, StreamSession, UiState, locale, transcript,
};

pub async fn run(client: Arc<dyn LlmClient>, config: ConfigHandle) -> Result<()> {
    let mut session = StreamSession::new(client, config.clone());
    let playback = PlaybackController::new().into_shared();

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut prompt = String::new();
    let mut draft = String::new();

    greet(&config);
    println!("(/help lists commands)");
    print_ready(&config);

    while let Some(line) = line_rx.recv().await {
        let input = line.trim().to_string();
        match input.as_str() {
            "" => {}
            "/quit" | "/exit" => break,
            "/help" => print_help(),
            "/new" => {
                session.reset();
                let outcome = playback.lock().reset();
                prompt = outcome.prompt_text;
                draft = outcome.editor_text;
                greet(&config);
            }
            "/raw" => {
                let show = {
                    let mut config = config.lock();
                    let show = !config.show_full_output();
                    config.set_show_full_output(show);
                    show
                };
                println!("(full output view: {})", if show { "on" } else { "off" });
            }
            "/edit" => {
                draft = read_block(&mut line_rx).await;
                println!("(draft replaced: {} chars)", draft.len());
            }
            "/transcript" => render_transcript(&session, &config),
            "/resume" => {
                if prompt.is_empty() {
                    println!("(nothing to resume; enter a task first)");
                } else {
                    let outcome =
                        run_attempt(&mut session, &playback, &config, &mut line_rx, &prompt, &draft)
                            .await;
                    draft = outcome;
                }
            }
            _ if input.starts_with("/lang") => {
                match input.strip_prefix("/lang").map(str::trim).and_then(Locale::parse) {
                    Some(locale) => {
                        config.lock().set_locale(locale);
                        let ui = playback.lock().ui_state();
                        render_ui_state(locale, &ui);
                    }
                    None => println!("usage: /lang en|zh"),
                }
            }
            _ if input.starts_with('/') => println!("unknown command: {input} (try /help)"),
            _ => {
                // a fresh task begins a fresh round; the paused or finished
                // one stays in the transcript
                if !session.current_round().raw.is_empty() {
                    session.start_round();
                    draft.clear();
                }
                prompt = input.clone();
                let outcome =
                    run_attempt(&mut session, &playback, &config, &mut line_rx, &prompt, &draft)
                        .await;
                draft = outcome;
            }
        }
        print_ready(&config);
    }

    Ok(())
}

async fn run_attempt(
    session: &mut StreamSession,
    playback: &PlaybackHandle,
    config: &ConfigHandle,
    line_rx: &mut mpsc::UnboundedReceiver<String>,
    prompt: &str,
    draft: &str,
) -> String {
    let locale = config.lock().locale();
    let ui = playback.lock().toggle();
    render_ui_state(locale, &ui);

    if !draft.is_empty() {
        print!("{}", draft.dimmed());
        let _ = std::io::stdout().flush();
    }

    let mut editor_text = draft.to_string();
    let mut view = StreamView::new(draft);

    {
        let mut snapshots = Box::pin(session.generate(
            prompt.to_string(),
            draft.to_string(),
            playback.clone(),
        ));
        let mut stdin_open = true;

        loop {
            tokio::select! {
                line = line_rx.recv(), if stdin_open => {
                    match line {
                        Some(_) => {
                            let ui = playback.lock().toggle();
                            render_ui_state(locale, &ui);
                        }
                        None => stdin_open = false,
                    }
                }
                snapshot = snapshots.next() => {
                    let Some(snapshot) = snapshot else { break };
                    view.render(&snapshot, locale);
                    editor_text = snapshot.editor_text;
                }
            }
        }
    }

    println!();
    let ui = playback.lock().ui_state();
    render_ui_state(locale, &ui);
    editor_text
}

/// Incremental printer: dims the reasoning draft, streams the answer at
/// full brightness, announces status changes once.
struct StreamView {
    shown_editor: String,
    shown_answer: String,
    last_kind: Option<StatusKind>,
}

impl StreamView {
    fn new(draft: &str) -> Self {
        Self {
            shown_editor: draft.to_string(),
            shown_answer: String::new(),
            last_kind: None,
        }
    }

    fn render(&mut self, snapshot: &Snapshot, locale: Locale) {
        if self.last_kind != Some(snapshot.status.kind) {
            self.last_kind = Some(snapshot.status.kind);
            let text = locale::status_text(locale, &snapshot.status);
            println!("\n[{}]", text.bold());
        }

        if let Some(delta) = snapshot.editor_text.strip_prefix(self.shown_editor.as_str()) {
            if !delta.is_empty() {
                print!("{}", delta.dimmed());
            }
        } else {
            // the draft view was rewritten (e.g. /raw toggled); reprint
            println!();
            print!("{}", snapshot.editor_text.dimmed());
        }
        self.shown_editor = snapshot.editor_text.clone();

        if let Some(entry) = snapshot.transcript.last()
            && entry.kind == EntryKind::Answer
        {
            if let Some(delta) = entry.content.strip_prefix(self.shown_answer.as_str()) {
                if !delta.is_empty() {
                    print!("{delta}");
                }
            } else {
                print!("{}", entry.content);
            }
            self.shown_answer = entry.content.clone();
        }

        let _ = std::io::stdout().flush();
    }
}

fn render_ui_state(locale: Locale, ui: &UiState) {
    let labels = locale::labels(locale);
    match ui.editor_label {
        LabelUpdate::Set(kind) => {
            let control = match ui.control {
                ControlAction::Pause => labels.pause,
                ControlAction::Generate => labels.generate,
            };
            println!(
                "\n[{}] {} - {}",
                control.bold(),
                labels.editor,
                locale::status_label(locale, kind)
            );
        }
        LabelUpdate::Keep => {}
    }
}

fn render_transcript(session: &StreamSession, config: &ConfigHandle) {
    let locale = config.lock().locale();
    let labels = locale::labels(locale);
    for entry in transcript::flatten(session.rounds()) {
        match entry.kind {
            EntryKind::User => println!("{} {}", ">".bold(), entry.content.bold()),
            EntryKind::Reasoning => {
                println!("{}", labels.reasoning_section.underline());
                println!("{}", entry.content.dimmed());
            }
            EntryKind::Answer => println!("{}", entry.content),
            EntryKind::Error => {
                println!("{} {}", labels.error_section.red(), entry.content.red());
            }
        }
    }
}

async fn read_block(line_rx: &mut mpsc::UnboundedReceiver<String>) -> String {
    println!("(enter draft lines; end with a single '.')");
    let mut lines = Vec::new();
    while let Some(line) = line_rx.recv().await {
        if line.trim() == "." {
            break;
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn greet(config: &ConfigHandle) {
    println!("{}", locale::labels(config.lock().locale()).greeting);
}

fn print_ready(config: &ConfigHandle) {
    let labels = locale::labels(config.lock().locale());
    print!("{} > ", labels.prompt);
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("  <text>       start a generation round with this task");
    println!("  <enter line> while streaming: toggle pause");
    println!("  /resume      continue generating from the current draft");
    println!("  /edit        replace the draft (end with a single '.')");
    println!("  /raw         toggle full raw output in the draft view");
    println!("  /lang en|zh  switch display language");
    println!("  /transcript  show the conversation so far");
    println!("  /new         start a new conversation");
    println!("  /quit        exit");
}
