use anyhow::Result;
use bbot_core::{ChatConfig, ChatSession, LogEntry, LogKind, TurnOutcome};
use crossterm::style::Stylize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::commands::{handle_command, CommandResult};
use crate::theme::Theme;

fn print_entry(entry: &LogEntry, theme: &Theme) {
    let label = format!("{}:", entry.kind.label())
        .with(theme.color_for(entry.kind))
        .bold();
    println!("{label} {}", entry.text);
}

fn print_info(theme: &Theme, text: &str) {
    println!("{}", text.with(theme.muted));
}

fn print_error(theme: &Theme, err: impl std::fmt::Display) {
    print_entry(&LogEntry::new(LogKind::Error, err.to_string()), theme);
}

fn print_last_entry(session: &ChatSession, theme: &Theme) {
    if let Some(entry) = session.log().last() {
        print_entry(entry, theme);
    }
}

/// Read one logical input line; a trailing `\` joins the next line.
/// Returns `None` at end of input.
async fn read_input(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    let mut buffer = String::new();
    loop {
        let Some(line) = lines.next_line().await? else {
            return Ok(if buffer.is_empty() { None } else { Some(buffer) });
        };
        match line.strip_suffix('\\') {
            Some(partial) => {
                buffer.push_str(partial);
                buffer.push('\n');
                print!(". ");
                std::io::stdout().flush()?;
            }
            None => {
                buffer.push_str(&line);
                return Ok(Some(buffer));
            }
        }
    }
}

/// Accept either a file name or a 1-based index into the saved list.
fn resolve_saved_name(session: &ChatSession, arg: &str) -> Result<String> {
    if let Ok(index) = arg.parse::<usize>() {
        let saved = session.list_saved()?;
        if let Some(name) = index.checked_sub(1).and_then(|i| saved.get(i)) {
            return Ok(name.clone());
        }
    }
    Ok(arg.to_string())
}

fn list_conversations(session: &ChatSession, theme: &Theme) -> Result<()> {
    let saved = session.list_saved()?;
    if saved.is_empty() {
        print_info(theme, "No saved conversations.");
    } else {
        for (i, name) in saved.iter().enumerate() {
            println!("  {}. {}", (i + 1).to_string().with(theme.accent), name);
        }
    }
    Ok(())
}

fn report_outcome(session: &ChatSession, outcome: TurnOutcome, theme: &Theme) {
    match outcome {
        TurnOutcome::Replied(_) | TurnOutcome::Failed(_) => print_last_entry(session, theme),
        TurnOutcome::Skipped => {}
    }
}

/// Execute one non-chat command. File errors abort only this command.
async fn dispatch(
    command: CommandResult,
    session: &mut ChatSession,
    config: &ChatConfig,
    theme: &Theme,
) -> Result<bool> {
    match command {
        CommandResult::Quit => return Ok(false),
        CommandResult::Message(text) => println!("{text}"),
        CommandResult::NotACommand => {}
        CommandResult::Regenerate => match session.regenerate().await {
            TurnOutcome::Skipped => print_info(theme, "Nothing to regenerate."),
            outcome => report_outcome(session, outcome, theme),
        },
        CommandResult::NewConversation => {
            if let Some(path) = session.new_chat()? {
                print_info(theme, &format!("Saved {}", path.display()));
            }
            print_info(theme, "Started a new conversation.");
        }
        CommandResult::SaveConversation => match session.save()? {
            Some(path) => print_info(theme, &format!("Saved {}", path.display())),
            None => print_info(theme, "Nothing to save."),
        },
        CommandResult::LoadConversation(arg) => {
            let name = resolve_saved_name(session, &arg)?;
            session.load(&name)?;
            print_info(theme, &format!("Loaded {name}"));
            for entry in session.log().entries() {
                print_entry(entry, theme);
            }
        }
        CommandResult::DeleteConversation(arg) => {
            let name = resolve_saved_name(session, &arg)?;
            session.delete(&name)?;
            print_info(theme, &format!("Deleted {name}"));
        }
        CommandResult::ListConversations => list_conversations(session, theme)?,
        CommandResult::ShowLog => {
            if session.log().is_empty() {
                print_info(theme, "Conversation is empty.");
            }
            for entry in session.log().entries() {
                print_entry(entry, theme);
            }
        }
        CommandResult::ListModels => {
            for model in config.provider().known_models() {
                let marker = if *model == config.model() { "*" } else { " " };
                println!(" {marker} {model}");
            }
        }
        CommandResult::ShowStatus => {
            println!("Provider:      {}", config.provider());
            println!("Model:         {}", session.model());
            println!("History dir:   {}", session.store().base_dir().display());
            println!("Messages:      {}", session.conversation().len());
        }
    }
    Ok(true)
}

/// Interactive chat loop on stdin/stdout.
pub async fn run_repl(config: &ChatConfig, theme: &Theme) -> Result<()> {
    let mut session = ChatSession::from_config(config)?;

    println!(
        "{} {} / {}. Type /help for commands.",
        "BBot".with(theme.accent).bold(),
        config.provider(),
        config.model()
    );
    list_conversations(&session, theme)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".with(theme.user_color));
        std::io::stdout().flush()?;

        let Some(input) = read_input(&mut lines).await? else {
            println!();
            break;
        };

        match handle_command(input.trim()) {
            CommandResult::NotACommand => {
                let outcome = session.send(&input).await;
                report_outcome(&session, outcome, theme);
            }
            command => match dispatch(command, &mut session, config, theme).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(theme, e),
            },
        }
    }

    Ok(())
}

/// Send one prompt, print the reply and exit. Nothing is saved.
pub async fn run_single_prompt(config: &ChatConfig, prompt: &str) -> Result<()> {
    let mut session = ChatSession::from_config(config)?;

    match session.send(prompt).await {
        TurnOutcome::Replied(reply) => println!("{reply}"),
        TurnOutcome::Failed(e) => anyhow::bail!("Error: {e}"),
        TurnOutcome::Skipped => anyhow::bail!("Prompt is empty"),
    }
    Ok(())
}
