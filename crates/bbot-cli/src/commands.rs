/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Save the current conversation and start a fresh one.
    NewConversation,
    /// Save current conversation.
    SaveConversation,
    /// Load a saved conversation by file name or list index.
    LoadConversation(String),
    /// Delete a saved conversation by file name or list index.
    DeleteConversation(String),
    /// List saved conversations.
    ListConversations,
    /// Discard the last reply and ask again.
    Regenerate,
    /// Print the whole chat log again.
    ShowLog,
    /// List the models of the active provider.
    ListModels,
    /// Show provider, model and history directory.
    ShowStatus,
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/new" => CommandResult::NewConversation,
        "/regenerate" | "/regen" | "/r" => CommandResult::Regenerate,

        // Conversation files
        "/save" => CommandResult::SaveConversation,
        "/load" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /load <file-name | number from /history>".into())
            } else {
                CommandResult::LoadConversation(arg.to_string())
            }
        }
        "/delete" | "/rm" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /delete <file-name | number from /history>".into())
            } else {
                CommandResult::DeleteConversation(arg.to_string())
            }
        }
        "/history" | "/conversations" => CommandResult::ListConversations,

        // Display
        "/log" => CommandResult::ShowLog,
        "/models" => CommandResult::ListModels,
        "/status" => CommandResult::ShowStatus,
        "/version" => CommandResult::Message(format!("BBot v{}", env!("CARGO_PKG_VERSION"))),

        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
BBot commands

  CHAT
    <text>                    Send a message (end a line with \\ to continue it)
    /regenerate, /regen, /r   Discard the last reply and ask again
    /new                      Save this conversation and start a new one
    /log                      Print the whole conversation again

  HISTORY
    /save                     Save the current conversation
    /history, /conversations  List saved conversations
    /load <name | number>     Load a saved conversation
    /delete <name | number>   Delete a saved conversation

  OTHER
    /models                   List models for the active provider
    /status                   Show provider, model and history directory
    /version                  Show version information
    /help, /h                 Show this help message
    /exit, /quit, /q          Quit";

    CommandResult::Message(help_text.into())
}
