use bbot_cli::setup::{apply_overrides, choose_model, prompt_api_key};
use bbot_core::{ModelSelection, ProviderId, Settings};
use std::io::Cursor;

// ========================================================================
// Flag overrides (setup.rs)
// ========================================================================

#[test]
fn test_no_overrides_keeps_settings() {
    let mut settings = Settings::default();
    apply_overrides(&mut settings, None, None).unwrap();
    assert_eq!(settings.provider, ProviderId::OpenAI);
    assert_eq!(settings.model, "o1-mini");
}

#[test]
fn test_provider_override_resets_model() {
    let mut settings = Settings::default();
    settings.model = "gpt-4o-mini".to_string();

    apply_overrides(&mut settings, Some("anthropic"), None).unwrap();
    assert_eq!(settings.provider, ProviderId::Anthropic);
    assert_eq!(settings.model, "claude-3-5-sonnet-20240620");
}

#[test]
fn test_same_provider_override_keeps_model() {
    let mut settings = Settings::default();
    settings.model = "gpt-4o-mini".to_string();

    apply_overrides(&mut settings, Some("openai"), None).unwrap();
    assert_eq!(settings.model, "gpt-4o-mini");
}

#[test]
fn test_provider_and_model_override() {
    let mut settings = Settings::default();
    apply_overrides(&mut settings, Some("anthropic"), Some("claude-3-haiku-20240307")).unwrap();
    assert_eq!(settings.model, "claude-3-haiku-20240307");
}

#[test]
fn test_model_from_wrong_provider_rejected() {
    let mut settings = Settings::default();
    assert!(apply_overrides(&mut settings, None, Some("claude-3-haiku-20240307")).is_err());
}

#[test]
fn test_unknown_provider_rejected() {
    let mut settings = Settings::default();
    assert!(apply_overrides(&mut settings, Some("ollama"), None).is_err());
}

#[test]
fn test_invalid_configured_model_replaced() {
    let mut settings = Settings::default();
    settings.model = "gpt-2".to_string();
    apply_overrides(&mut settings, None, None).unwrap();
    assert_eq!(settings.model, "o1-mini");
}

// ========================================================================
// Interactive setup (setup.rs)
// ========================================================================

#[test]
fn test_choose_model_empty_answers_keep_defaults() {
    let mut input = Cursor::new("\n\n");
    let mut output = Vec::new();
    let mut selection = ModelSelection::default();

    choose_model(&mut input, &mut output, &mut selection).unwrap();

    assert_eq!(selection.provider(), ProviderId::OpenAI);
    assert_eq!(selection.model(), "o1-mini");
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("1. o1-mini"));
    assert!(shown.contains("2. gpt-4o-mini"));
}

#[test]
fn test_choose_model_switch_provider_and_pick_by_number() {
    let mut input = Cursor::new("anthropic\n2\n");
    let mut output = Vec::new();
    let mut selection = ModelSelection::default();

    choose_model(&mut input, &mut output, &mut selection).unwrap();

    assert_eq!(selection.provider(), ProviderId::Anthropic);
    assert_eq!(selection.model(), "claude-3-haiku-20240307");
}

#[test]
fn test_choose_model_reprompts_on_bad_answers() {
    let mut input = Cursor::new("gemini\nanthropic\ngpt-4o-mini\n9\nclaude-3-5-sonnet-20240620\n");
    let mut output = Vec::new();
    let mut selection = ModelSelection::default();

    choose_model(&mut input, &mut output, &mut selection).unwrap();

    assert_eq!(selection.model(), "claude-3-5-sonnet-20240620");
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("Unknown provider 'gemini'"));
    assert!(shown.contains("not available for Anthropic"));
}

#[test]
fn test_choose_model_fails_on_closed_input() {
    let mut input = Cursor::new("");
    let mut output = Vec::new();
    let mut selection = ModelSelection::default();
    assert!(choose_model(&mut input, &mut output, &mut selection).is_err());
}

#[test]
fn test_prompt_api_key_skips_blank_lines() {
    let mut input = Cursor::new("\n   \nsk-abc123\n");
    let mut output = Vec::new();

    let key = prompt_api_key(&mut input, &mut output, ProviderId::OpenAI).unwrap();
    assert_eq!(key, "sk-abc123");
    assert!(String::from_utf8(output).unwrap().contains("Enter your OpenAI API key"));
}
