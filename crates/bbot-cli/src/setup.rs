use anyhow::{bail, Result};
use bbot_core::{ModelSelection, ProviderId, Settings};
use std::io::{BufRead, Write};

/// Apply `--provider` / `--model` to the loaded settings.
///
/// Changing provider resets the model to that provider's first catalog
/// entry before an explicit `--model` is applied.
pub fn apply_overrides(
    settings: &mut Settings,
    provider: Option<&str>,
    model: Option<&str>,
) -> Result<()> {
    let mut selection = ModelSelection::new(settings.provider);
    if selection.select_model(&settings.model).is_err() {
        tracing::warn!(
            "Configured model '{}' is not offered by {}; using {}",
            settings.model,
            settings.provider,
            selection.model()
        );
    }

    if let Some(provider) = provider {
        let provider: ProviderId = provider.parse()?;
        if provider != selection.provider() {
            selection.select_provider(provider);
        }
    }
    if let Some(model) = model {
        selection.select_model(model)?;
    }

    settings.provider = selection.provider();
    settings.model = selection.model().to_string();
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("Input closed during setup");
    }
    Ok(line.trim().to_string())
}

/// Interactive provider and model choice. Empty answers keep the current
/// value.
pub fn choose_model<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    selection: &mut ModelSelection,
) -> Result<()> {
    let providers: Vec<&str> = ProviderId::all().iter().map(|p| p.name()).collect();
    loop {
        write!(
            output,
            "Select API provider [{}] (current: {}): ",
            providers.join("/"),
            selection.provider()
        )?;
        output.flush()?;
        let answer = read_line(input)?;
        if answer.is_empty() {
            break;
        }
        match answer.parse::<ProviderId>() {
            Ok(provider) => {
                selection.select_provider(provider);
                break;
            }
            Err(e) => writeln!(output, "{e}")?,
        }
    }

    let models = selection.available_models();
    writeln!(output, "Models for {}:", selection.provider())?;
    for (i, model) in models.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, model)?;
    }
    loop {
        write!(output, "Select model (current: {}): ", selection.model())?;
        output.flush()?;
        let answer = read_line(input)?;
        if answer.is_empty() {
            return Ok(());
        }
        let picked = match answer.parse::<usize>() {
            Ok(n) if (1..=models.len()).contains(&n) => models[n - 1].to_string(),
            _ => answer,
        };
        match selection.select_model(&picked) {
            Ok(()) => return Ok(()),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

/// Plaintext API key entry.
pub fn prompt_api_key<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    provider: ProviderId,
) -> Result<String> {
    loop {
        write!(output, "Enter your {provider} API key: ")?;
        output.flush()?;
        let key = read_line(input)?;
        if !key.is_empty() {
            return Ok(key);
        }
    }
}
