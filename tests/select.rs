use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use askline::{PromptError, PromptOptions, Ui};

/// Output sink that stays readable after the prompt call.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A prompt fed from scripted input, with its output captured.
fn scripted(input: &str) -> (Ui, Capture) {
    let capture = Capture::default();
    let ui = Ui::new(Cursor::new(input.as_bytes().to_vec()), capture.clone());
    (ui, capture)
}

fn languages() -> Vec<String> {
    vec!["A".to_string(), "B".to_string(), "C".to_string()]
}

#[tokio::test]
async fn test_select_by_number() -> Result<()> {
    let (ui, _) = scripted("1\n");

    let picked = ui
        .select("Pick", &languages(), &PromptOptions::default())
        .await?;

    assert_eq!(picked, "A");
    Ok(())
}

#[tokio::test]
async fn test_select_last_entry() -> Result<()> {
    let (ui, _) = scripted("3\n");

    let picked = ui
        .select("Pick", &languages(), &PromptOptions::default())
        .await?;

    assert_eq!(picked, "C");
    Ok(())
}

#[tokio::test]
async fn test_empty_answer_takes_default() -> Result<()> {
    let (ui, _) = scripted("\n");
    let opts = PromptOptions {
        default: Some("A".to_string()),
        ..Default::default()
    };

    assert_eq!(ui.select("Pick", &languages(), &opts).await?, "A");
    Ok(())
}

#[tokio::test]
async fn test_explicit_number_beats_default() -> Result<()> {
    let (ui, _) = scripted("3\n");
    let opts = PromptOptions {
        default: Some("A".to_string()),
        ..Default::default()
    };

    assert_eq!(ui.select("Pick", &languages(), &opts).await?, "C");
    Ok(())
}

#[tokio::test]
async fn test_loop_on_empty_then_valid() -> Result<()> {
    let (ui, capture) = scripted("\n3\n");
    let opts = PromptOptions {
        loop_on_invalid: true,
        ..Default::default()
    };

    assert_eq!(ui.select("Pick", &languages(), &opts).await?, "C");
    assert!(capture
        .contents()
        .contains("Input must not be empty. Answer with a number."));
    Ok(())
}

#[tokio::test]
async fn test_loop_survives_repeated_empty_answers() -> Result<()> {
    let (ui, _) = scripted("\n\n\n\n\n2\n");
    let opts = PromptOptions {
        loop_on_invalid: true,
        ..Default::default()
    };

    assert_eq!(ui.select("Pick", &languages(), &opts).await?, "B");
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_correction_then_valid() -> Result<()> {
    let (ui, capture) = scripted("9\n2\n");
    let opts = PromptOptions {
        loop_on_invalid: true,
        ..Default::default()
    };

    assert_eq!(ui.select("Pick", &languages(), &opts).await?, "B");

    let out = capture.contents();
    assert_eq!(
        out.matches("Input must be a number between 1 and 3.").count(),
        1
    );
    Ok(())
}

#[tokio::test]
async fn test_not_a_number_correction_then_valid() -> Result<()> {
    let (ui, capture) = scripted("A\n3\n");
    let opts = PromptOptions {
        loop_on_invalid: true,
        ..Default::default()
    };

    assert_eq!(ui.select("Pick", &languages(), &opts).await?, "C");
    assert!(capture.contents().contains("Input must be a number."));
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_without_loop_fails() {
    let (ui, _) = scripted("4\n");

    let err = ui
        .select("Pick", &languages(), &PromptOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PromptError::OutOfRange));
}

#[tokio::test]
async fn test_not_a_number_without_loop_fails() {
    let (ui, _) = scripted("abc\n");

    let err = ui
        .select("Pick", &languages(), &PromptOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PromptError::NotNumber));
}

#[tokio::test]
async fn test_empty_without_default_without_loop_fails() {
    let (ui, _) = scripted("\n");

    let err = ui
        .select("Pick", &languages(), &PromptOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PromptError::Empty));
}

#[tokio::test]
async fn test_unmatched_default_is_a_configuration_error() {
    let (ui, capture) = scripted("1\n");
    let opts = PromptOptions {
        default: Some("D".to_string()),
        ..Default::default()
    };

    let err = ui
        .select("Pick", &languages(), &opts)
        .await
        .unwrap_err();

    assert!(matches!(err, PromptError::Configuration(_)));
    // Raised before any user interaction.
    assert!(capture.contents().is_empty());
}

#[tokio::test]
async fn test_empty_list_is_a_configuration_error() {
    let (ui, _) = scripted("1\n");

    let err = ui
        .select("Pick", &[], &PromptOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PromptError::Configuration(_)));
}

#[tokio::test]
async fn test_menu_is_numbered_from_one() -> Result<()> {
    let (ui, capture) = scripted("2\n");
    let opts = PromptOptions {
        default: Some("A".to_string()),
        ..Default::default()
    };

    ui.select("Pick", &languages(), &opts).await?;

    let out = capture.contents();
    assert!(out.starts_with("Pick\n\n1. A\n2. B\n3. C\n\n"));
    assert!(out.contains("Enter a number (Default is 1): "));
    assert!(out.ends_with('\n'));
    Ok(())
}
