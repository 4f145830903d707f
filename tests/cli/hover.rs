use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

fn welcome_project() -> Result<CliTest> {
    CliTest::with_files(&[
        ("locales/messages_en.json", r#"{ "user.welcome": "Welcome!" }"#),
        ("src/app.ts", "// greeting\nconst x = \"user.welcome\";\n"),
    ])
}

#[test]
fn test_hover_prints_translation() -> Result<()> {
    let test = welcome_project()?;

    let output = test
        .hover_command()
        .args(["src/app.ts", "--line", "1", "--character", "16"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    insta::assert_snapshot!(stdout(&output).trim_end(), @"Welcome!");
    Ok(())
}

#[test]
fn test_hover_on_closing_quote() -> Result<()> {
    let test = welcome_project()?;

    let output = test
        .hover_command()
        .args(["src/app.ts", "--line", "1", "--character", "23"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Welcome!\n");
    Ok(())
}

#[test]
fn test_hover_json_output() -> Result<()> {
    let test = welcome_project()?;

    let output = test
        .hover_command()
        .args(["src/app.ts", "--line", "1", "--character", "11"])
        .args(["--format", "json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(json["key"], "user.welcome");
    assert_eq!(json["startCol"], 11);
    assert_eq!(json["endCol"], 23);
    assert_eq!(json["namespace"], "messages");
    Ok(())
}

#[test]
fn test_hover_miss_exits_with_failure() -> Result<()> {
    let test = welcome_project()?;

    let output = test
        .hover_command()
        .args(["src/app.ts", "--line", "1", "--character", "3"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("no translation at src/app.ts:1:3"));
    Ok(())
}

#[test]
fn test_hover_line_out_of_range() -> Result<()> {
    let test = welcome_project()?;

    let output = test
        .hover_command()
        .args(["src/app.ts", "--line", "40", "--character", "0"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}
