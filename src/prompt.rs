//! Line-oriented prompts for choosing the column mapping and program by hand.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::mapping::{ColumnMapping, NONE_CHOICE};
use crate::schema::Program;

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Unmapped,
    Column(usize),
}

/// Accepts a list index (`0` is None), a column name, `none`, or a blank line.
fn parse_choice(answer: &str, source_columns: &[String]) -> Option<Choice> {
    let answer = answer.trim();
    if answer.is_empty() || answer.eq_ignore_ascii_case(NONE_CHOICE) {
        return Some(Choice::Unmapped);
    }
    if let Ok(n) = answer.parse::<usize>() {
        return match n {
            0 => Some(Choice::Unmapped),
            n if n <= source_columns.len() => Some(Choice::Column(n - 1)),
            _ => None,
        };
    }
    source_columns
        .iter()
        .position(|c| c == answer)
        .map(Choice::Column)
}

/// Read one line, `None` at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("reading answer")?;
    Ok((n > 0).then_some(line))
}

/// Ask for a source column for each target field in turn.
///
/// End of input leaves the remaining fields unmapped.
pub fn prompt_mapping<R: BufRead, W: Write>(
    source_columns: &[String],
    target_fields: &[&str],
    input: &mut R,
    output: &mut W,
) -> Result<ColumnMapping> {
    writeln!(output, "Source columns:")?;
    writeln!(output, "  0) {}", NONE_CHOICE)?;
    for (i, name) in source_columns.iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, name)?;
    }

    let mut mapping = ColumnMapping::new();
    'fields: for &target in target_fields {
        loop {
            write!(
                output,
                "Map '{}' to [0-{}, blank = None]: ",
                target,
                source_columns.len()
            )?;
            output.flush()?;

            let Some(answer) = read_answer(input)? else {
                writeln!(output)?;
                break 'fields;
            };
            match parse_choice(&answer, source_columns) {
                Some(Choice::Unmapped) => break,
                Some(Choice::Column(idx)) => {
                    mapping.set(target, Some(source_columns[idx].clone()));
                    break;
                }
                None => writeln!(output, "invalid choice '{}'", answer.trim())?,
            }
        }
    }

    Ok(mapping)
}

/// Ask for the program name; a blank answer or end of input picks `default`.
pub fn prompt_program<R: BufRead, W: Write>(
    default: Program,
    input: &mut R,
    output: &mut W,
) -> Result<Program> {
    let choices: Vec<&str> = Program::ALL.iter().map(Program::as_str).collect();
    loop {
        write!(
            output,
            "Select Program Name [{}] (default {}): ",
            choices.join("/"),
            default
        )?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            writeln!(output)?;
            return Ok(default);
        };
        if answer.trim().is_empty() {
            return Ok(default);
        }
        match Program::from_str(&answer) {
            Some(program) => return Ok(program),
            None => writeln!(output, "invalid program '{}'", answer.trim())?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn columns() -> Vec<String> {
        vec!["Full Name".to_string(), "Phone".to_string(), "10".to_string()]
    }

    #[test]
    fn parses_numbers_names_and_none() {
        let cols = columns();
        assert_eq!(parse_choice("0", &cols), Some(Choice::Unmapped));
        assert_eq!(parse_choice("  \n", &cols), Some(Choice::Unmapped));
        assert_eq!(parse_choice("NONE", &cols), Some(Choice::Unmapped));
        assert_eq!(parse_choice("2", &cols), Some(Choice::Column(1)));
        assert_eq!(parse_choice("Phone\n", &cols), Some(Choice::Column(1)));
        assert_eq!(parse_choice("4", &cols), None);
        assert_eq!(parse_choice("Email", &cols), None);
    }

    #[test]
    fn collects_mapping_with_reprompt_and_early_eof() -> Result<()> {
        let mut input = Cursor::new("Full Name\n9\n2\n\n");
        let mut output = Vec::new();

        let mapping = prompt_mapping(
            &columns(),
            &["Name", "Phone Number", "Stage", "owner"],
            &mut input,
            &mut output,
        )?;

        assert_eq!(mapping.source_for("Name"), Some("Full Name"));
        assert_eq!(mapping.source_for("Phone Number"), Some("Phone"));
        assert_eq!(mapping.source_for("Stage"), None);
        assert_eq!(mapping.source_for("owner"), None);
        assert_eq!(mapping.len(), 2);

        let transcript = String::from_utf8(output)?;
        assert!(transcript.contains("  1) Full Name"));
        assert!(transcript.contains("invalid choice '9'"));
        Ok(())
    }

    #[test]
    fn program_prompt_defaults_and_reprompts() -> Result<()> {
        let mut output = Vec::new();

        let picked = prompt_program(Program::Idfc, &mut Cursor::new("hdfc\nbob\n"), &mut output)?;
        assert_eq!(picked, Program::Bob);
        assert!(String::from_utf8(output)?.contains("invalid program 'hdfc'"));

        let mut sink = Vec::new();
        assert_eq!(
            prompt_program(Program::Idfc, &mut Cursor::new("\n"), &mut sink)?,
            Program::Idfc
        );
        assert_eq!(
            prompt_program(Program::Bob, &mut Cursor::new(""), &mut sink)?,
            Program::Bob
        );
        Ok(())
    }
}
