//! Shell completion scripts.
//!
//! Each script registers a completer for the target program that shells out
//! to `schema-complete __complete` with the words typed so far and the index
//! of the word being completed, then offers whatever lines come back.

/// Shells a completion script can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// What a script completes and how it asks for completions.
#[derive(Debug, Clone)]
pub struct ScriptTarget {
    /// Names the completed program is invoked as; the first one names the
    /// generated shell functions.
    pub programs: Vec<String>,
    /// Command line that prints completions, up to (not including) `--cword`.
    pub completer: Vec<String>,
}

/// Renders the completion script for `shell`.
pub fn render(shell: Shell, target: &ScriptTarget) -> String {
    match shell {
        Shell::Bash => bash(target),
        Shell::Zsh => zsh(target),
        Shell::Fish => fish(target),
        Shell::Powershell => powershell(target),
    }
}

fn bash(target: &ScriptTarget) -> String {
    let function = function_name(target);
    let completer = join(&target.completer, posix_quote);
    let programs = join(&target.programs, posix_quote);
    format!(
        r#"#!/usr/bin/env bash

_{function}_complete() {{
  local completions completion
  completions=$({completer} --cword "$COMP_CWORD" -- "${{COMP_WORDS[@]}}")
  COMPREPLY=()
  while IFS= read -r completion; do
    if [[ -n "$completion" ]]; then
      COMPREPLY+=("$completion")
    fi
  done <<< "$completions"
}}

complete -F _{function}_complete {programs}
"#
    )
}

fn zsh(target: &ScriptTarget) -> String {
    let programs = join(&target.programs, posix_quote);
    format!(
        "#compdef {programs}\n\nautoload -Uz bashcompinit\nbashcompinit\n{}",
        bash(target)
    )
}

fn fish(target: &ScriptTarget) -> String {
    let function = function_name(target);
    let completer = join(&target.completer, fish_quote);
    let registrations: String = target
        .programs
        .iter()
        .map(|program| {
            format!(
                "complete -c {} -f -a \"(__{function}_complete)\"\n",
                fish_quote(program)
            )
        })
        .collect();
    format!(
        r#"function __{function}_complete
  set -l words (commandline -opc)
  set -l cword (count $words)
  {completer} --cword $cword -- $words (commandline -ct)
end

{registrations}"#
    )
}

fn powershell(target: &ScriptTarget) -> String {
    let completer = join(&target.completer, powershell_quote);
    let programs = target
        .programs
        .iter()
        .map(|program| powershell_quote(program))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"Register-ArgumentCompleter -Native -CommandName {programs} -ScriptBlock {{
  param($wordToComplete, $commandAst, $cursorPosition)
  $elements = @($commandAst.CommandElements | ForEach-Object {{ $_.ToString() }})
  $cword = $elements.Count - 1
  if ($wordToComplete -eq '') {{
    $cword = $elements.Count
  }}
  $completions = & {completer} --cword $cword -- $elements
  foreach ($completion in $completions) {{
    [System.Management.Automation.CompletionResult]::new($completion, $completion, 'ParameterValue', $completion)
  }}
}}
"#
    )
}

/// Shell-function-safe form of the first program name.
fn function_name(target: &ScriptTarget) -> String {
    let program = target.programs.first().map_or("", String::as_str);
    program
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn join(words: &[String], quote: fn(&str) -> String) -> String {
    words.iter().map(|w| quote(w)).collect::<Vec<_>>().join(" ")
}

fn is_bare(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '+' | ','))
}

fn posix_quote(word: &str) -> String {
    if is_bare(word) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

fn fish_quote(word: &str) -> String {
    if is_bare(word) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\\', r"\\").replace('\'', r"\'"))
}

fn powershell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gog() -> ScriptTarget {
        ScriptTarget {
            programs: vec!["gog".into(), "gog-dev".into()],
            completer: vec![
                "schema-complete".into(),
                "__complete".into(),
                "--schema".into(),
                "/home/me/my schemas/gog.json".into(),
            ],
        }
    }

    #[test]
    fn test_bash_registers_every_program() {
        let script = render(Shell::Bash, &gog());

        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert!(script.contains("_gog_complete() {"));
        assert!(script.contains("complete -F _gog_complete gog gog-dev\n"));
        assert!(script.contains(
            "completions=$(schema-complete __complete --schema '/home/me/my schemas/gog.json' --cword \"$COMP_CWORD\" -- \"${COMP_WORDS[@]}\")"
        ));
    }

    #[test]
    fn test_bash_reads_completions_without_globbing() {
        let script = render(Shell::Bash, &gog());

        assert!(script.contains("COMPREPLY+=(\"$completion\")"));
        assert!(script.contains("done <<< \"$completions\""));
        assert!(!script.contains("COMPREPLY=( $completions )"));
    }

    #[test]
    fn test_zsh_wraps_bash() {
        let script = render(Shell::Zsh, &gog());

        assert!(script.starts_with("#compdef gog gog-dev\n"));
        assert!(script.contains("bashcompinit\n"));
        assert!(script.contains("complete -F _gog_complete gog gog-dev"));
    }

    #[test]
    fn test_fish_passes_current_token() {
        let script = render(Shell::Fish, &gog());

        assert!(script.contains("function __gog_complete\n"));
        assert!(script.contains("-- $words (commandline -ct)"));
        assert!(script.contains("complete -c gog -f -a \"(__gog_complete)\"\n"));
        assert!(script.contains("complete -c gog-dev -f -a \"(__gog_complete)\"\n"));
    }

    #[test]
    fn test_powershell_quotes_everything() {
        let script = render(Shell::Powershell, &gog());

        assert!(script.starts_with("Register-ArgumentCompleter -Native -CommandName 'gog','gog-dev'"));
        assert!(script.contains(
            "& 'schema-complete' '__complete' '--schema' '/home/me/my schemas/gog.json' --cword $cword"
        ));
    }

    #[test]
    fn test_function_name_is_sanitized() {
        let target = ScriptTarget {
            programs: vec!["schema-complete".into()],
            completer: vec!["schema-complete".into(), "__complete".into()],
        };

        assert!(render(Shell::Bash, &target).contains("_schema_complete_complete()"));
    }

    #[test]
    fn test_quoting() {
        assert_eq!(posix_quote("plain/path.json"), "plain/path.json");
        assert_eq!(posix_quote("it's"), r"'it'\''s'");
        assert_eq!(posix_quote(""), "''");
        assert_eq!(fish_quote("it's"), r"'it\'s'");
        assert_eq!(powershell_quote("it's"), "'it''s'");
    }
}
