//! Post-processing of raw model output.
//!
//! [`format_summary`] strips markup noise; [`SectionParser`] splits the
//! cleaned text into the canonical sections shown as tabs in the UI.
//!
//! Heading priority: canonical names are tried first, in configured order,
//! then aliases in table order. The first heading that matches a line wins.
//! A heading only matches at the start of a line (after optional `【`, `■`,
//! `●`, `◆`, `・`, `[` decoration) and must be followed by a closing bracket,
//! a colon, or the end of the line, so body text that merely starts with a
//! heading word is not mistaken for a heading.

use indexmap::IndexMap;
use regex::Regex;

use crate::constants::{DEFAULT_SECTION_ALIASES, DEFAULT_SECTION_NAMES};
use crate::error::CoreError;

/// Characters removed from raw model output.
const STRIPPED_CHARS: &[char] = &['*', '＊', '#', ' '];

/// Remove markdown emphasis, heading marks and ASCII spaces.
///
/// Idempotent: formatting already formatted text is a no-op.
pub fn format_summary(raw: &str) -> String {
    raw.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

// ---------------------------------------------------------------------------
// Section parser
// ---------------------------------------------------------------------------

/// Parsed sections keyed by canonical name, in canonical order.
pub type ParsedSections = IndexMap<String, String>;

/// Splits cleaned summary text into named sections.
#[derive(Debug, Clone)]
pub struct SectionParser {
    sections: Vec<String>,
    /// (index into `sections`, heading matcher), in priority order.
    matchers: Vec<(usize, Regex)>,
}

impl SectionParser {
    /// Build a parser for the given canonical names and alias table.
    ///
    /// Every alias must point at one of the canonical names.
    pub fn new(sections: Vec<String>, aliases: Vec<(String, String)>) -> Result<Self, CoreError> {
        let mut matchers = Vec::with_capacity(sections.len() + aliases.len());

        for (idx, name) in sections.iter().enumerate() {
            matchers.push((idx, heading_regex(name)?));
        }
        for (alias, target) in &aliases {
            let idx = sections.iter().position(|s| s == target).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Section alias '{alias}' points at unknown section '{target}'"
                ))
            })?;
            matchers.push((idx, heading_regex(alias)?));
        }

        Ok(Self { sections, matchers })
    }

    pub fn section_names(&self) -> &[String] {
        &self.sections
    }

    /// Split `text` into sections.
    ///
    /// The result always holds every canonical section, empty when the text
    /// never mentions it. Lines before the first heading are dropped.
    pub fn parse(&self, text: &str) -> ParsedSections {
        let mut out: ParsedSections = self
            .sections
            .iter()
            .map(|name| (name.clone(), String::new()))
            .collect();
        let mut current: Option<usize> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some((idx, rest)) = self.match_heading(line) {
                current = Some(idx);
                if !rest.is_empty() {
                    if let Some((_, content)) = out.get_index_mut(idx) {
                        *content = rest.to_string();
                    }
                }
                continue;
            }

            let Some(idx) = current else { continue };
            if let Some((_, content)) = out.get_index_mut(idx) {
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(line);
            }
        }

        out
    }

    fn match_heading<'a>(&self, line: &'a str) -> Option<(usize, &'a str)> {
        self.matchers.iter().find_map(|(idx, re)| {
            re.captures(line).map(|caps| {
                let rest = caps.get(1).map_or("", |m| m.as_str().trim());
                (*idx, rest)
            })
        })
    }
}

impl Default for SectionParser {
    fn default() -> Self {
        let sections = DEFAULT_SECTION_NAMES.iter().map(|s| s.to_string()).collect();
        let aliases = DEFAULT_SECTION_ALIASES
            .iter()
            .map(|(a, t)| (a.to_string(), t.to_string()))
            .collect();
        Self::new(sections, aliases).expect("default section table is consistent")
    }
}

fn heading_regex(name: &str) -> Result<Regex, CoreError> {
    let pattern = format!(
        r"^[\s【\[［■●◆・\-]*{}(?:\s*[】\]］]\s*[:：]?|\s*[:：]|\s*$)\s*(.*)$",
        regex::escape(name)
    );
    Regex::new(&pattern)
        .map_err(|e| CoreError::Internal(format!("Invalid heading pattern for '{name}': {e}")))
}
