//! Parsed view of a Markdown document shared by the built-in rules.

use std::collections::HashSet;

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};

use crate::error::LinterError;

/// An ATX or setext heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Heading {
    /// 1-based line of the heading's first line.
    pub line: usize,
    pub depth: u8,
}

pub(crate) struct Document<'a> {
    pub text: &'a str,
    pub lines: Vec<&'a str>,
    pub headings: Vec<Heading>,
    code_lines: HashSet<usize>,
}

impl<'a> Document<'a> {
    /// Parses `text` as GFM.
    pub fn parse(text: &'a str) -> Result<Self, LinterError> {
        let mdast = to_mdast(text, &ParseOptions::gfm())
            .map_err(|e| LinterError::engine(format!("Failed to parse Markdown: {}", e)))?;

        let mut headings = Vec::new();
        let mut code_lines = HashSet::new();
        collect(&mdast, &mut headings, &mut code_lines);

        Ok(Self {
            text,
            lines: text.lines().collect(),
            headings,
            code_lines,
        })
    }

    /// Returns true if the 1-based `line` belongs to a fenced or indented
    /// code block, fences included.
    pub fn in_code_block(&self, line: usize) -> bool {
        self.code_lines.contains(&line)
    }

    /// Iterates `(line_number, content)` pairs, 1-based.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(i, line)| (i + 1, *line))
    }
}

fn collect(node: &Node, headings: &mut Vec<Heading>, code_lines: &mut HashSet<usize>) {
    match node {
        Node::Heading(heading) => {
            if let Some(pos) = node.position() {
                headings.push(Heading {
                    line: pos.start.line,
                    depth: heading.depth,
                });
            }
        }
        Node::Code(_) => {
            if let Some(pos) = node.position() {
                code_lines.extend(pos.start.line..=pos.end.line);
            }
        }
        _ => {}
    }

    if let Some(children) = node.children() {
        for child in children {
            collect(child, headings, code_lines);
        }
    }
}
