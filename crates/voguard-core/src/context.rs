//! Per-file context used while extracting candidates.

use crate::types::{Location, SourceSpan};
use proc_macro2::{LineColumn, Span, TokenTree};
use quote::ToTokens;
use std::path::{Path, PathBuf};
use syn::{AttrStyle, Attribute};

/// A parsed source file and the helpers to turn spans into locations.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Calculates the byte offset for a position reported by `proc_macro2`.
    ///
    /// `line` is 1-indexed and `column` counts characters from 0. Positions
    /// past the end clamp to the end of the file.
    #[must_use]
    pub fn offset_for(&self, position: LineColumn) -> usize {
        if position.line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.split('\n').enumerate() {
            if i + 1 == position.line {
                let within = line_content
                    .char_indices()
                    .nth(position.column)
                    .map_or(line_content.len(), |(byte, _)| byte);
                return offset + within;
            }
            offset += line_content.len() + 1; // +1 for newline
        }

        self.content.len()
    }

    /// Location covering a single span.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        self.range(span, span)
    }

    /// Location from the start of `first` to the end of `last`.
    #[must_use]
    pub fn range(&self, first: Span, last: Span) -> Location {
        let start = first.start();
        let end = last.end();
        let offset = self.offset_for(start);
        let length = self.offset_for(end).saturating_sub(offset);

        SourceSpan::new(self.relative_path.clone(), start.line, start.column + 1)
            .with_span(offset, length)
            .into()
    }

    /// Location covering every token of `node`.
    #[must_use]
    pub fn node<T: ToTokens>(&self, node: &T) -> Location {
        self.tokens(node, 0)
    }

    /// Location of a declaration without its outer attributes, so
    /// `#[derive(Debug)] pub struct Id;` points at `pub struct Id;`.
    #[must_use]
    pub fn declaration<T: ToTokens>(&self, node: &T, attrs: &[Attribute]) -> Location {
        // Each outer attribute prints as `#` followed by a bracket group.
        let outer = attrs
            .iter()
            .filter(|a| matches!(a.style, AttrStyle::Outer))
            .count();
        self.tokens(node, outer * 2)
    }

    fn tokens<T: ToTokens>(&self, node: &T, skip: usize) -> Location {
        let tokens: Vec<TokenTree> = node.to_token_stream().into_iter().skip(skip).collect();
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => self.range(first.span(), last.span()),
            _ => Location::None,
        }
    }
}
