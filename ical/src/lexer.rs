// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for a single unfolded iCalendar content line.
//!
//! Only the three delimiters of the `NAME;PARAM=VALUE:VALUE` grammar are
//! significant; everything between them is opaque text.

use std::fmt::{self, Display};
use std::ops::Range;

use logos::Logos;

/// Tokenize one logical line into delimiter and text tokens with byte spans.
pub fn tokenize(line: &str) -> impl Iterator<Item = SpannedToken<'_>> {
    // `Text` matches every non-delimiter character, so the lexer never fails.
    Token::lexer(line)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|tok| SpannedToken(tok, span)))
}

/// Token emitted by the content line lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
pub enum Token<'a> {
    /// Colon (:), separates name and parameters from the value
    #[token(":")]
    Colon,

    /// Semicolon (;), separates the name from each parameter
    #[token(";")]
    Semicolon,

    /// Equal sign (=), separates a parameter name from its value
    #[token("=")]
    Equal,

    /// Any run of characters other than the delimiters
    #[regex(r"[^:;=]+")]
    Text(&'a str),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Text(s) => write!(f, "Text({s})"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its byte span in the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Range<usize>);
