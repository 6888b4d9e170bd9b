//! トークン定義

use serde::Serialize;
use std::fmt;
use std::ops::Index;
use std::slice;

use super::position::Position;

/// トークン種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// マッチャーが種別を決めるまでの仮の値
    Undefined,
    Keyword,
    Identifier,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Undefined => "Undefined",
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
        };
        f.write_str(name)
    }
}

/// 位置情報付きトークン（`text` は入力を借用する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: Position,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, position: Position) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    /// 種別を設定したトークンを返す
    pub fn with_kind(self, kind: TokenKind) -> Self {
        Self { kind, ..self }
    }

    /// バッファ内のバイト範囲
    pub fn span(&self) -> std::ops::Range<usize> {
        self.position.offset..self.position.offset + self.text.len()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.position, self.kind, self.text)
    }
}

/// スキャン結果のトークン列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, token: Token<'a>) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Token<'a>> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token<'a>] {
        &self.tokens
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    pub fn into_vec(self) -> Vec<Token<'a>> {
        self.tokens
    }
}

impl<'a> Index<usize> for TokenStream<'a> {
    type Output = Token<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for TokenStream<'a> {
    type Item = Token<'a>;
    type IntoIter = std::vec::IntoIter<Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s TokenStream<'a> {
    type Item = &'s Token<'a>;
    type IntoIter = slice::Iter<'s, Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl<'a> From<Vec<Token<'a>>> for TokenStream<'a> {
    fn from(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens }
    }
}

impl fmt::Display for TokenStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            writeln!(f, "{}", token)?;
        }
        Ok(())
    }
}
