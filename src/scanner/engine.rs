//! スキャナのメイン実装
//!
//! カーソル位置で最良のマッチを探し、アクションを適用して進む処理を
//! バッファの終端まで繰り返す。

use super::matcher::Action;
use super::position::{Position, PositionDelta};
use super::source::Source;
use super::table::PatternTable;
use super::token::{Token, TokenKind, TokenStream};
use crate::error::ScanError;
use crate::grammar;

/// 固定のパターンテーブルでバッファ全体をスキャンする
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'t> {
    table: &'t PatternTable,
}

impl Default for Scanner<'static> {
    /// 組み込み文法のスキャナを作成
    fn default() -> Self {
        Self::new(grammar::default_table())
    }
}

impl<'t> Scanner<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t PatternTable {
        self.table
    }

    /// `input` をトークン化する。失敗した場合はそれまでのトークンを破棄する
    pub fn scan<'a>(&self, input: &'a str) -> Result<TokenStream<'a>, ScanError> {
        log::debug!("Scanning {} bytes with {} matchers", input.len(), self.table.len());

        let mut cursor = Cursor::new(input);
        let mut tokens = TokenStream::new();

        while !cursor.is_at_end() {
            let step = cursor.step(self.table).map_err(|e| {
                log::debug!("Scan aborted: {}", e);
                e
            })?;
            log::trace!(
                "{} matched {:?} at {}, now at {}",
                step.matcher,
                step.text,
                step.start,
                step.end
            );
            if let Some(token) = step.token {
                tokens.push(token);
            }
        }

        log::debug!("Scanned {} tokens", tokens.len());
        Ok(tokens)
    }

    pub fn scan_source<'a>(&self, source: &'a Source) -> Result<TokenStream<'a>, ScanError> {
        log::debug!("Scanning source {}", source.name());
        self.scan(source.text())
    }
}

/// 1回のマッチを消費した結果
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step<'a, 't> {
    pub matcher: &'t str,
    pub text: &'a str,
    pub start: Position,
    pub end: Position,
    pub token: Option<Token<'a>>,
}

/// スキャンごとの状態（バッファと現在位置）
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: Position::new(),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position.offset >= self.input.len()
    }

    pub fn remaining(&self) -> &'a str {
        &self.input[self.position.offset..]
    }

    /// カーソル位置の最良マッチを消費する
    pub fn step<'t>(&mut self, table: &'t PatternTable) -> Result<Step<'a, 't>, ScanError> {
        let remaining = self.remaining();
        let start = self.position;

        let found = table
            .evaluate(remaining)
            .ok_or_else(|| ScanError::no_match(start, remaining))?;
        let text = &remaining[..found.len];
        let matcher = found.matcher.name();

        let (token, delta) = match found.matcher.action() {
            Action::Silent(advance) => (None, advance(text)),
            Action::Producing(produce) => {
                let token = produce(Token::new(TokenKind::Undefined, text, start))
                    .filter(|t| t.kind != TokenKind::Undefined)
                    .ok_or_else(|| ScanError::NoTokenProduced {
                        matcher: matcher.to_owned(),
                        position: start,
                        text: text.to_owned(),
                    })?;
                (Some(token), PositionDelta::over(text))
            }
        };

        self.position = start.advance(found.len, delta);

        Ok(Step {
            matcher,
            text,
            start,
            end: self.position,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Matcher;
    use crate::scanner::MatchPolicy;
    use pretty_assertions::assert_eq;

    fn table() -> PatternTable {
        PatternTable::from_results(
            [
                Matcher::keyword("if"),
                Matcher::identifier("[A-Za-z0-9]+"),
                Matcher::skip("whitespace", "[ \t]+"),
                Matcher::newline(),
                Matcher::line_comment("//"),
            ],
            MatchPolicy::LongestMatch,
        )
        .unwrap()
    }

    fn pos(offset: usize, line: usize, column: usize) -> Position {
        Position {
            offset,
            line,
            column,
        }
    }

    fn steps<'a, 't>(table: &'t PatternTable, input: &'a str) -> Vec<Step<'a, 't>> {
        let mut cursor = Cursor::new(input);
        let mut steps = Vec::new();
        while !cursor.is_at_end() {
            steps.push(cursor.step(table).unwrap());
        }
        steps
    }

    #[test]
    fn test_keyword_then_identifier() {
        let table = table();
        let tokens = Scanner::new(&table).scan("if x").unwrap();
        assert_eq!(
            tokens.into_vec(),
            vec![
                Token::new(TokenKind::Keyword, "if", pos(0, 1, 1)),
                Token::new(TokenKind::Identifier, "x", pos(3, 1, 4)),
            ]
        );
    }

    #[test]
    fn test_newline_resets_column() {
        let table = table();
        let tokens = Scanner::new(&table).scan("a\nb").unwrap();
        assert_eq!(
            tokens.into_vec(),
            vec![
                Token::new(TokenKind::Identifier, "a", pos(0, 1, 1)),
                Token::new(TokenKind::Identifier, "b", pos(2, 2, 1)),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let table = table();
        assert!(Scanner::new(&table).scan("").unwrap().is_empty());
    }

    #[test]
    fn test_single_character_input() {
        let table = table();
        let tokens = Scanner::new(&table).scan("z").unwrap();
        assert_eq!(
            tokens.into_vec(),
            vec![Token::new(TokenKind::Identifier, "z", pos(0, 1, 1))]
        );

        // 末尾のサイレントマッチも消費されること
        assert!(Scanner::new(&table).scan(" ").unwrap().is_empty());
    }

    #[test]
    fn test_last_character_is_scanned() {
        let table = table();
        let tokens = Scanner::new(&table).scan("ab c").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "c");
    }

    #[test]
    fn test_no_match_reports_position() {
        let table = table();
        let err = Scanner::new(&table).scan("a\n  #b").unwrap_err();
        assert_eq!(
            err,
            ScanError::NoMatch {
                position: pos(4, 2, 3),
                excerpt: "#b".to_string(),
                len: 1,
            }
        );
    }

    #[test]
    fn test_no_token_produced() {
        let table = PatternTable::new(vec![
            Matcher::new("broken", "[a-z]+", Action::producing(|_| None)).unwrap(),
        ])
        .unwrap();

        let err = Scanner::new(&table).scan("abc").unwrap_err();
        assert_eq!(
            err,
            ScanError::NoTokenProduced {
                matcher: "broken".to_string(),
                position: pos(0, 1, 1),
                text: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_undefined_kind_is_not_a_token() {
        let table = PatternTable::new(vec![
            Matcher::new("lazy", "[a-z]+", Action::producing(|t| Some(t))).unwrap(),
        ])
        .unwrap();

        let err = Scanner::new(&table).scan("abc").unwrap_err();
        assert!(matches!(err, ScanError::NoTokenProduced { .. }));
    }

    #[test]
    fn test_action_can_rewrite_text() {
        let table = PatternTable::new(vec![Matcher::new(
            "quoted",
            r#""[a-z]*""#,
            Action::producing(|t| {
                let inner = &t.text[1..t.text.len() - 1];
                Some(Token {
                    kind: TokenKind::Identifier,
                    text: inner,
                    ..t
                })
            }),
        )
        .unwrap()])
        .unwrap();

        let tokens = Scanner::new(&table).scan(r#""ab""cd""#).unwrap();
        assert_eq!(tokens[0].text, "ab");
        assert_eq!(tokens[1].text, "cd");
        assert_eq!(tokens[1].position, pos(4, 1, 5));
    }

    #[test]
    fn test_total_consumption() {
        let table = table();
        let input = "if foo // note\n  bar\tbaz\n\nqux";
        let consumed: usize = steps(&table, input).iter().map(|s| s.text.len()).sum();
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn test_position_monotonicity() {
        let table = table();
        let input = "if foo // note\n  bar\tbaz\n\nqux";

        for step in steps(&table, input) {
            assert_eq!(step.end.offset, step.start.offset + step.text.len());
            if step.text.contains('\n') {
                assert_eq!(step.end.line, step.start.line + step.text.matches('\n').count());
                assert_eq!(step.end.column, 1);
            } else {
                assert_eq!(step.end.line, step.start.line);
                assert_eq!(step.end.column, step.start.column + step.text.len());
            }
        }
    }

    #[test]
    fn test_comment_advances_line() {
        let table = table();
        let all = steps(&table, "x // c\ny");
        let comment = all.iter().find(|s| s.matcher == "line_comment").unwrap();
        assert_eq!(comment.text, "// c\n");
        assert_eq!(all.last().unwrap().start, pos(7, 2, 1));
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let table = table();
        let scanner = Scanner::new(&table);
        let input = "if iffy\nif x // done";
        assert_eq!(scanner.scan(input).unwrap(), scanner.scan(input).unwrap());
    }
}
