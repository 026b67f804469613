// syntax
//
// choose   = concat ( '|' concat ) *
// concat   = repeat *
// repeat   = brackets '*' *
// brackets = '(' choose ')' | literal
// literal  = any char except '(' ')' '|' '*'
//
// `|` and concatenation nest to the left, so text rendered by `Pattern`
// parses back to a pattern with the same rendering.

use crate::error::{Error, Result};
use crate::pattern::Pattern;
use std::iter::Peekable;
use std::str::CharIndices;

pub(crate) fn parse(text: &str) -> Result<Pattern> {
    let mut parser = Parser {
        chars: text.char_indices().peekable(),
    };
    let pattern = parser.choose()?;
    match parser.chars.next() {
        None => Ok(pattern),
        Some((position, ch)) => Err(Error::UnexpectedChar { ch, position }),
    }
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    fn choose(&mut self) -> Result<Pattern> {
        let mut pattern = self.concatenate()?;
        while self.chars.next_if(|&(_, ch)| ch == '|').is_some() {
            let second = self.concatenate()?;
            pattern = Pattern::choose(pattern, second);
        }
        Ok(pattern)
    }

    fn concatenate(&mut self) -> Result<Pattern> {
        let mut pattern = None;
        while let Some((position, ch)) = self.chars.next_if(|&(_, ch)| ch != '|' && ch != ')') {
            let item = self.repeat(position, ch)?;
            pattern = Some(match pattern {
                None => item,
                Some(first) => Pattern::concatenate(first, item),
            });
        }
        Ok(pattern.unwrap_or(Pattern::Empty))
    }

    fn repeat(&mut self, position: usize, ch: char) -> Result<Pattern> {
        let mut pattern = self.brackets(position, ch)?;
        while self.chars.next_if(|&(_, ch)| ch == '*').is_some() {
            pattern = Pattern::repeat(pattern);
        }
        Ok(pattern)
    }

    fn brackets(&mut self, position: usize, ch: char) -> Result<Pattern> {
        match ch {
            '(' => {
                let pattern = self.choose()?;
                match self.chars.next() {
                    Some((_, ')')) => Ok(pattern),
                    _ => Err(Error::UnclosedParenthesis { position }),
                }
            }
            '*' => Err(Error::UnexpectedChar { ch, position }),
            _ => Ok(Pattern::Literal(ch)),
        }
    }
}
