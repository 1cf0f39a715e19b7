//! Splits a serialized selector into the compound selectors that get tested
//! against the document, outermost ancestor first.
//!
//! Every combinator is a boundary. Each compound is reduced to the part before
//! its first pseudo-class or pseudo-element, so `a[href^="javascript:"]:after`
//! is tested as `a[href^="javascript:"]` and `.hover\:underline:hover` as
//! `.hover\:underline`.
use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
  /// `a b`
  Descendant,
  /// `a > b`
  Child,
  /// `a + b`
  NextSibling,
  /// `a ~ b`
  SubsequentSibling,
}

impl Combinator {
  fn from_char(c: char) -> Option<Self> {
    match c {
      '>' => Some(Combinator::Child),
      '+' => Some(Combinator::NextSibling),
      '~' => Some(Combinator::SubsequentSibling),
      _ => None,
    }
  }

  pub fn is_sibling(self) -> bool {
    matches!(self, Combinator::NextSibling | Combinator::SubsequentSibling)
  }

  /// The relation left behind when the compound between `self` and `next`
  /// is dropped from the chain.
  fn widen(self, next: Combinator) -> Combinator {
    if self.is_sibling() || next.is_sibling() {
      Combinator::SubsequentSibling
    } else {
      Combinator::Descendant
    }
  }

  pub fn separator(self) -> &'static str {
    match self {
      Combinator::Descendant => " ",
      Combinator::Child => " > ",
      Combinator::NextSibling => " + ",
      Combinator::SubsequentSibling => " ~ ",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
  /// Relation to the previous segment. Meaningless for the first one.
  pub combinator: Combinator,
  pub text: String,
}

impl Segment {
  pub fn new(combinator: Combinator, text: impl Into<String>) -> Self {
    Segment {
      combinator,
      text: text.into(),
    }
  }

  /// Extends a cache key built from the previous segments with this one.
  pub fn push_key(&self, key: &mut String) {
    if !key.is_empty() {
      key.push_str(self.combinator.separator());
    }
    key.push_str(&self.text);
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorChain {
  /// `*`, `:root`, `::before` and friends. Never queried, always kept.
  AlwaysReachable,
  Segments(Vec<Segment>),
}

impl SelectorChain {
  pub fn from_selector(selector: &str) -> Self {
    let mut segments: Vec<Segment> = Vec::new();
    let mut relation: Option<Combinator> = None;

    for token in tokenize(selector) {
      match token {
        Token::Combinator(combinator) => {
          relation = Some(match relation {
            Some(previous) => previous.widen(combinator),
            None => combinator,
          });
        }
        Token::Compound(compound) => {
          let reduced = reduce_compound(&compound);
          if reduced.is_empty() || reduced == "*" {
            continue;
          }

          let combinator = relation.take().unwrap_or(Combinator::Descendant);
          let combinator = if segments.is_empty() {
            Combinator::Descendant
          } else {
            combinator
          };
          segments.push(Segment::new(combinator, reduced));
        }
      }
    }

    if segments.is_empty() {
      SelectorChain::AlwaysReachable
    } else {
      SelectorChain::Segments(segments)
    }
  }

  pub fn segments(&self) -> &[Segment] {
    match self {
      SelectorChain::AlwaysReachable => &[],
      SelectorChain::Segments(segments) => segments,
    }
  }

  pub fn cache_key(&self) -> String {
    let mut key = String::new();
    for segment in self.segments() {
      segment.push_key(&mut key);
    }
    key
  }
}

/// Returns the part of a compound selector before its first pseudo-class or
/// pseudo-element.
///
/// Colons that are escaped, quoted or inside an attribute selector belong to
/// the compound itself.
pub fn reduce_compound(compound: &str) -> &str {
  let mut chars = compound.char_indices().peekable();
  let mut quote: Option<char> = None;
  let mut brackets = 0usize;

  while let Some((index, c)) = chars.next() {
    if c == '\\' {
      chars.next();
      continue;
    }

    if let Some(open) = quote {
      if c == open {
        quote = None;
      }
      continue;
    }

    match c {
      '"' | '\'' => quote = Some(c),
      '[' => brackets += 1,
      ']' => brackets = brackets.saturating_sub(1),
      ':' if brackets == 0 => return &compound[..index],
      _ => {}
    }
  }

  compound
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
  Compound(String),
  Combinator(Combinator),
}

fn tokenize(selector: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut current = String::new();
  let mut pending: Option<Combinator> = None;
  let mut chars = selector.chars().peekable();
  let mut quote: Option<char> = None;
  let mut depth = 0usize;

  let flush = |tokens: &mut Vec<Token>, current: &mut String| {
    if !current.is_empty() {
      tokens.push(Token::Compound(std::mem::take(current)));
    }
  };

  while let Some(c) = chars.next() {
    if current.is_empty() && !c.is_whitespace() && Combinator::from_char(c).is_none() {
      // A compound is starting, link it to the previous one
      let has_previous = tokens
        .iter()
        .any(|token| matches!(token, Token::Compound(_)));
      if let Some(combinator) = pending.take() {
        if has_previous {
          tokens.push(Token::Combinator(combinator));
        }
      }
    }

    if c == '\\' {
      current.push(c);
      push_escape(&mut chars, &mut current);
      continue;
    }

    if let Some(open) = quote {
      current.push(c);
      if c == open {
        quote = None;
      }
      continue;
    }

    match c {
      '"' | '\'' => {
        quote = Some(c);
        current.push(c);
      }
      '(' | '[' => {
        depth += 1;
        current.push(c);
      }
      ')' | ']' => {
        depth = depth.saturating_sub(1);
        current.push(c);
      }
      c if depth == 0 && c.is_whitespace() => {
        flush(&mut tokens, &mut current);
        pending.get_or_insert(Combinator::Descendant);
      }
      c if depth == 0 && Combinator::from_char(c).is_some() => {
        flush(&mut tokens, &mut current);
        pending = Combinator::from_char(c);
      }
      c => current.push(c),
    }
  }

  flush(&mut tokens, &mut current);
  tokens
}

/// Copies the rest of an escape sequence whose backslash was already pushed.
/// Hex escapes swallow one trailing whitespace character.
fn push_escape(chars: &mut Peekable<Chars<'_>>, current: &mut String) {
  let Some(first) = chars.next() else {
    return;
  };
  current.push(first);
  if !first.is_ascii_hexdigit() {
    return;
  }

  let mut digits = 1;
  while digits < 6 {
    match chars.peek() {
      Some(c) if c.is_ascii_hexdigit() => {
        current.push(*c);
        chars.next();
        digits += 1;
      }
      _ => break,
    }
  }

  if let Some(c) = chars.peek() {
    if c.is_whitespace() {
      current.push(*c);
      chars.next();
    }
  }
}
