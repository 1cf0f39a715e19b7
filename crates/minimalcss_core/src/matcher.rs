use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use crate::error::InvalidSelector;

/// Evaluates selector text against a parsed document.
pub trait SelectorMatcher {
  type Node: Clone;

  /// Every element matching `selector`, either anywhere in the document or,
  /// when `scope` is given, strictly inside the subtree of any scope element.
  fn select(
    &self,
    selector: &str,
    scope: Option<&[Self::Node]>,
  ) -> Result<Vec<Self::Node>, InvalidSelector>;

  /// The distinct parent elements of `nodes`, or `None` when one of them sits
  /// at the top of the document.
  fn parents(&self, nodes: &[Self::Node]) -> Option<Vec<Self::Node>>;
}

pub fn parse_markup(markup: &str) -> Html {
  Html::parse_document(markup)
}

#[derive(Debug)]
pub struct HtmlMatcher<'a> {
  document: &'a Html,
}

impl<'a> HtmlMatcher<'a> {
  pub fn new(document: &'a Html) -> Self {
    HtmlMatcher { document }
  }

  fn parse(selector: &str) -> Result<Selector, InvalidSelector> {
    Selector::parse(selector).map_err(|err| InvalidSelector {
      segment: selector.to_string(),
      reason: err.to_string(),
    })
  }
}

impl<'a> SelectorMatcher for HtmlMatcher<'a> {
  type Node = ElementRef<'a>;

  fn select(
    &self,
    selector: &str,
    scope: Option<&[ElementRef<'a>]>,
  ) -> Result<Vec<ElementRef<'a>>, InvalidSelector> {
    let selector = Self::parse(selector)?;

    let Some(scope) = scope else {
      return Ok(self.document.select(&selector).collect());
    };

    let mut seen = HashSet::new();
    let mut matches = Vec::new();
    for element in scope {
      for candidate in element.select(&selector) {
        if candidate.id() != element.id() && seen.insert(candidate.id()) {
          matches.push(candidate);
        }
      }
    }

    Ok(matches)
  }

  fn parents(&self, nodes: &[ElementRef<'a>]) -> Option<Vec<ElementRef<'a>>> {
    let mut seen = HashSet::new();
    let mut parents = Vec::new();
    for node in nodes {
      let parent = node.parent().and_then(ElementRef::wrap)?;
      if seen.insert(parent.id()) {
        parents.push(parent);
      }
    }

    Some(parents)
  }
}
