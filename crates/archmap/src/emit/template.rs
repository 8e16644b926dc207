//! A small `{{ slot }}` template language.
//!
//! Templates are compiled once into literal text and named slots, then
//! rendered any number of times by plain substitution. There are no
//! conditionals or loops: anything resembling logic belongs to the graph
//! builders.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, cut_err, delimited, preceded, repeat, terminated},
    error::{ContextError, ErrMode, StrContext},
    token::{literal, take_while},
};

use thiserror::Error;

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Errors raised while compiling or expanding a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template `{template}` is malformed near byte {offset}: {message}")]
    Syntax {
        template: &'static str,
        offset: usize,
        message: String,
    },

    #[error("template `{template}` has no value bound for slot `{slot}`")]
    MissingBinding {
        template: &'static str,
        slot: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(String),
}

/// Values substituted into a template, looked up by slot name.
#[derive(Debug, Default)]
pub(crate) struct Bindings<'a> {
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> Bindings<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(mut self, slot: &'static str, value: &'a str) -> Self {
        self.values.push((slot, value));
        self
    }

    fn get(&self, slot: &str) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(name, _)| *name == slot)
            .map(|(_, value)| *value)
    }
}

/// A compiled template.
#[derive(Debug, Clone)]
pub(crate) struct Template {
    name: &'static str,
    segments: Vec<Segment>,
}

fn slot_name<'s>(input: &mut &'s str) -> IResult<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// `{{ name }}`; anything after an opening `{{` that is not a slot is an error.
fn slot(input: &mut &str) -> IResult<Segment> {
    preceded(
        literal("{{"),
        cut_err(terminated(delimited(space0, slot_name, space0), literal("}}")))
            .context(StrContext::Label("slot")),
    )
    .map(|name: &str| Segment::Slot(name.to_string()))
    .parse_next(input)
}

/// A run of text up to the next brace, or a single lone brace.
fn text(input: &mut &str) -> IResult<Segment> {
    alt((take_while(1.., |c: char| c != '{'), literal("{")))
        .map(|text: &str| Segment::Text(text.to_string()))
        .parse_next(input)
}

fn segments(input: &mut &str) -> IResult<Vec<Segment>> {
    repeat(0.., alt((slot, text))).parse_next(input)
}

impl Template {
    /// Compiles `source`, merging adjacent text runs.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] for an unterminated or invalid slot.
    pub(crate) fn compile(name: &'static str, source: &str) -> Result<Self, TemplateError> {
        let mut input = source;
        let syntax = |input: &str, message: String| TemplateError::Syntax {
            template: name,
            offset: source.len() - input.len(),
            message,
        };

        let parsed = match segments(&mut input) {
            Ok(parsed) => parsed,
            Err(ErrMode::Backtrack(err) | ErrMode::Cut(err)) => {
                let message = match err.to_string() {
                    msg if msg.is_empty() => "invalid slot".to_string(),
                    msg => msg,
                };
                return Err(syntax(input, message));
            }
            Err(_) => return Err(syntax(input, "unexpected end of template".to_string())),
        };
        if !input.is_empty() {
            return Err(syntax(input, "unexpected trailing input".to_string()));
        }

        let mut segments: Vec<Segment> = Vec::with_capacity(parsed.len());
        for segment in parsed {
            match (segments.last_mut(), segment) {
                (Some(Segment::Text(prev)), Segment::Text(text)) => prev.push_str(&text),
                (_, segment) => segments.push(segment),
            }
        }

        Ok(Self { name, segments })
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Slot names in order of appearance, repeats included.
    pub(crate) fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Appends the expansion of this template to `out`.
    ///
    /// On error `out` may hold a partial expansion.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingBinding`] when a slot has no value.
    pub(crate) fn render_into(
        &self,
        out: &mut String,
        bindings: &Bindings<'_>,
    ) -> Result<(), TemplateError> {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let value = bindings
                        .get(slot)
                        .ok_or_else(|| TemplateError::MissingBinding {
                            template: self.name,
                            slot: slot.clone(),
                        })?;
                    out.push_str(value);
                }
            }
        }
        Ok(())
    }

    /// Returns the expansion of this template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingBinding`] when a slot has no value.
    pub(crate) fn render(&self, bindings: &Bindings<'_>) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.render_into(&mut out, bindings)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let template = Template::compile("plain", "direction: right\n").unwrap();
        assert_eq!(template.slots().count(), 0);
        assert_eq!(
            template.render(&Bindings::new()).unwrap(),
            "direction: right\n"
        );
    }

    #[test]
    fn test_slots_with_and_without_spaces() {
        let template = Template::compile("edge", "{{source}} -> {{ target }}: {{ label}}").unwrap();

        assert_eq!(
            template.slots().collect::<Vec<_>>(),
            vec!["source", "target", "label"]
        );

        let bindings = Bindings::new()
            .bind("source", "a")
            .bind("target", "b")
            .bind("label", "uses");
        assert_eq!(template.render(&bindings).unwrap(), "a -> b: uses");
    }

    #[test]
    fn test_single_braces_are_literal_text() {
        let template = Template::compile("node", "{{key}}: {\n  shape: cloud\n}\n").unwrap();
        let bindings = Bindings::new().bind("key", "\"db\"");

        assert_eq!(
            template.render(&bindings).unwrap(),
            "\"db\": {\n  shape: cloud\n}\n"
        );
    }

    #[test]
    fn test_repeated_slot() {
        let template = Template::compile("twice", "{{x}}/{{x}}").unwrap();
        let bindings = Bindings::new().bind("x", "1");
        assert_eq!(template.render(&bindings).unwrap(), "1/1");
    }

    #[test]
    fn test_values_are_not_reexpanded() {
        let template = Template::compile("value", "<{{x}}>").unwrap();
        let bindings = Bindings::new().bind("x", "{{y}}");
        assert_eq!(template.render(&bindings).unwrap(), "<{{y}}>");
    }

    #[test]
    fn test_unterminated_slot_is_rejected() {
        let err = Template::compile("broken", "a -> {{target").unwrap_err();
        match err {
            TemplateError::Syntax {
                template, offset, ..
            } => {
                assert_eq!(template, "broken");
                assert!(offset >= 5, "offset {offset} should point at the slot");
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_slot_name_is_rejected() {
        assert!(Template::compile("broken", "{{not-a-slot}}").is_err());
        assert!(Template::compile("broken", "{{}}").is_err());
    }

    #[test]
    fn test_missing_binding() {
        let template = Template::compile("edge", "{{source}} -> {{target}}").unwrap();
        let err = template
            .render(&Bindings::new().bind("source", "a"))
            .unwrap_err();

        assert_eq!(
            err,
            TemplateError::MissingBinding {
                template: "edge",
                slot: "target".to_string(),
            }
        );
        assert_eq!(template.name(), "edge");
    }
}
