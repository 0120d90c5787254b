//! Streaming rewriter for body text runs
//!
//! Mutation of a report body never goes through the parsed tree: the tree
//! is lossy, and a template must keep its styling untouched. Instead the
//! body XML is streamed event by event from reader to writer, and a visitor
//! is offered the text of every `<w:t>` run on the way through. Markup the
//! visitor does not touch is copied through unchanged.
//!
//! The visitor can do three things with a run: replace its text, request
//! that the enclosing paragraph be centered, and request raw
//! WordprocessingML to be spliced in directly after the enclosing
//! paragraph. Paragraph events are buffered until the paragraph closes so
//! that those two paragraph-level edits can be applied retroactively.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::Result;

/// Edits requested by a visitor for one text run
#[derive(Debug, Default)]
pub struct RunDirective {
    /// Replacement for the run's text
    pub replace: Option<String>,
    /// Center the enclosing paragraph
    pub center_paragraph: bool,
    /// Raw WordprocessingML spliced in after the enclosing paragraph
    pub insert_after_paragraph: Option<String>,
}

impl RunDirective {
    /// A directive that leaves the run untouched
    pub fn keep() -> Self {
        Self::default()
    }

    /// A directive that only replaces the run's text
    pub fn replace(text: impl Into<String>) -> Self {
        Self {
            replace: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Walk every text run in the body, applying the visitor's directives.
///
/// The visitor receives the current text of each `<w:t>` fragment. Text
/// inside field instructions (`<w:instrText>`) is never offered. Returns
/// the rewritten document XML.
pub fn rewrite_runs<F>(xml: &[u8], mut visit: F) -> Result<Vec<u8>>
where
    F: FnMut(&str) -> RunDirective,
{
    let mut reader = Reader::from_reader(xml);
    // Don't trim text - whitespace in runs is significant
    reader.config_mut().trim_text(false);

    let mut writer = Writer::new(Vec::new());
    let mut buf = Vec::new();

    // Events of the paragraph currently being buffered
    let mut para: Vec<Event<'static>> = Vec::new();
    let mut para_depth = 0u32;
    let mut center = false;
    let mut inserts: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        let event = reader.read_event_into(&mut buf)?.into_owned();
        match event {
            Event::Eof => break,
            Event::Start(ref e) => {
                match e.local_name().as_ref() {
                    b"p" => para_depth += 1,
                    b"t" if para_depth > 0 => in_text = true,
                    _ => {}
                }
                route(&mut writer, &mut para, para_depth, event)?;
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => {
                    in_text = false;
                    route(&mut writer, &mut para, para_depth, event)?;
                }
                b"p" if para_depth > 0 => {
                    para.push(event);
                    para_depth -= 1;
                    if para_depth == 0 {
                        flush_paragraph(&mut writer, &para, center, &inserts)?;
                        para.clear();
                        center = false;
                        inserts.clear();
                    }
                }
                _ => route(&mut writer, &mut para, para_depth, event)?,
            },
            Event::Text(ref t) if in_text => {
                let directive = {
                    let text = t.unescape()?;
                    visit(&text)
                };
                center |= directive.center_paragraph;
                if let Some(block) = directive.insert_after_paragraph {
                    inserts.push(block);
                }
                match directive.replace {
                    Some(new) => {
                        let replaced = Event::Text(BytesText::new(&new)).into_owned();
                        route(&mut writer, &mut para, para_depth, replaced)?;
                    }
                    None => route(&mut writer, &mut para, para_depth, event)?,
                }
            }
            other => route(&mut writer, &mut para, para_depth, other)?,
        }
        buf.clear();
    }

    Ok(writer.into_inner())
}

/// Buffer the event while inside a paragraph, write it through otherwise
fn route(
    writer: &mut Writer<Vec<u8>>,
    para: &mut Vec<Event<'static>>,
    para_depth: u32,
    event: Event<'static>,
) -> Result<()> {
    if para_depth > 0 {
        para.push(event);
    } else {
        writer.write_event(event)?;
    }
    Ok(())
}

/// Write out a buffered paragraph, applying centering and trailing splices
fn flush_paragraph(
    writer: &mut Writer<Vec<u8>>,
    events: &[Event<'static>],
    center: bool,
    inserts: &[String],
) -> Result<()> {
    if center {
        write_centered(writer, events)?;
    } else {
        for event in events {
            writer.write_event(event.borrow())?;
        }
    }

    for block in inserts {
        // Pre-built markup goes through verbatim
        writer.write_event(Event::Text(BytesText::from_escaped(block.as_str())))?;
    }

    Ok(())
}

/// Write a paragraph with its justification forced to centered.
///
/// Paragraph properties, when present, are the first child of `<w:p>`. An
/// existing justification is dropped in favor of the centered one; a
/// paragraph without properties gets a fresh `<w:pPr>`.
fn write_centered(writer: &mut Writer<Vec<u8>>, events: &[Event<'static>]) -> Result<()> {
    let mut jc = BytesStart::new("w:jc");
    jc.push_attribute(("w:val", "center"));

    // events[0] is the <w:p> start tag
    writer.write_event(events[0].borrow())?;
    let mut rest = &events[1..];

    match rest.first() {
        Some(Event::Start(e)) if e.local_name().as_ref() == b"pPr" => {
            writer.write_event(rest[0].borrow())?;
            let mut depth = 1u32;
            let mut skip = 0u32;
            let mut i = 1;
            while i < rest.len() && depth > 0 {
                match &rest[i] {
                    Event::Start(e) => {
                        if skip > 0 {
                            skip += 1;
                        } else if depth == 1 && e.local_name().as_ref() == b"jc" {
                            skip = 1;
                        } else {
                            writer.write_event(rest[i].borrow())?;
                        }
                        depth += 1;
                    }
                    Event::Empty(e) => {
                        if skip == 0 && !(depth == 1 && e.local_name().as_ref() == b"jc") {
                            writer.write_event(rest[i].borrow())?;
                        }
                    }
                    Event::End(_) => {
                        depth -= 1;
                        if depth == 0 {
                            writer.write_event(Event::Empty(jc.to_owned()))?;
                            writer.write_event(rest[i].borrow())?;
                        } else if skip > 0 {
                            skip -= 1;
                        } else {
                            writer.write_event(rest[i].borrow())?;
                        }
                    }
                    other => {
                        if skip == 0 {
                            writer.write_event(other.borrow())?;
                        }
                    }
                }
                i += 1;
            }
            rest = &rest[i..];
        }
        Some(Event::Empty(e)) if e.local_name().as_ref() == b"pPr" => {
            writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
            writer.write_event(Event::Empty(jc))?;
            writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
            rest = &rest[1..];
        }
        _ => {
            writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
            writer.write_event(Event::Empty(jc))?;
            writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        }
    }

    for event in rest {
        writer.write_event(event.borrow())?;
    }
    Ok(())
}
