//! MEI text → [`MeiDocument`]
//!
//! Keeps whitespace, comments, processing instructions and the doctype so
//! an unedited document serializes back to equivalent markup.

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

use crate::document::{Declaration, MeiDocument, Misc};
use crate::error::{MeiError, MeiResult};
use crate::tree::{Element, Node};

impl MeiDocument {
    pub fn parse(xml: &str) -> MeiResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let pos = reader.buffer_position();
            let event = reader.read_event().map_err(|e| MeiError::xml(pos, e))?;

            // Markup outside the root lands in the prolog or the epilog
            let outside = if root.is_none() { &mut prolog } else { &mut epilog };

            match event {
                Event::Eof => break,
                Event::Start(start) => stack.push(element_from_start(&start, pos)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start, pos)?;
                    close_element(&mut stack, &mut root, element, pos)?;
                }
                Event::End(end) => {
                    let element = stack.pop().ok_or_else(|| {
                        MeiError::unbalanced(pos, format!("unexpected </{}>", utf8(end.name().as_ref())))
                    })?;
                    close_element(&mut stack, &mut root, element, pos)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| MeiError::xml(pos, e))?.into_owned();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Text(text)),
                        None => outside.push(Misc::Text(text)),
                    }
                }
                Event::CData(data) => {
                    let data = utf8(&data);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::CData(data)),
                        None => outside.push(Misc::Text(data)),
                    }
                }
                Event::Comment(comment) => {
                    let comment = utf8(&comment);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Comment(comment)),
                        None => outside.push(Misc::Comment(comment)),
                    }
                }
                Event::Decl(decl) => outside.push(Misc::Declaration(declaration(&decl, pos)?)),
                Event::PI(pi) => outside.push(Misc::ProcessingInstruction(utf8(&pi))),
                Event::DocType(doctype) => outside.push(Misc::DocType(utf8(&doctype))),
            }
        }

        if let Some(open) = stack.last() {
            return Err(MeiError::unbalanced(
                reader.buffer_position(),
                format!("<{}> is never closed", open.name),
            ));
        }

        let root = root.ok_or(MeiError::MissingRoot)?;
        Ok(MeiDocument::with_misc(prolog, root, epilog))
    }
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    pos: usize,
) -> MeiResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element.into());
            Ok(())
        }
        None if root.is_some() => Err(MeiError::unbalanced(
            pos,
            format!("second root element <{}>", element.name),
        )),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn element_from_start(start: &BytesStart<'_>, pos: usize) -> MeiResult<Element> {
    let mut element = Element::new(utf8(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| MeiError::xml(pos, e))?;
        let value = attribute.unescape_value().map_err(|e| MeiError::xml(pos, e))?;
        element
            .attributes
            .push((utf8(attribute.key.as_ref()), value.into_owned()));
    }
    Ok(element)
}

fn declaration(decl: &BytesDecl<'_>, pos: usize) -> MeiResult<Declaration> {
    let version = decl.version().map_err(|e| MeiError::xml(pos, e))?;
    let encoding = decl
        .encoding()
        .transpose()
        .map_err(|e| MeiError::xml(pos, e))?;
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(|e| MeiError::xml(pos, e))?;

    Ok(Declaration {
        version: utf8(&version),
        encoding: encoding.as_ref().map(|value| utf8(value)),
        standalone: standalone.as_ref().map(|value| utf8(value)),
    })
}

fn utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
