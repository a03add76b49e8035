//! [`MeiDocument`] → MEI text

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::escape::partial_escape;
use quick_xml::Writer;

use crate::document::{MeiDocument, Misc};
use crate::error::{MeiError, MeiResult};
use crate::tree::{Element, Node};

impl MeiDocument {
    /// Serialize the whole document, prolog included
    pub fn to_xml_string(&self) -> MeiResult<String> {
        let mut writer = Writer::new(Vec::new());

        for misc in &self.prolog {
            write_misc(&mut writer, misc)?;
        }
        write_element(&mut writer, self.root())?;
        for misc in &self.epilog {
            write_misc(&mut writer, misc)?;
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

/// Serialize a single element subtree
pub fn element_to_string(element: &Element) -> MeiResult<String> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, element)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> MeiResult<()> {
    let pos = writer.get_ref().len();
    writer
        .write_event(event)
        .map_err(|e| MeiError::xml(pos, e))
}

fn write_misc(writer: &mut Writer<Vec<u8>>, misc: &Misc) -> MeiResult<()> {
    match misc {
        Misc::Declaration(decl) => emit(
            writer,
            Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )),
        ),
        Misc::ProcessingInstruction(content) => {
            emit(writer, Event::PI(BytesText::from_escaped(content.as_str())))
        }
        Misc::DocType(content) => {
            emit(writer, Event::DocType(BytesText::from_escaped(content.as_str())))
        }
        Misc::Comment(content) => {
            emit(writer, Event::Comment(BytesText::from_escaped(content.as_str())))
        }
        Misc::Text(text) => emit(writer, Event::Text(text_event(text))),
    }
}

/// Quotes stay literal in text content
fn text_event(text: &str) -> BytesText<'_> {
    BytesText::from_escaped(partial_escape(text))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> MeiResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => emit(writer, Event::Text(text_event(text)))?,
            Node::Comment(comment) => {
                emit(writer, Event::Comment(BytesText::from_escaped(comment.as_str())))?
            }
            Node::CData(data) => emit(writer, Event::CData(BytesCData::new(data.as_str())))?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}
