use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use super::RenderConfig;
use super::tree::{Document, Node};
use crate::core::FatturaError;

/// Event writer for one FatturaPA document.
///
/// Opening the writer emits the declaration and the namespaced root;
/// [`finish`](Self::finish) closes the root. Scalar text longer than the
/// configured chunk size is written as repeated elements with the same tag.
struct FatturaWriter {
    writer: Writer<Cursor<Vec<u8>>>,
    root: String,
    chunk_size: usize,
}

impl FatturaWriter {
    fn open(config: &RenderConfig, version: &str) -> Result<Self, FatturaError> {
        let buf = Cursor::new(Vec::new());
        let mut writer = match config.indent {
            Some(width) => Writer::new_with_indent(buf, b' ', width),
            None => Writer::new(buf),
        };
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let ns = &config.namespaces;
        let root = format!("{}:{}", ns.document.prefix, config.root_element);
        let mut start = BytesStart::new(root.as_str());
        start.push_attribute((format!("xmlns:{}", ns.document.prefix).as_str(), ns.document.uri.as_str()));
        start.push_attribute((format!("xmlns:{}", ns.signature.prefix).as_str(), ns.signature.uri.as_str()));
        start.push_attribute((
            format!("xmlns:{}", ns.schema_instance.prefix).as_str(),
            ns.schema_instance.uri.as_str(),
        ));
        start.push_attribute(("versione", version));
        start.push_attribute((
            format!("{}:schemaLocation", ns.schema_instance.prefix).as_str(),
            config.schema_location.as_str(),
        ));
        writer.write_event(Event::Start(start))?;

        Ok(Self {
            writer,
            root,
            chunk_size: config.chunk_size,
        })
    }

    fn start(&mut self, tag: &str) -> Result<(), FatturaError> {
        Ok(self.writer.write_event(Event::Start(BytesStart::new(tag)))?)
    }

    fn end(&mut self, tag: &str) -> Result<(), FatturaError> {
        Ok(self.writer.write_event(Event::End(BytesEnd::new(tag)))?)
    }

    fn scalar(&mut self, tag: &str, text: &str) -> Result<(), FatturaError> {
        for chunk in chunk_text(text, self.chunk_size) {
            self.start(tag)?;
            self.writer.write_event(Event::Text(BytesText::new(chunk)))?;
            self.end(tag)?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<String, FatturaError> {
        let root = std::mem::take(&mut self.root);
        self.end(&root)?;
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| FatturaError::Write(format!("output is not UTF-8: {e}")))
    }
}

/// Render a normalized document as FatturaPA XML.
///
/// The root element lives in the document namespace and declares the
/// signature and schema-instance namespaces; children are unqualified.
pub fn render_document(document: &Document, config: &RenderConfig) -> Result<String, FatturaError> {
    if config.chunk_size == 0 {
        return Err(FatturaError::Render("chunk size must be positive".into()));
    }

    let mut w = FatturaWriter::open(config, document.version())?;
    for (key, node) in document.entries() {
        write_node(&mut w, key, node, false)?;
    }
    w.finish()
}

fn write_node(w: &mut FatturaWriter, tag: &str, node: &Node, in_list: bool) -> Result<(), FatturaError> {
    match node {
        Node::Map(entries) => {
            w.start(tag)?;
            for (key, child) in entries {
                write_node(w, key, child, false)?;
            }
            w.end(tag)?;
        }
        Node::List(items) => {
            if in_list {
                return Err(FatturaError::Render(format!(
                    "<{tag}>: a list cannot directly contain another list"
                )));
            }
            for item in items {
                write_node(w, tag, item, true)?;
            }
        }
        Node::Scalar(scalar) => w.scalar(tag, &scalar.to_text())?,
    }
    Ok(())
}

/// Split `text` into consecutive pieces of at most `max_chars` characters.
///
/// Boundaries are positional; concatenating the pieces yields `text`.
/// Empty text yields no pieces, and `max_chars == 0` disables splitting.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_chars == 0 {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(text.len() / max_chars + 1);
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);
    chunks
}
