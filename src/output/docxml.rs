//! The per-namespace XML documentation-summary stream.
//!
//! Alongside the markdown documents, each namespace gets a `<Namespace>.xml` file in the
//! .NET documentation-summary shape: a fixed prolog naming the assembly, one `<member>`
//! entry per documented item keyed by a one-letter kind code and the dotted
//! `Namespace.Type[.Member]` name, and a fixed epilog. Doc-string markdown is sanitized
//! into XML doc markup on the way through.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{Error, Result};

/// The kind code a `<member>` entry is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// `F:` - a field
    Field,
    /// `P:` - a property
    Property,
    /// `T:` - a type
    Type,
    /// `M:` - a method
    Method,
}

impl MemberKind {
    /// The one-letter code used in `member` name attributes.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            MemberKind::Field => 'F',
            MemberKind::Property => 'P',
            MemberKind::Type => 'T',
            MemberKind::Method => 'M',
        }
    }
}

/// An open documentation-summary stream for one namespace.
///
/// Created by the output writer when a namespace starts and closed exactly once when the
/// namespace finishes; [`DocXml::close`] writes the epilog and flushes.
pub struct DocXml {
    writer: Writer<BufWriter<File>>,
    namespace: String,
}

impl DocXml {
    /// Create the stream at `path` and write the prolog for `namespace`.
    pub fn create(path: &Path, namespace: &str) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("doc")))?;
        writer.write_event(Event::Start(BytesStart::new("assembly")))?;
        writer.write_event(Event::Start(BytesStart::new("name")))?;
        writer.write_event(Event::Text(BytesText::new(namespace)))?;
        writer.write_event(Event::End(BytesEnd::new("name")))?;
        writer.write_event(Event::End(BytesEnd::new("assembly")))?;
        writer.write_event(Event::Start(BytesStart::new("members")))?;
        Ok(DocXml {
            writer,
            namespace: namespace.to_string(),
        })
    }

    /// Append a `<member>` entry.
    ///
    /// `short_name` is the `Type` or `Type.Member` part; the stream's namespace is
    /// prepended. `body` is doc markup with references already resolved to `<see/>` tags;
    /// it is sanitized but not re-escaped.
    pub fn add_member(&mut self, kind: MemberKind, short_name: &str, body: &str) -> Result<()> {
        let name = format!("{}:{}.{}", kind.code(), self.namespace, short_name);
        let mut member = BytesStart::new("member");
        member.push_attribute(("name", name.as_str()));
        self.writer.write_event(Event::Start(member))?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(sanitize(body)?)))?;
        self.writer.write_event(Event::End(BytesEnd::new("member")))?;
        Ok(())
    }

    /// Write the epilog and flush the stream.
    pub fn close(mut self) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new("members")))?;
        self.writer.write_event(Event::End(BytesEnd::new("doc")))?;
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

/// Convert markdown code markup in a doc string to XML doc markup.
///
/// Backtick-fenced blocks become `<example><code>` regions, single backticks become
/// inline `<c>` code, and escaped line-break markers become literal newlines.
///
/// # Errors
/// Returns [`Error::UnterminatedCodeBlock`] when the text ends while still inside a
/// fenced block - emitting an unterminated `<code>` region would corrupt the stream.
pub(crate) fn sanitize(text: &str) -> Result<String> {
    let text = text.replace("\\n", "\n");
    let mut out = String::with_capacity(text.len());
    let mut in_fence = false;
    let mut in_inline = false;
    let mut rest = text.as_str();
    while let Some(pos) = rest.find('`') {
        out.push_str(&rest[..pos]);
        if rest[pos..].starts_with("```") {
            out.push_str(if in_fence {
                "</code></example>"
            } else {
                "<example><code>"
            });
            in_fence = !in_fence;
            rest = &rest[pos + 3..];
        } else {
            out.push_str(if in_inline { "</c>" } else { "<c>" });
            in_inline = !in_inline;
            rest = &rest[pos + 1..];
        }
    }
    if in_fence {
        return Err(Error::UnterminatedCodeBlock);
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_inline_code() {
        assert_eq!(
            sanitize("set `null` to clear").unwrap(),
            "set <c>null</c> to clear"
        );
    }

    #[test]
    fn test_sanitize_fenced_block() {
        assert_eq!(
            sanitize("usage:```let x = 1;```done").unwrap(),
            "usage:<example><code>let x = 1;</code></example>done"
        );
    }

    #[test]
    fn test_sanitize_line_break_markers() {
        assert_eq!(sanitize("first\\nsecond").unwrap(), "first\nsecond");
    }

    #[test]
    fn test_unterminated_fence_is_fatal() {
        assert!(matches!(
            sanitize("open ```but never closed"),
            Err(Error::UnterminatedCodeBlock)
        ));
    }

    #[test]
    fn test_member_kind_codes() {
        assert_eq!(MemberKind::Field.code(), 'F');
        assert_eq!(MemberKind::Property.code(), 'P');
        assert_eq!(MemberKind::Type.code(), 'T');
        assert_eq!(MemberKind::Method.code(), 'M');
    }

    #[test]
    fn test_stream_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test.xml");
        let mut xml = DocXml::create(&path, "Test").unwrap();
        xml.add_member(MemberKind::Property, "Class1.Source", "the `source` URI")
            .unwrap();
        xml.close().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(written.contains("<name>Test</name>"));
        assert!(written.contains(r#"<member name="P:Test.Class1.Source">"#));
        assert!(written.contains("the <c>source</c> URI"));
        assert!(written.trim_end().ends_with("</doc>"));
    }
}
