//! Structured output: one markdown document per type plus a per-namespace XML stream.
//!
//! The writer owns all mutable emission state - the open document, the heading depth, the
//! XML stream - so independent runs (and tests) stay isolated. At most one type document
//! is open at a time: starting the next type or finishing the namespace finalizes the
//! previous one, flushing it exactly once. Finalized documents can still be re-opened in
//! append mode through [`Output::path_for_type`], which is how back-reference sections
//! land after a namespace completes.

mod docxml;

pub use docxml::{DocXml, MemberKind};

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::{catalog::TypeKind, options::Options, Error, Result};

/// Writer for one generation run's output directory.
pub struct Output {
    out_dir: PathBuf,
    file_suffix: String,
    version_prefix: String,
    emit_original_id: bool,
    current: Option<BufWriter<File>>,
    depth: usize,
    xml: Option<DocXml>,
}

impl Output {
    /// Create a writer rooted at the configured output directory, creating it if needed.
    pub fn new(options: &Options) -> Result<Self> {
        let out_dir = PathBuf::from(&options.output_dir);
        fs::create_dir_all(&out_dir)?;
        Ok(Output {
            out_dir,
            file_suffix: options.file_suffix.clone(),
            version_prefix: options.version_prefix(),
            emit_original_id: options.api_version.is_some(),
            current: None,
            depth: 0,
            xml: None,
        })
    }

    /// The markdown file path for the type (or index) named `name`.
    #[must_use]
    pub fn path_for_type(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{}{}.md", name, self.file_suffix))
    }

    /// Open the XML documentation-summary stream for `namespace`.
    pub fn start_namespace(&mut self, namespace: &str) -> Result<()> {
        let path = self.out_dir.join(format!("{namespace}.xml"));
        self.xml = Some(DocXml::create(&path, namespace)?);
        Ok(())
    }

    /// Finalize the open document, if any, and close the namespace's XML stream.
    pub fn finish_namespace(&mut self) -> Result<()> {
        self.finalize_current()?;
        if let Some(xml) = self.xml.take() {
            xml.close()?;
        }
        Ok(())
    }

    /// Begin the document for a type: finalizes any open document, writes the
    /// front-matter block and the `Kind:` line, and establishes the base nesting level.
    pub fn start_type(&mut self, name: &str, kind: TypeKind) -> Result<()> {
        self.finalize_current()?;
        let file = File::create(self.path_for_type(name))?;
        let mut writer = BufWriter::new(file);
        write!(
            writer,
            "---\nid: {}{}\ntitle: {}\n",
            self.version_prefix, name, name
        )?;
        if self.emit_original_id {
            writeln!(writer, "original_id: {name}")?;
        }
        write!(writer, "---\n\nKind: `{kind}`\n\n")?;
        self.current = Some(writer);
        // Untitled base section: type body sections start one level down without a
        // visible heading of their own.
        self.depth = 1;
        Ok(())
    }

    /// Enter a section: bump the heading depth and emit the heading.
    ///
    /// An empty heading establishes nesting without emitting anything visible. Must be
    /// balanced by [`Output::exit_section`].
    pub fn enter_section(&mut self, heading: &str) -> Result<()> {
        self.depth += 1;
        if !heading.is_empty() {
            let marks = "#".repeat(self.depth);
            self.write(&format!("{marks} {heading}\n"))?;
        }
        Ok(())
    }

    /// Leave the innermost section, restoring the previous heading depth.
    pub fn exit_section(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Append text to the current type document.
    pub fn write(&mut self, text: &str) -> Result<()> {
        match &mut self.current {
            Some(writer) => {
                writer.write_all(text.as_bytes())?;
                Ok(())
            }
            None => Err(Error::NoOpenDocument),
        }
    }

    /// Append a `<member>` entry to the namespace's XML stream.
    pub fn add_xml_member(&mut self, kind: MemberKind, name: &str, body: &str) -> Result<()> {
        match &mut self.xml {
            Some(xml) => xml.add_member(kind, name, body),
            None => Err(Error::NoOpenDocument),
        }
    }

    fn finalize_current(&mut self) -> Result<()> {
        if let Some(mut writer) = self.current.take() {
            writer.flush()?;
        }
        self.depth = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_in(dir: &std::path::Path) -> Options {
        Options {
            output_dir: dir.to_string_lossy().into_owned(),
            ..Options::default()
        }
    }

    #[test]
    fn test_front_matter_and_kind_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = Output::new(&options_in(dir.path())).unwrap();
        output.start_namespace("Test").unwrap();
        output.start_type("Class1", TypeKind::Class).unwrap();
        output.finish_namespace().unwrap();

        let body = fs::read_to_string(output.path_for_type("Class1")).unwrap();
        assert!(body.starts_with("---\nid: Class1\ntitle: Class1\n---\n\n"));
        assert!(body.contains("Kind: `class`\n\n"));
    }

    #[test]
    fn test_version_qualified_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let opts = Options {
            api_version: Some("0.63".to_string()),
            ..options_in(dir.path())
        };
        let mut output = Output::new(&opts).unwrap();
        output.start_namespace("Test").unwrap();
        output.start_type("Class1", TypeKind::Class).unwrap();
        output.finish_namespace().unwrap();

        let body = fs::read_to_string(output.path_for_type("Class1")).unwrap();
        assert!(body.starts_with("---\nid: version-0.63-Class1\ntitle: Class1\noriginal_id: Class1\n---\n"));
    }

    #[test]
    fn test_section_nesting_controls_heading_depth() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = Output::new(&options_in(dir.path())).unwrap();
        output.start_namespace("Test").unwrap();
        output.start_type("Class1", TypeKind::Class).unwrap();
        output.enter_section("Properties").unwrap();
        output.enter_section("Source").unwrap();
        output.write("string `Source`\n").unwrap();
        output.exit_section();
        output.exit_section();
        output.enter_section("Methods").unwrap();
        output.write("none\n").unwrap();
        output.exit_section();
        output.finish_namespace().unwrap();

        let body = fs::read_to_string(output.path_for_type("Class1")).unwrap();
        assert!(body.contains("\n## Properties\n"));
        assert!(body.contains("\n### Source\n"));
        assert!(body.contains("\n## Methods\n"));
    }

    #[test]
    fn test_next_type_finalizes_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = Output::new(&options_in(dir.path())).unwrap();
        output.start_namespace("Test").unwrap();
        output.start_type("First", TypeKind::Struct).unwrap();
        output.write("first body\n").unwrap();
        output.start_type("Second", TypeKind::Class).unwrap();
        output.write("second body\n").unwrap();
        output.finish_namespace().unwrap();

        let first = fs::read_to_string(output.path_for_type("First")).unwrap();
        assert!(first.contains("first body"));
        assert!(!first.contains("second body"));
        let second = fs::read_to_string(output.path_for_type("Second")).unwrap();
        assert!(second.contains("Kind: `class`"));
        assert!(second.contains("second body"));
    }

    #[test]
    fn test_write_without_open_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = Output::new(&options_in(dir.path())).unwrap();
        assert!(matches!(
            output.write("orphan"),
            Err(Error::NoOpenDocument)
        ));
    }

    #[test]
    fn test_file_suffix_in_paths() {
        let dir = tempfile::tempdir().unwrap();
        let output = Output::new(&options_in(dir.path())).unwrap();
        assert!(output
            .path_for_type("Class1")
            .to_string_lossy()
            .ends_with("Class1-api-windows.md"));
    }
}
