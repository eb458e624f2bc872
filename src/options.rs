//! Generation options.
//!
//! [`Options`] is a plain configuration object consumed by the generator and the renderers.
//! Command-line parsing is deliberately out of scope; a frontend fills this struct however
//! it likes and hands it over.

/// Options controlling a documentation generation run.
///
/// All fields have sensible defaults via [`Default`], matching the behavior of a plain
/// invocation with no switches.
#[derive(Debug, Clone)]
pub struct Options {
    /// Include APIs marked with `ExperimentalAttribute`.
    pub output_experimental: bool,
    /// Render the Properties section as a table instead of per-property subsections.
    pub properties_as_table: bool,
    /// Render struct Fields sections as a table instead of per-field subsections.
    pub fields_as_table: bool,
    /// Suffix appended to each generated markdown file name, before the `.md` extension.
    pub file_suffix: String,
    /// Directory all output files are written into.
    pub output_dir: String,
    /// When set, front-matter ids are prefixed with `version-<apiVersion>-` and an
    /// `original_id` entry is emitted.
    pub api_version: Option<String>,
    /// Echo the accumulated reference graph through the `log` facade while draining it.
    pub print_reference_graph: bool,
    /// Escalate unresolved cross-namespace references from a logged warning to a hard failure.
    pub strict_references: bool,
    /// Display name used for the generic object root element kind.
    pub object_class_name: String,
    /// Namespace prefixes whose types are documented externally.
    pub external_doc_namespaces: Vec<String>,
    /// Base URL external documentation links are built from, as
    /// `<url><Namespace>.<Name><suffix>`.
    pub external_doc_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            output_experimental: false,
            properties_as_table: false,
            fields_as_table: false,
            file_suffix: "-api-windows".to_string(),
            output_dir: "out".to_string(),
            api_version: None,
            print_reference_graph: false,
            strict_references: false,
            object_class_name: "Object".to_string(),
            external_doc_namespaces: vec!["Windows.".to_string(), "Microsoft.".to_string()],
            external_doc_url: "https://docs.microsoft.com/uwp/api/".to_string(),
        }
    }
}

impl Options {
    /// The front-matter id prefix derived from [`Options::api_version`], empty when no
    /// version is configured.
    #[must_use]
    pub fn version_prefix(&self) -> String {
        match &self.api_version {
            Some(version) => format!("version-{version}-"),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.file_suffix, "-api-windows");
        assert_eq!(opts.output_dir, "out");
        assert_eq!(opts.object_class_name, "Object");
        assert!(!opts.strict_references);
        assert_eq!(opts.version_prefix(), "");
    }

    #[test]
    fn test_version_prefix() {
        let opts = Options {
            api_version: Some("0.63".to_string()),
            ..Options::default()
        };
        assert_eq!(opts.version_prefix(), "version-0.63-");
    }
}
