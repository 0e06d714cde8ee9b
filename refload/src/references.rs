//! Reading reference declarations out of project files.
//!
//! Project files are declarative XML. The extractor streams the markup with
//! `quick-xml` and picks out the reference elements it is configured for,
//! wherever they appear in the document. It never interprets the values it
//! reads: macro substitution and path resolution happen later.

use std::fmt;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{Error, Result};

/// Default element carrying project references.
pub const DEFAULT_REFERENCE_ELEMENT: &str = "ProjectReference";

/// Default attribute holding the referenced path.
pub const DEFAULT_INCLUDE_ATTRIBUTE: &str = "Include";

const IMPORT_ELEMENT: &[u8] = b"Import";
const IMPORT_PROJECT_ATTRIBUTE: &[u8] = b"Project";
const IMPORT_LABEL_ATTRIBUTE: &[u8] = b"Label";
const SHARED_LABEL: &str = "Shared";

/// One reference declaration, exactly as written in the project file
/// (with XML entities decoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDeclaration(String);

impl ReferenceDeclaration {
    /// Create a declaration from its include text.
    #[must_use]
    pub fn new(include: impl Into<String>) -> Self {
        Self(include.into())
    }

    /// The include text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts reference declarations from project files.
///
/// # Examples
///
/// ```no_run
/// use refload::references::ReferenceExtractor;
/// use std::path::Path;
///
/// let extractor = ReferenceExtractor::new();
/// for reference in extractor.extract_references(Path::new("App/App.csproj")).unwrap() {
///     println!("{reference}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    element: String,
    include_attribute: String,
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self {
            element: DEFAULT_REFERENCE_ELEMENT.to_string(),
            include_attribute: DEFAULT_INCLUDE_ATTRIBUTE.to_string(),
        }
    }
}

impl ReferenceExtractor {
    /// Create an extractor for `ProjectReference Include="..."` declarations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different element name for reference declarations.
    #[must_use]
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }

    /// Use a different attribute name for the referenced path.
    #[must_use]
    pub fn with_include_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.include_attribute = attribute.into();
        self
    }

    /// Read every reference declaration in `project_file`, in document order.
    ///
    /// Declarations whose include attribute is missing or empty are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProjectUnreadable`] if the file cannot be opened or
    /// its markup is malformed.
    pub fn extract_references(&self, project_file: &Path) -> Result<Vec<ReferenceDeclaration>> {
        let element = self.element.as_bytes();
        let attribute = self.include_attribute.as_bytes();
        let mut declarations = Vec::new();

        scan_elements(project_file, |start| {
            if start.local_name().as_ref() != element {
                return Ok(());
            }
            if let Some(include) = attribute_value(start, attribute)? {
                if !include.is_empty() {
                    declarations.push(ReferenceDeclaration(include));
                }
            }
            Ok(())
        })?;

        log::debug!(
            "{} declares {} reference(s)",
            project_file.display(),
            declarations.len()
        );
        Ok(declarations)
    }

    /// Read the shared-items imports of `project_file`, in document order.
    ///
    /// These are `Import` elements labelled `Shared`; the value of their
    /// `Project` attribute is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProjectUnreadable`] if the file cannot be opened or
    /// its markup is malformed.
    pub fn extract_shared_imports(&self, project_file: &Path) -> Result<Vec<String>> {
        let mut imports = Vec::new();

        scan_elements(project_file, |start| {
            if start.local_name().as_ref() != IMPORT_ELEMENT {
                return Ok(());
            }
            let is_shared = attribute_value(start, IMPORT_LABEL_ATTRIBUTE)?
                .is_some_and(|label| label.eq_ignore_ascii_case(SHARED_LABEL));
            if is_shared {
                if let Some(project) = attribute_value(start, IMPORT_PROJECT_ATTRIBUTE)? {
                    if !project.is_empty() {
                        imports.push(project);
                    }
                }
            }
            Ok(())
        })?;

        Ok(imports)
    }
}

/// Stream `path` and hand every opening or self-closing element to `visit`.
///
/// The whole document is checked for well-formedness: a missing root element,
/// mismatched end tags or unclosed elements make the file unreadable.
fn scan_elements<F>(path: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&BytesStart<'_>) -> std::result::Result<(), String>,
{
    let unreadable = |reason: String| Error::ProjectUnreadable {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Reader::from_file(path).map_err(|e| unreadable(e.to_string()))?;
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) => {
                depth += 1;
                saw_root = true;
                visit(&start).map_err(unreadable)?;
            }
            Ok(Event::Empty(start)) => {
                saw_root = true;
                visit(&start).map_err(unreadable)?;
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(unreadable(format!(
                    "{e} (at byte {})",
                    reader.error_position()
                )));
            }
        }
        buf.clear();
    }

    if !saw_root {
        return Err(unreadable("root element is missing".to_string()));
    }
    if depth != 0 {
        return Err(unreadable(format!(
            "unexpected end of file with {depth} unclosed element(s)"
        )));
    }
    Ok(())
}

/// Decoded value of the attribute whose local name is `name`.
fn attribute_value(
    start: &BytesStart<'_>,
    name: &[u8],
) -> std::result::Result<Option<String>, String> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        if attribute.key.local_name().as_ref() == name {
            let value = attribute.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
