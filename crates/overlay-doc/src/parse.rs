//! Event-based parsing of settings documents
//!
//! Recognizes `var`, `block`, and `import` elements at the top level of the
//! root container. Anything else at that level becomes a raw fragment
//! carrying its exact source text. Block children are captured verbatim by
//! slicing the source between the wrapper tags.

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::entry::{BlockEntry, Entry, ImportEntry, RawFragment, VariableEntry};
use crate::error::{Error, Result};
use crate::model::DocumentModel;

pub(crate) fn parse_document(path: PathBuf, text: &str) -> Result<DocumentModel> {
    let mut reader = Reader::from_str(text);
    let mut prolog_parts: Vec<&str> = Vec::new();

    // Prolog and the root container's start tag. Comments and other misc
    // nodes before the root belong to the prolog and survive a rewrite.
    let (root_open, root_name, root_is_empty) = loop {
        let start = position(&reader);
        match read_event(&path, &mut reader)? {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {
                prolog_parts.push(&text[start..position(&reader)]);
            }
            Event::Start(e) => {
                let name = element_name(&e);
                break (text[start..position(&reader)].to_string(), name, false);
            }
            Event::Empty(e) => {
                // Self-closing root: normalize the tag to an open form so the
                // rendered document always has an open/close pair.
                let name = element_name(&e);
                let tag = text[start..position(&reader)]
                    .trim_end_matches('>')
                    .trim_end_matches('/')
                    .trim_end();
                break (format!("{tag}>"), name, true);
            }
            Event::Eof => return Err(Error::malformed(&path, "missing root element")),
            _ => {}
        }
    };

    let mut entries = Vec::new();
    if !root_is_empty {
        loop {
            let start = position(&reader);
            match read_event(&path, &mut reader)? {
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"var" => entries.push(Entry::Variable(parse_var(&path, &e)?)),
                    b"import" => entries.push(Entry::Import(parse_import(&path, &e)?)),
                    b"block" => {
                        let (name, is_enabled) = parse_block_attrs(&path, &e)?;
                        entries.push(Entry::Block(BlockEntry {
                            name,
                            is_enabled,
                            content_without_root: None,
                        }));
                    }
                    _ => entries.push(raw(&text[start..position(&reader)])),
                },
                Event::Start(e) => match e.local_name().as_ref() {
                    b"var" => {
                        let var = parse_var(&path, &e)?;
                        skip_element(&path, &mut reader, &e)?;
                        entries.push(Entry::Variable(var));
                    }
                    b"import" => {
                        let import = parse_import(&path, &e)?;
                        skip_element(&path, &mut reader, &e)?;
                        entries.push(Entry::Import(import));
                    }
                    b"block" => {
                        let (name, is_enabled) = parse_block_attrs(&path, &e)?;
                        let inner = reader
                            .read_text(e.name())
                            .map_err(|err| syntax(&path, &reader, err))?;
                        entries.push(Entry::Block(BlockEntry {
                            name,
                            is_enabled,
                            content_without_root: Some(inner.into_owned()),
                        }));
                    }
                    _ => {
                        skip_element(&path, &mut reader, &e)?;
                        entries.push(raw(&text[start..position(&reader)]));
                    }
                },
                Event::Text(_) => {
                    let fragment = text[start..position(&reader)].trim();
                    if !fragment.is_empty() {
                        entries.push(raw(fragment));
                    }
                }
                Event::Comment(_) | Event::CData(_) | Event::PI(_) | Event::DocType(_) => {
                    entries.push(raw(text[start..position(&reader)].trim()));
                }
                Event::Decl(_) => {}
                Event::End(_) => break,
                Event::Eof => {
                    return Err(Error::malformed(&path, "unexpected end of document"));
                }
            }
        }
    }

    // Only whitespace and comments may follow the closing root tag.
    loop {
        match read_event(&path, &mut reader)? {
            Event::Eof => break,
            Event::Text(t) => {
                let trailing = t.unescape().map_err(|e| syntax(&path, &reader, e))?;
                if !trailing.trim().is_empty() {
                    return Err(Error::malformed(&path, "content after closing root element"));
                }
            }
            Event::Comment(_) => {}
            _ => {
                return Err(Error::malformed(&path, "content after closing root element"));
            }
        }
    }

    let prolog = if prolog_parts.is_empty() {
        None
    } else {
        Some(prolog_parts.join("\n"))
    };
    Ok(DocumentModel {
        path,
        prolog,
        root_open,
        root_name,
        entries,
        trailing_newline: text.ends_with('\n'),
        modified: false,
    })
}

fn parse_var(path: &Path, e: &BytesStart<'_>) -> Result<VariableEntry> {
    let name = attr(path, e, b"name")?
        .ok_or_else(|| Error::malformed(path, "var element without name attribute"))?;
    let value = attr(path, e, b"value")?.unwrap_or_default();
    Ok(VariableEntry { name, value })
}

fn parse_import(path: &Path, e: &BytesStart<'_>) -> Result<ImportEntry> {
    let from = attr(path, e, b"from")?
        .ok_or_else(|| Error::malformed(path, "import element without from attribute"))?;
    Ok(ImportEntry { from })
}

fn parse_block_attrs(path: &Path, e: &BytesStart<'_>) -> Result<(String, Option<bool>)> {
    let name = attr(path, e, b"name")?
        .ok_or_else(|| Error::malformed(path, "block element without name attribute"))?;
    let is_enabled = attr(path, e, b"enabled")?.and_then(|v| parse_bool_literal(&v));
    Ok((name, is_enabled))
}

/// Case-insensitive tri-state: anything but a boolean literal counts as
/// an absent attribute.
fn parse_bool_literal(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn attr(path: &Path, e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attribute in e.attributes() {
        let attribute = attribute.map_err(|err| Error::malformed(path, err))?;
        if attribute.key.as_ref() == key {
            let value = attribute
                .unescape_value()
                .map_err(|err| Error::malformed(path, err))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Consume an element's content up to its matching end tag.
fn skip_element(path: &Path, reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<()> {
    reader
        .read_to_end(e.name())
        .map_err(|err| syntax(path, reader, err))?;
    Ok(())
}

fn read_event<'a>(path: &Path, reader: &mut Reader<&'a [u8]>) -> Result<Event<'a>> {
    let event = reader.read_event();
    event.map_err(|err| syntax(path, reader, err))
}

fn position(reader: &Reader<&[u8]>) -> usize {
    reader.buffer_position() as usize
}

fn syntax(path: &Path, reader: &Reader<&[u8]>, err: quick_xml::Error) -> Error {
    Error::malformed(path, format!("{err} at byte {}", reader.buffer_position()))
}

fn raw(text: &str) -> Entry {
    Entry::Raw(RawFragment {
        text: text.to_string(),
    })
}
