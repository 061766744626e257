//! Small event-driven readers over package XML parts.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::PackageError;

fn xml_error(part: &str, message: impl ToString) -> PackageError {
    PackageError::Xml {
        part: part.to_string(),
        message: message.to_string(),
    }
}

/// Raw attribute value by local name, ignoring prefixed attributes unless
/// `prefixed` is set.
fn attribute(element: &BytesStart<'_>, local: &[u8], prefixed: bool) -> Option<String> {
    element.attributes().flatten().find_map(|attr| {
        let matches = attr.key.local_name().as_ref() == local
            && attr.key.prefix().is_some() == prefixed;
        matches
            .then(|| std::str::from_utf8(&attr.value).ok().map(str::to_string))
            .flatten()
    })
}

/// `(Id, Type, Target, TargetMode)` of every `<Relationship>` element.
pub(crate) fn relationships(
    part: &str,
    xml: &str,
) -> Result<Vec<(String, String, String, Option<String>)>, PackageError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut rels = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let (Some(id), Some(rel_type), Some(target)) = (
                    attribute(&e, b"Id", false),
                    attribute(&e, b"Type", false),
                    attribute(&e, b"Target", false),
                ) else {
                    continue;
                };
                rels.push((id, rel_type, target, attribute(&e, b"TargetMode", false)));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
    }
    Ok(rels)
}

/// Relationship ids (`r:id`) of `<p:sldId>` entries in document order.
pub(crate) fn slide_id_relationships(part: &str, xml: &str) -> Result<Vec<String>, PackageError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    let mut in_list = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"sldIdLst" => in_list = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"sldIdLst" => in_list = false,
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if in_list && e.local_name().as_ref() == b"sldId" =>
            {
                if let Some(id) = attribute(&e, b"id", true) {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
    }
    Ok(ids)
}

fn resolve_entity(name: &str) -> Option<char> {
    if let Some(code) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(code, 16).ok().and_then(char::from_u32);
    }
    if let Some(code) = name.strip_prefix('#') {
        return code.parse::<u32>().ok().and_then(char::from_u32);
    }
    quick_xml::escape::resolve_predefined_entity(name).and_then(|s| s.chars().next())
}

/// Text of every DrawingML `<a:t>` run, in document order.
pub(crate) fn text_runs(part: &str, xml: &str) -> Result<Vec<String>, PackageError> {
    let mut reader = Reader::from_str(xml);

    let mut runs = Vec::new();
    let mut current: Option<String> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => {
                current = Some(String::new());
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"t" => runs.push(String::new()),
            Ok(Event::Text(e)) => {
                if let Some(run) = current.as_mut() {
                    let text = std::str::from_utf8(e.as_ref()).map_err(|err| xml_error(part, err))?;
                    run.push_str(text);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(run) = current.as_mut() {
                    let name = std::str::from_utf8(&e).map_err(|err| xml_error(part, err))?;
                    match resolve_entity(name) {
                        Some(ch) => run.push(ch),
                        None => return Err(xml_error(part, format!("unknown entity &{name};"))),
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(run) = current.as_mut() {
                    run.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => {
                if let Some(run) = current.take() {
                    runs.push(run);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
    }
    Ok(runs)
}
