//! XML text to [`XmlElement`] tree using quick-xml.

use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use super::{XmlElement, XmlValue};
use crate::error::XmlError;

/// Parse XML text into a document node.
///
/// The returned element is synthetic: its children are the top-level
/// elements of the input. Namespace prefixes are dropped from element and
/// attribute names; `xmlns` declarations are not kept.
pub fn parse(input: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<(String, XmlElement)> = vec![(String::new(), XmlElement::new())];

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                ensure_single_root(&stack, position)?;
                let opened = open_element(e, position)?;
                stack.push(opened);
            }
            Ok(Event::Empty(ref e)) => {
                ensure_single_root(&stack, position)?;
                let (name, element) = open_element(e, position)?;
                attach(&mut stack, name, element);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| malformed(position, err))?;
                append_text(&mut stack, &text, position)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_text(&mut stack, &text, position)?;
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(malformed(position, "unexpected closing tag"));
                }
                if let Some((name, element)) = stack.pop() {
                    attach(&mut stack, name, element);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(malformed(reader.buffer_position() as u64, err)),
            _ => {}
        }
    }

    if stack.len() != 1 {
        let unclosed = stack.last().map(|(name, _)| name.clone()).unwrap_or_default();
        return Err(malformed(
            input.len() as u64,
            format!("unclosed element <{}>", unclosed),
        ));
    }

    let document = stack.pop().map(|(_, element)| element).unwrap_or_default();
    if document.children.is_empty() {
        return Err(XmlError::Empty);
    }

    trace!("Parsed XML with {} top-level element(s)", document.children.len());
    Ok(document)
}

fn open_element(start: &BytesStart<'_>, position: u64) -> Result<(String, XmlElement), XmlError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut element = XmlElement::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|err| malformed(position, err))?;
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(position, err))?
            .into_owned();
        element.attributes.insert(key, value);
    }

    Ok((name, element))
}

fn attach(stack: &mut [(String, XmlElement)], name: String, element: XmlElement) {
    if let Some((_, parent)) = stack.last_mut() {
        parent.insert(name, XmlValue::Element(element));
    }
}

/// A document has exactly one root element.
fn ensure_single_root(stack: &[(String, XmlElement)], position: u64) -> Result<(), XmlError> {
    match stack {
        [(_, document)] if !document.children.is_empty() => {
            Err(malformed(position, "content after the root element"))
        }
        _ => Ok(()),
    }
}

fn append_text(
    stack: &mut [(String, XmlElement)],
    text: &str,
    position: u64,
) -> Result<(), XmlError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    match stack {
        [_] => Err(malformed(position, "text outside the root element")),
        [.., (_, current)] => {
            current.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        [] => Ok(()),
    }
}

fn malformed(position: u64, message: impl Display) -> XmlError {
    XmlError::Malformed {
        position,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_and_repeated() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <Faktura xmlns="http://crd.gov.pl/wzor/2023/06/29/12648/">
                <Naglowek>
                    <KodFormularza kodSystemowy="FA (2)" wersjaSchemy="1-0E">FA</KodFormularza>
                </Naglowek>
                <Fa>
                    <FaWiersz><NrWierszaFa>1</NrWierszaFa></FaWiersz>
                    <FaWiersz><NrWierszaFa>2</NrWierszaFa></FaWiersz>
                </Fa>
            </Faktura>"#;

        let doc = parse(xml).unwrap();
        let faktura = doc.child("Faktura").unwrap();
        assert!(faktura.attributes.is_empty());

        let kod = faktura.path(&["Naglowek", "KodFormularza"]).unwrap();
        assert_eq!(kod.attr("kodSystemowy"), Some("FA (2)"));
        assert_eq!(kod.text.as_deref(), Some("FA"));

        let rows = faktura.child("Fa").unwrap().children("FaWiersz");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text("NrWierszaFa"), Some("2"));
    }

    #[test]
    fn test_parse_strips_prefixes_and_unescapes() {
        let xml = r#"<tns:Faktura xmlns:tns="urn:x"><tns:P_7>Kawa &amp; herbata</tns:P_7><P_8A><![CDATA[szt.]]></P_8A></tns:Faktura>"#;
        let doc = parse(xml).unwrap();
        let faktura = doc.child("Faktura").unwrap();
        assert_eq!(faktura.text("P_7"), Some("Kawa & herbata"));
        assert_eq!(faktura.text("P_8A"), Some("szt."));
    }

    #[test]
    fn test_parse_self_closing() {
        let doc = parse("<Root><Empty/><Value>1</Value></Root>").unwrap();
        let root = doc.child("Root").unwrap();
        assert!(root.child("Empty").unwrap().is_empty());
        assert_eq!(root.text("Empty"), None);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse("<Faktura><Fa></Faktura>"),
            Err(XmlError::Malformed { .. })
        ));
        assert!(matches!(
            parse("<Faktura><Fa>"),
            Err(XmlError::Malformed { .. })
        ));
        assert_eq!(parse("   "), Err(XmlError::Empty));
    }

    #[test]
    fn test_parse_rejects_second_root() {
        let err = parse("<Faktura><P_1>1</P_1></Faktura><Faktura><P_1>2</P_1></Faktura>")
            .unwrap_err();
        assert!(matches!(err, XmlError::Malformed { .. }));
        assert!(matches!(
            parse("<Faktura/><Faktura/>"),
            Err(XmlError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_text_outside_root() {
        assert!(matches!(
            parse("<Faktura/>trailing garbage"),
            Err(XmlError::Malformed { .. })
        ));
        assert!(matches!(
            parse("junk<Faktura/>"),
            Err(XmlError::Malformed { .. })
        ));
        assert!(parse("<?xml version=\"1.0\"?>\n<Faktura/>\n").is_ok());
    }
}
