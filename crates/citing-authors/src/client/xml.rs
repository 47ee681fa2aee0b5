//! Parsers for E-utilities XML payloads (`esearch`, `elink`, `esummary`).
//!
//! Each parser streams events with `quick_xml` and keeps the stack of open
//! tags, so a field is recognised by its full path rather than by name alone.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ClientError, ClientResult};
use crate::models::{DocSummary, Pmid};

/// Endpoint label used in errors.
pub const ESEARCH: &str = "esearch";
/// Endpoint label used in errors.
pub const ELINK: &str = "elink";
/// Endpoint label used in errors.
pub const ESUMMARY: &str = "esummary";

/// Link name for "papers citing this paper".
pub const CITED_IN: &str = "pubmed_pubmed_citedin";

/// One `<LinkSet>`: the id it was asked about and the linked ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    /// Id named in the set's `IdList`; `None` if the service omitted it.
    pub source: Option<Pmid>,
    /// Linked ids for the requested link name, in service order.
    pub linked: Vec<Pmid>,
}

/// An open element: its name and, for esummary `Item`s, its `Name` attribute.
#[derive(Debug)]
struct Tag {
    name: String,
    label: Option<String>,
}

enum Node<'a> {
    Open,
    Text(&'a str),
    Close,
}

fn at(path: &[Tag], names: &[&str]) -> bool {
    path.len() == names.len() && path.iter().zip(names).all(|(tag, name)| tag.name == *name)
}

fn tag_of(endpoint: &'static str, e: &BytesStart<'_>) -> ClientResult<Tag> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let label = match e.try_get_attribute("Name") {
        Ok(Some(attr)) => Some(
            attr.unescape_value()
                .map_err(|err| ClientError::parse(endpoint, err.to_string()))?
                .into_owned(),
        ),
        Ok(None) => None,
        Err(err) => return Err(ClientError::parse(endpoint, err.to_string())),
    };
    Ok(Tag { name, label })
}

/// Walk the document, calling `visit` with the tag path for every node.
///
/// The path includes the current element for `Open`, `Text` and `Close`.
/// Fails if the root element is not `root` or the document is truncated.
fn walk<F>(xml: &str, endpoint: &'static str, root: &str, mut visit: F) -> ClientResult<()>
where
    F: FnMut(&[Tag], Node<'_>) -> ClientResult<()>,
{
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Tag> = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = tag_of(endpoint, e)?;
                if path.is_empty() {
                    if saw_root || tag.name != root {
                        return Err(ClientError::parse(
                            endpoint,
                            format!("expected <{root}> document, found <{}>", tag.name),
                        ));
                    }
                    saw_root = true;
                }
                path.push(tag);
                visit(&path, Node::Open)?;
            }
            Ok(Event::Empty(ref e)) => {
                let tag = tag_of(endpoint, e)?;
                if path.is_empty() {
                    return Err(ClientError::parse(
                        endpoint,
                        format!("expected <{root}> document, found empty <{}/>", tag.name),
                    ));
                }
                path.push(tag);
                visit(&path, Node::Open)?;
                visit(&path, Node::Close)?;
                path.pop();
            }
            Ok(Event::Text(ref e)) => {
                if path.is_empty() {
                    continue;
                }
                let text =
                    e.unescape().map_err(|err| ClientError::parse(endpoint, err.to_string()))?;
                visit(&path, Node::Text(&text))?;
            }
            Ok(Event::CData(ref e)) => {
                if path.is_empty() {
                    continue;
                }
                let text = String::from_utf8_lossy(e).into_owned();
                visit(&path, Node::Text(&text))?;
            }
            Ok(Event::End(_)) => {
                visit(&path, Node::Close)?;
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(ClientError::parse(endpoint, err.to_string())),
            // Declarations, doctypes, comments, processing instructions
            Ok(_) => {}
        }
    }

    if !saw_root {
        return Err(ClientError::parse(endpoint, format!("missing <{root}> document")));
    }
    if let Some(open) = path.last() {
        return Err(ClientError::parse(
            endpoint,
            format!("document ended inside <{}>", open.name),
        ));
    }
    Ok(())
}

/// Parse an `esearch` response into its id list.
///
/// A top-level `<ERROR>` with no ids is a service error; an empty
/// `<IdList/>` is a valid, empty result.
pub fn parse_esearch(xml: &str) -> ClientResult<Vec<Pmid>> {
    const ROOT: &str = "eSearchResult";

    let mut ids = Vec::new();
    let mut error: Option<String> = None;

    walk(xml, ESEARCH, ROOT, |path, node| {
        if let Node::Text(text) = node {
            if at(path, &[ROOT, "IdList", "Id"]) {
                ids.push(Pmid::new(text));
            } else if at(path, &[ROOT, "ERROR"]) {
                error = Some(text.to_string());
            }
        }
        Ok(())
    })?;

    match error {
        Some(message) if ids.is_empty() => Err(ClientError::service(ESEARCH, message)),
        _ => Ok(ids),
    }
}

/// Parse an `elink` response into one [`LinkSet`] per `<LinkSet>` element.
///
/// Only `<LinkSetDb>` blocks whose `LinkName` equals `link_name` (or that
/// carry no `LinkName`) contribute ids.
pub fn parse_elink(xml: &str, link_name: &str) -> ClientResult<Vec<LinkSet>> {
    const ROOT: &str = "eLinkResult";

    let mut sets = Vec::new();
    let mut current = LinkSet::default();
    let mut db_links: Vec<Pmid> = Vec::new();
    let mut db_name: Option<String> = None;
    let mut error: Option<String> = None;

    walk(xml, ELINK, ROOT, |path, node| {
        match node {
            Node::Open if at(path, &[ROOT, "LinkSet"]) => current = LinkSet::default(),
            Node::Open if at(path, &[ROOT, "LinkSet", "LinkSetDb"]) => {
                db_links.clear();
                db_name = None;
            }
            Node::Text(text) if at(path, &[ROOT, "LinkSet", "IdList", "Id"]) => {
                if current.source.is_none() {
                    current.source = Some(Pmid::new(text));
                }
            }
            Node::Text(text) if at(path, &[ROOT, "LinkSet", "LinkSetDb", "LinkName"]) => {
                db_name = Some(text.to_string());
            }
            Node::Text(text) if at(path, &[ROOT, "LinkSet", "LinkSetDb", "Link", "Id"]) => {
                db_links.push(Pmid::new(text));
            }
            Node::Text(text) if at(path, &[ROOT, "LinkSet", "ERROR"]) => {
                tracing::debug!(error = %text, "elink reported a per-id error");
            }
            Node::Text(text) if at(path, &[ROOT, "ERROR"]) => error = Some(text.to_string()),
            Node::Close if at(path, &[ROOT, "LinkSet", "LinkSetDb"]) => {
                if db_name.as_deref().is_none_or(|name| name == link_name) {
                    current.linked.append(&mut db_links);
                }
            }
            Node::Close if at(path, &[ROOT, "LinkSet"]) => sets.push(std::mem::take(&mut current)),
            _ => {}
        }
        Ok(())
    })?;

    match error {
        Some(message) if sets.is_empty() => Err(ClientError::service(ELINK, message)),
        _ => Ok(sets),
    }
}

/// Parse an `esummary` (version 1) response into one summary per `<DocSum>`.
///
/// A `DocSum` without an `AuthorList` item gets an empty author list.
/// Per-id `<ERROR>` elements (unknown uids) are skipped.
pub fn parse_esummary(xml: &str) -> ClientResult<Vec<DocSummary>> {
    const ROOT: &str = "eSummaryResult";

    let mut docs = Vec::new();
    let mut current = DocSummary::default();

    walk(xml, ESUMMARY, ROOT, |path, node| {
        match node {
            Node::Open if at(path, &[ROOT, "DocSum"]) => current = DocSummary::default(),
            Node::Text(text) if at(path, &[ROOT, "DocSum", "Id"]) => {
                current.pmid = Pmid::new(text);
            }
            Node::Text(text) if at(path, &[ROOT, "DocSum", "Item"]) => {
                if path[2].label.as_deref() == Some("Title") {
                    current.title = Some(text.to_string());
                }
            }
            Node::Text(text) if at(path, &[ROOT, "DocSum", "Item", "Item"]) => {
                if path[2].label.as_deref() == Some("AuthorList") {
                    current.authors.push(text.to_string());
                }
            }
            Node::Text(text) if at(path, &[ROOT, "ERROR"]) => {
                tracing::debug!(error = %text, "esummary reported a per-id error");
            }
            Node::Close if at(path, &[ROOT, "DocSum"]) => docs.push(std::mem::take(&mut current)),
            _ => {}
        }
        Ok(())
    })?;

    Ok(docs)
}
